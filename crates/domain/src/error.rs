//! Domain error types.

use thiserror::Error;

/// Failure reported by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record was rejected before or by the storage medium
    /// (missing required field, constraint violation).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The storage medium failed.
    #[error("Database error: {0}")]
    Database(String),
}

/// Errors returned by domain services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<validator::ValidationErrors> for StoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                errs.first()
                    .and_then(|e| e.message.clone())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
            .collect();
        fields.sort();
        StoreError::Validation(fields.join(", "))
    }
}
