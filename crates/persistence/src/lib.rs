//! Persistence layer for the payment intake backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - PostgreSQL repository implementations of the domain store traits
//! - An in-memory store with the same semantics

pub mod db;
pub mod entities;
pub mod memory;
pub mod metrics;
pub mod repositories;

use domain::StoreError;

/// Maps a database error onto the domain store error.
///
/// Not-null and check constraint violations mean the record itself was
/// rejected; everything else is a storage failure.
pub(crate) fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(code) = db_err.code() {
            if matches!(code.as_ref(), "23502" | "23514") {
                return StoreError::Validation(db_err.message().to_string());
            }
        }
    }
    tracing::error!(error = %err, "Database operation failed");
    StoreError::Database(err.to_string())
}
