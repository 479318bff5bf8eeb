use std::any::Any;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use domain::ServiceError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// `message` is returned to the client. `detail` is added by
    /// [`error_detail`] on routers that expose it.
    #[error("Internal error: {message}: {detail}")]
    Internal { message: String, detail: String },
}

impl ApiError {
    pub fn internal(message: impl Into<String>, detail: impl ToString) -> Self {
        ApiError::Internal {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    /// Maps a service failure, using `message` as the client-facing text
    /// when the failure is internal.
    pub fn from_service(err: ServiceError, message: &str) -> Self {
        match err {
            ServiceError::Validation(msg) => ApiError::Validation(msg),
            ServiceError::InvalidStatus(_) => ApiError::Validation("Invalid status".into()),
            ServiceError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ServiceError::Storage(e) => ApiError::internal(message, e),
        }
    }
}

/// Attaches the per-route failure message to service results.
pub trait ServiceResultExt<T> {
    fn or_api_error(self, message: &str) -> Result<T, ApiError>;
}

impl<T> ServiceResultExt<T> for Result<T, ServiceError> {
    fn or_api_error(self, message: &str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from_service(e, message))
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ErrorBody {
    fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: None,
        }
    }
}

/// Underlying error text of a 500 response, carried as a response extension
/// until [`error_detail`] decides whether the client sees it.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail {
    pub message: String,
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(msg))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody::new(msg))).into_response()
            }
            ApiError::Internal { message, detail } => {
                tracing::error!(error = %detail, "{}", message);
                let mut response =
                    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(message.clone())))
                        .into_response();
                response
                    .extensions_mut()
                    .insert(InternalErrorDetail { message, detail });
                response
            }
        }
    }
}

/// Adds the `error` field to 500 bodies when `expose` is set.
///
/// Must wrap every layer that can produce an [`ApiError`], including panic
/// catching.
pub async fn error_detail(State(expose): State<bool>, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let Some(internal) = response.extensions_mut().remove::<InternalErrorDetail>() else {
        return response;
    };
    if !expose {
        return response;
    }

    let (parts, _) = response.into_parts();
    let body = ErrorBody {
        success: false,
        message: internal.message,
        error: Some(internal.detail),
    };
    (parts, Json(body)).into_response()
}

/// Fallback for requests that match no route.
pub async fn route_not_found() -> Response {
    ApiError::NotFound("Route not found".into()).into_response()
}

/// Response for a handler that panicked.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::internal("Internal server error", detail).into_response()
}
