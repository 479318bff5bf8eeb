//! Redirect URL route handlers.

use axum::{extract::State, Json};
use domain::models::{RedirectConfig, UpdateRedirectRequest};
use serde::Serialize;

use crate::app::AppState;
use crate::error::{ApiError, ServiceResultExt};
use crate::extractors::JsonBody;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectUrlResponse {
    pub success: bool,
    pub redirect_url: String,
}

#[derive(Debug, Serialize)]
pub struct RedirectUpdatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: RedirectConfig,
}

#[derive(Debug, Serialize)]
pub struct RedirectHistoryResponse {
    pub success: bool,
    pub data: Vec<RedirectConfig>,
}

/// Get the active redirect URL.
///
/// GET /redirect-url
pub async fn get_redirect_url(
    State(state): State<AppState>,
) -> Result<Json<RedirectUrlResponse>, ApiError> {
    let active = state
        .redirects
        .get_active()
        .await
        .or_api_error("Error fetching redirect URL")?;

    Ok(Json(RedirectUrlResponse {
        success: true,
        redirect_url: active.redirect_url,
    }))
}

/// Replace the active redirect URL. Previous URLs are kept as inactive
/// records.
///
/// PUT /redirect-url
pub async fn update_redirect_url(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<UpdateRedirectRequest>,
) -> Result<Json<RedirectUpdatedResponse>, ApiError> {
    let created = state
        .redirects
        .set_active(request)
        .await
        .or_api_error("Error updating redirect URL")?;

    Ok(Json(RedirectUpdatedResponse {
        success: true,
        message: "Redirect URL updated",
        data: created,
    }))
}

/// List every redirect URL that has been set, newest first.
///
/// GET /redirect-url/history
pub async fn get_redirect_history(
    State(state): State<AppState>,
) -> Result<Json<RedirectHistoryResponse>, ApiError> {
    let data = state
        .redirects
        .history()
        .await
        .or_api_error("Error fetching redirect history")?;

    Ok(Json(RedirectHistoryResponse { success: true, data }))
}
