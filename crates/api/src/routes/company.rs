//! Company profile route handlers.

use axum::{extract::State, Json};
use domain::models::{CompanyPatch, CompanyProfile};
use serde::Serialize;

use crate::app::AppState;
use crate::error::{ApiError, ServiceResultExt};
use crate::extractors::JsonBody;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub success: bool,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompanyUpdatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: CompanyProfile,
}

/// Get the company profile, creating the default one on first use.
///
/// GET /company
pub async fn get_company(State(state): State<AppState>) -> Result<Json<CompanyResponse>, ApiError> {
    let company = state
        .companies
        .get()
        .await
        .or_api_error("Error fetching company information")?;

    Ok(Json(CompanyResponse {
        success: true,
        company_name: company.company_name,
        email: company.email,
        phone: company.phone,
    }))
}

/// Partially update the company profile. Omitted or empty fields keep their
/// stored value.
///
/// PUT /company
pub async fn update_company(
    State(state): State<AppState>,
    JsonBody(patch): JsonBody<CompanyPatch>,
) -> Result<Json<CompanyUpdatedResponse>, ApiError> {
    let company = state
        .companies
        .update(&patch)
        .await
        .or_api_error("Error updating company information")?;

    Ok(Json(CompanyUpdatedResponse {
        success: true,
        message: "Company information updated",
        data: company,
    }))
}
