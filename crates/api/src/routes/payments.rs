//! Payment route handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::{Payment, PaymentFilter, SavePaymentRequest, UpdatePaymentStatusRequest};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageInfo, PageRequest};
use shared::validation::non_empty;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::{ApiError, ServiceResultExt};
use crate::extractors::JsonBody;

/// Query parameters for listing payments. Kept as raw strings so malformed
/// numbers fall back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListPaymentsQuery {
    pub status: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSavedResponse {
    pub success: bool,
    pub message: &'static str,
    pub payment_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PaymentListResponse {
    pub success: bool,
    pub data: Vec<Payment>,
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub success: bool,
    pub data: Payment,
}

#[derive(Debug, Serialize)]
pub struct PaymentUpdatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: Payment,
}

/// Save a card submission and notify the operator in the background.
///
/// POST /save-payment
pub async fn save_payment(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SavePaymentRequest>,
) -> Result<Json<PaymentSavedResponse>, ApiError> {
    let payment = state
        .payments
        .create_payment(request)
        .await
        .or_api_error("Error saving payment")?;

    Ok(Json(PaymentSavedResponse {
        success: true,
        message: "Payment saved + Email sent",
        payment_id: payment.id,
    }))
}

/// List payments, newest first.
///
/// GET /payments?status=&limit=50&page=1
pub async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<Json<PaymentListResponse>, ApiError> {
    let filter = PaymentFilter {
        status: non_empty(query.status.as_deref()).map(str::to_string),
    };
    let page = PageRequest::from_query(query.page.as_deref(), query.limit.as_deref());

    let result = state
        .payments
        .list(&filter, page)
        .await
        .or_api_error("Error fetching payments")?;

    Ok(Json(PaymentListResponse {
        success: true,
        data: result.records,
        pagination: result.info,
    }))
}

/// Get a single payment.
///
/// GET /payments/:id
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment = state
        .payments
        .get_payment(&id)
        .await
        .or_api_error("Error fetching payment")?;

    Ok(Json(PaymentResponse {
        success: true,
        data: payment,
    }))
}

/// Set the status of a payment. Any valid status may replace any other.
///
/// PATCH /payments/:id/status
pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdatePaymentStatusRequest>,
) -> Result<Json<PaymentUpdatedResponse>, ApiError> {
    let payment = state
        .payments
        .update_status(&id, request.status.as_deref())
        .await
        .or_api_error("Error updating payment status")?;

    Ok(Json(PaymentUpdatedResponse {
        success: true,
        message: "Payment status updated",
        data: payment,
    }))
}
