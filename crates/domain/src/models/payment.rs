//! Payment domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::PageInfo;
use shared::string_or_scalar;
use shared::validation::normalize_email;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::error::StoreError;

/// Processing status of a payment.
///
/// A freshly saved payment has no status at all. Any of the four values may
/// be set at any time; no ordering between them is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Processing,
        PaymentStatus::Completed,
        PaymentStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    // Exact match only: "Completed" is not a valid status.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown payment status: {}", s))
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored card submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub email: String,
    pub phone: String,
    pub card_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    pub created_at: DateTime<Utc>,
}

/// Body of the payment intake request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SavePaymentRequest {
    #[validate(
        required(message = "email is required"),
        length(min = 1, message = "email is required")
    )]
    #[serde(default, deserialize_with = "string_or_scalar::deserialize_opt")]
    pub email: Option<String>,
    #[validate(
        required(message = "phone is required"),
        length(min = 1, message = "phone is required")
    )]
    #[serde(default, deserialize_with = "string_or_scalar::deserialize_opt")]
    pub phone: Option<String>,
    #[validate(
        required(message = "cardNumber is required"),
        length(min = 1, message = "cardNumber is required")
    )]
    #[serde(default, deserialize_with = "string_or_scalar::deserialize_opt")]
    pub card_number: Option<String>,
    #[serde(default, deserialize_with = "string_or_scalar::deserialize_opt")]
    pub cvc: Option<String>,
    #[serde(default, deserialize_with = "string_or_scalar::deserialize_opt")]
    pub expiry: Option<String>,
}

/// A validated payment ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub email: String,
    pub phone: String,
    pub card_number: String,
    pub cvc: Option<String>,
    pub expiry: Option<String>,
}

impl TryFrom<SavePaymentRequest> for NewPayment {
    type Error = StoreError;

    /// Normalizes the email (trim, lower-case) and checks the required fields.
    fn try_from(mut request: SavePaymentRequest) -> Result<Self, Self::Error> {
        request.email = request.email.as_deref().map(normalize_email);
        request.validate()?;

        let SavePaymentRequest {
            email,
            phone,
            card_number,
            cvc,
            expiry,
        } = request;

        match (email, phone, card_number) {
            (Some(email), Some(phone), Some(card_number)) => Ok(NewPayment {
                email,
                phone,
                card_number,
                cvc,
                expiry,
            }),
            _ => Err(StoreError::Validation("required field missing".to_string())),
        }
    }
}

/// Body of the status update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    #[serde(default, deserialize_with = "string_or_scalar::deserialize_opt")]
    pub status: Option<String>,
}

/// Filter applied when listing payments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    /// Exact status match. Values that are not a known status match nothing.
    pub status: Option<String>,
}

impl PaymentFilter {
    pub fn matches(&self, payment: &Payment) -> bool {
        match &self.status {
            None => true,
            Some(wanted) => payment
                .status
                .map(|s| s.as_str() == wanted)
                .unwrap_or(false),
        }
    }
}

/// One page of payments plus totals.
#[derive(Debug, Clone)]
pub struct PaymentPage {
    pub records: Vec<Payment>,
    pub info: PageInfo,
}
