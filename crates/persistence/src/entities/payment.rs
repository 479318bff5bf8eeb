//! Payment database entity.

use chrono::{DateTime, Utc};
use domain::models::{Payment, PaymentStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the payments table.
#[derive(Debug, Clone, FromRow)]
pub struct PaymentEntity {
    pub id: Uuid,
    pub email: String,
    pub phone: String,
    pub card_number: String,
    pub cvc: Option<String>,
    pub expiry: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentEntity> for Payment {
    fn from(entity: PaymentEntity) -> Self {
        let status = entity.status.as_deref().and_then(|s| {
            s.parse::<PaymentStatus>()
                .map_err(|e| tracing::warn!(payment_id = %entity.id, error = %e, "Ignoring stored status"))
                .ok()
        });

        Self {
            id: entity.id,
            email: entity.email,
            phone: entity.phone,
            card_number: entity.card_number,
            cvc: entity.cvc,
            expiry: entity.expiry,
            status,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(status: Option<&str>) -> PaymentEntity {
        PaymentEntity {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            phone: "555".to_string(),
            card_number: "4111".to_string(),
            cvc: None,
            expiry: Some("12/30".to_string()),
            status: status.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_entity_to_domain_with_status() {
        let payment: Payment = entity(Some("processing")).into();
        assert_eq!(payment.status, Some(PaymentStatus::Processing));
        assert_eq!(payment.expiry.as_deref(), Some("12/30"));
    }

    #[test]
    fn test_entity_to_domain_without_status() {
        let payment: Payment = entity(None).into();
        assert!(payment.status.is_none());
    }

    #[test]
    fn test_entity_to_domain_unknown_status_dropped() {
        let payment: Payment = entity(Some("refunded")).into();
        assert!(payment.status.is_none());
    }
}
