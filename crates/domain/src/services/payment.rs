//! Payment lifecycle: intake, lookup, status changes and listing.

use std::sync::Arc;

use metrics::counter;
use shared::pagination::PageRequest;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::models::{
    NewPayment, Payment, PaymentFilter, PaymentPage, PaymentStatus, SavePaymentRequest,
};

use super::listing::list_payments;
use super::notification::{dispatch_new_payment, PaymentNotifier};
use super::store::PaymentStore;

#[derive(Clone)]
pub struct PaymentService {
    store: Arc<dyn PaymentStore>,
    notifier: Arc<dyn PaymentNotifier>,
}

impl PaymentService {
    pub fn new(store: Arc<dyn PaymentStore>, notifier: Arc<dyn PaymentNotifier>) -> Self {
        Self { store, notifier }
    }

    /// Validates and stores a submission, then hands it to the notifier on a
    /// detached task. The returned payment is saved whatever the
    /// notification outcome.
    pub async fn create_payment(&self, request: SavePaymentRequest) -> Result<Payment, ServiceError> {
        let new = NewPayment::try_from(request)?;
        let payment = self.store.create(new).await?;

        counter!("payments_created_total").increment(1);
        tracing::info!(payment_id = %payment.id, "Payment saved");

        dispatch_new_payment(self.notifier.clone(), payment.clone());

        Ok(payment)
    }

    /// Fetches a payment. Identifiers that are not UUIDs cannot exist and
    /// are reported as not found.
    pub async fn get_payment(&self, id: &str) -> Result<Payment, ServiceError> {
        let id = parse_id(id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Payment"))
    }

    /// Sets the status of a payment. Any valid status may follow any other.
    ///
    /// The status is checked before the identifier, so an invalid status is
    /// rejected even for payments that do not exist.
    pub async fn update_status(
        &self,
        id: &str,
        status: Option<&str>,
    ) -> Result<Payment, ServiceError> {
        let raw = status.unwrap_or_default();
        let status: PaymentStatus = raw
            .parse()
            .map_err(|_| ServiceError::InvalidStatus(raw.to_string()))?;

        let id = parse_id(id)?;
        let payment = self
            .store
            .update_status(id, status)
            .await?
            .ok_or(ServiceError::NotFound("Payment"))?;

        counter!("payment_status_updates_total", "status" => status.as_str()).increment(1);
        tracing::info!(payment_id = %payment.id, status = %status, "Payment status updated");

        Ok(payment)
    }

    pub async fn list(
        &self,
        filter: &PaymentFilter,
        page: PageRequest,
    ) -> Result<PaymentPage, ServiceError> {
        Ok(list_payments(self.store.as_ref(), filter, page).await?)
    }
}

fn parse_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id).map_err(|_| ServiceError::NotFound("Payment"))
}
