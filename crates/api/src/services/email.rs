//! Email delivery for operator notifications.
//!
//! Supports two providers:
//! - `console`: Logs emails instead of sending them (development)
//! - `smtp`: Sends through an SMTP relay with lettre

use crate::config::EmailConfig;
use async_trait::async_trait;
use domain::models::Payment;
use domain::services::{NewPaymentMessage, NotificationError, PaymentNotifier};
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build email: {0}")]
    BuildFailed(String),

    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body_text: String,
    pub body_html: Option<String>,
}

/// Email service for operator notifications.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
    smtp: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
}

impl EmailService {
    /// Creates the service. The SMTP transport is built up front when the
    /// smtp provider is enabled; connections are opened per send.
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let smtp = if config.enabled && config.provider == "smtp" {
            Some(Arc::new(build_transport(&config)?))
        } else {
            None
        };

        Ok(Self {
            config: Arc::new(config),
            smtp,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Send an email message. Succeeds without sending when the service is
    /// disabled.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            debug!(
                to = %message.to,
                subject = %message.subject,
                "Email service disabled, skipping send"
            );
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(message).await,
            "smtp" => self.send_smtp(message).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(EmailError::NotConfigured)
            }
        }
    }

    /// Console provider - logs the email instead of sending it.
    async fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            from = %self.config.sender_email,
            from_name = %self.config.sender_name,
            "Email (console provider)"
        );
        debug!(body_text = %message.body_text, "Email body (plain text)");

        Ok(())
    }

    /// SMTP provider - sends through the configured relay.
    async fn send_smtp(&self, message: EmailMessage) -> Result<(), EmailError> {
        let transport = self.smtp.as_ref().ok_or(EmailError::NotConfigured)?;
        let email = self.build_message(&message)?;

        transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        info!(
            to = %message.to,
            subject = %message.subject,
            smtp_host = %self.config.smtp_host,
            "Email sent via SMTP"
        );
        Ok(())
    }

    fn build_message(&self, message: &EmailMessage) -> Result<Message, EmailError> {
        let from: Mailbox = format!("{} <{}>", self.config.sender_name, self.config.sender_email)
            .parse()
            .map_err(|e| EmailError::InvalidAddress(format!("from: {}", e)))?;
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| EmailError::InvalidAddress(format!("to '{}': {}", message.to, e)))?;

        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject);

        let built = match &message.body_html {
            Some(html) => builder.multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(message.body_text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html.clone()),
                    ),
            ),
            None => builder
                .header(ContentType::TEXT_PLAIN)
                .body(message.body_text.clone()),
        };

        built.map_err(|e| EmailError::BuildFailed(e.to_string()))
    }
}

fn build_transport(config: &EmailConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
    if config.smtp_host.is_empty() {
        return Err(EmailError::NotConfigured);
    }

    let builder = if config.smtp_use_tls {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
    }
    .map_err(|e| EmailError::SendFailed(format!("Failed to create SMTP transport: {}", e)))?;

    let mut builder = builder.port(config.smtp_port);
    if !config.smtp_username.is_empty() {
        builder = builder.credentials(Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        ));
    }

    Ok(builder.build())
}

/// Announces each new payment to the operator mailbox.
#[derive(Clone)]
pub struct EmailPaymentNotifier {
    email: EmailService,
    operator_email: String,
}

impl EmailPaymentNotifier {
    pub fn new(email: EmailService, operator_email: impl Into<String>) -> Self {
        Self {
            email,
            operator_email: operator_email.into(),
        }
    }
}

#[async_trait]
impl PaymentNotifier for EmailPaymentNotifier {
    async fn notify_new_payment(&self, payment: &Payment) -> Result<(), NotificationError> {
        if !self.email.is_enabled() || self.operator_email.is_empty() {
            return Err(NotificationError::NotConfigured);
        }

        let rendered = NewPaymentMessage::render(payment);
        let message = EmailMessage {
            to: self.operator_email.clone(),
            subject: rendered.subject,
            body_text: rendered.body_text,
            body_html: Some(rendered.body_html),
        };

        self.email.send(message).await.map_err(|e| match e {
            EmailError::NotConfigured => NotificationError::NotConfigured,
            EmailError::InvalidAddress(addr) => NotificationError::InvalidAddress(addr),
            other => NotificationError::SendFailed(other.to_string()),
        })
    }
}
