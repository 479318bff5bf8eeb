//! Common test utilities for integration tests.
//!
//! The application is built over the in-memory store with a mock notifier,
//! so no external database or mail server is needed.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use domain::models::{NewPayment, Payment, PaymentFilter, PaymentStatus};
use domain::services::{MockPaymentNotifier, PaymentStore};
use domain::StoreError;
use payment_intake_api::{
    app::{create_app, Stores},
    config::Config,
};
use persistence::memory::InMemoryStore;
use std::sync::Arc;
use uuid::Uuid;

/// Test configuration: development mode, in-memory backend.
pub fn test_config() -> Config {
    Config::load_for_test(&[]).expect("Failed to load test config")
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub notifier: MockPaymentNotifier,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with(test_config(), MockPaymentNotifier::new())
}

pub fn create_test_app_with(config: Config, notifier: MockPaymentNotifier) -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let router = create_app(
        config,
        Stores::from_memory(store.clone()),
        Arc::new(notifier.clone()),
    );
    TestApp {
        router,
        store,
        notifier,
    }
}

/// App whose payment store fails every operation.
pub fn create_app_with_failing_payments(config: Config) -> Router {
    let mut stores = Stores::in_memory();
    stores.payments = Arc::new(FailingPaymentStore);
    create_app(config, stores, Arc::new(MockPaymentNotifier::new()))
}

pub struct FailingPaymentStore;

fn unavailable() -> StoreError {
    StoreError::Database("connection refused".to_string())
}

#[async_trait]
impl PaymentStore for FailingPaymentStore {
    async fn create(&self, _new: NewPayment) -> Result<Payment, StoreError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Payment>, StoreError> {
        Err(unavailable())
    }

    async fn find(
        &self,
        _filter: &PaymentFilter,
        _skip: i64,
        _limit: i64,
    ) -> Result<Vec<Payment>, StoreError> {
        Err(unavailable())
    }

    async fn count(&self, _filter: &PaymentFilter) -> Result<i64, StoreError> {
        Err(unavailable())
    }

    async fn update_status(
        &self,
        _id: Uuid,
        _status: PaymentStatus,
    ) -> Result<Option<Payment>, StoreError> {
        Err(unavailable())
    }
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Request with a literal body, for payloads `serde_json::Value` cannot
/// express (malformed JSON).
pub fn raw_json_request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    empty_request(Method::GET, uri)
}

pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}

pub fn payment_body() -> serde_json::Value {
    serde_json::json!({
        "email": "a@b.com",
        "phone": "555",
        "cardNumber": "4111111111111111",
        "cvc": "123",
        "expiry": "12/30"
    })
}

/// Saves a payment through the API and returns its id.
pub async fn save_payment(app: &Router, body: serde_json::Value) -> String {
    use tower::ServiceExt;

    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/save-payment", body))
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = parse_response_body(response).await;
    body["paymentId"].as_str().unwrap().to_string()
}

/// Yields until the notifier saw `expected` attempts or gives up.
pub async fn wait_for_notifications(notifier: &MockPaymentNotifier, expected: usize) {
    for _ in 0..100 {
        if notifier.attempts() >= expected {
            return;
        }
        tokio::task::yield_now().await;
    }
}
