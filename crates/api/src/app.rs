use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use domain::services::{
    CompanyService, CompanyStore, PaymentNotifier, PaymentService, PaymentStore, RedirectService,
    RedirectStore,
};
use persistence::memory::InMemoryStore;
use persistence::repositories::{CompanyRepository, PaymentRepository, RedirectConfigRepository};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::error::{error_detail, panic_response, route_not_found};
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{company, health, payments, redirect};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub companies: CompanyService,
    pub redirects: RedirectService,
    pub payments: PaymentService,
}

/// The record stores backing the application.
#[derive(Clone)]
pub struct Stores {
    pub companies: Arc<dyn CompanyStore>,
    pub redirects: Arc<dyn RedirectStore>,
    pub payments: Arc<dyn PaymentStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            companies: Arc::new(CompanyRepository::new(pool.clone())),
            redirects: Arc::new(RedirectConfigRepository::new(pool.clone())),
            payments: Arc::new(PaymentRepository::new(pool)),
        }
    }

    /// All three stores share one in-memory store.
    pub fn in_memory() -> Self {
        Self::from_memory(Arc::new(InMemoryStore::new()))
    }

    pub fn from_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            companies: store.clone(),
            redirects: store.clone(),
            payments: store,
        }
    }
}

pub fn create_app(config: Config, stores: Stores, notifier: Arc<dyn PaymentNotifier>) -> Router {
    let config = Arc::new(config);
    let expose_error_detail = !config.server.is_production();

    let state = AppState {
        config: config.clone(),
        companies: CompanyService::new(stores.companies, config.defaults.company_profile()),
        redirects: RedirectService::new(stores.redirects, config.defaults.redirect()),
        payments: PaymentService::new(stores.payments, notifier),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route(
            "/company",
            get(company::get_company).put(company::update_company),
        )
        .route(
            "/redirect-url",
            get(redirect::get_redirect_url).put(redirect::update_redirect_url),
        )
        .route("/redirect-url/history", get(redirect::get_redirect_history))
        .route("/save-payment", post(payments::save_payment))
        .route("/payments", get(payments::list_payments))
        .route("/payments/:id", get(payments::get_payment))
        .route(
            "/payments/:id/status",
            patch(payments::update_payment_status),
        )
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics_handler))
        .fallback(route_not_found)
        // Global middleware (order matters: bottom layers run first)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            expose_error_detail,
            error_detail,
        ))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
