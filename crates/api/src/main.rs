use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use payment_intake_api::app::{create_app, Stores};
use payment_intake_api::config::{Config, StorageBackend};
use payment_intake_api::jobs::{spawn_pool_metrics, POOL_METRICS_INTERVAL};
use payment_intake_api::middleware::{init_metrics, logging::init_logging};
use payment_intake_api::services::{EmailPaymentNotifier, EmailService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    init_logging(&config.logging);
    init_metrics()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.server.environment,
        backend = config.database.backend.as_str(),
        "Starting payment intake API"
    );

    let stores = match config.database.backend {
        StorageBackend::Postgres => {
            let pool = persistence::db::create_pool(&config.database.pool_config()).await?;
            info!("Connected to database");

            info!("Running database migrations...");
            persistence::db::run_migrations(&pool).await?;
            info!("Migrations completed");

            spawn_pool_metrics(pool.clone(), POOL_METRICS_INTERVAL);
            Stores::postgres(pool)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; records are lost on restart");
            Stores::in_memory()
        }
    };

    let email = EmailService::new(config.email.clone())?;
    if !email.is_enabled() || config.notification.operator_email.is_empty() {
        warn!("New-payment notifications are not configured");
    }
    let notifier = Arc::new(EmailPaymentNotifier::new(
        email,
        config.notification.operator_email.clone(),
    ));

    let addr = config.socket_addr()?;
    let app = create_app(config, stores, notifier);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
