//! Periodic connection pool metrics.

use std::time::Duration;

use sqlx::PgPool;
use tokio::task::JoinHandle;

/// How often pool gauges are refreshed.
pub const POOL_METRICS_INTERVAL: Duration = Duration::from_secs(10);

/// Records pool gauges every `every` until the runtime shuts down.
pub fn spawn_pool_metrics(pool: PgPool, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            persistence::metrics::record_pool_metrics(&pool);
        }
    })
}
