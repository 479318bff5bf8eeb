//! Redirect configuration repository.

use async_trait::async_trait;
use domain::models::{NewRedirectConfig, RedirectConfig};
use domain::services::{RedirectStore, SingletonStore};
use domain::StoreError;
use sqlx::PgPool;

use crate::entities::RedirectConfigEntity;
use crate::metrics::QueryTimer;
use crate::store_error;

/// Advisory lock key serializing active-redirect switches.
const REDIRECT_SWITCH_LOCK: i64 = 0x7265_6469_7265_6374;

/// Repository for redirect configuration history.
#[derive(Clone)]
pub struct RedirectConfigRepository {
    pool: PgPool,
}

impl RedirectConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SingletonStore<RedirectConfig, NewRedirectConfig> for RedirectConfigRepository {
    async fn find_current(&self) -> Result<Option<RedirectConfig>, StoreError> {
        let timer = QueryTimer::new("find_active_redirect");
        let result = sqlx::query_as::<_, RedirectConfigEntity>(
            r#"
            SELECT id, redirect_url, description, is_active, created_at
            FROM redirect_configs
            WHERE is_active
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(result.map_err(store_error)?.map(Into::into))
    }

    async fn insert_default(
        &self,
        defaults: NewRedirectConfig,
    ) -> Result<RedirectConfig, StoreError> {
        let timer = QueryTimer::new("insert_default_redirect");
        // The partial unique index on is_active turns a second active row
        // into a conflict.
        let inserted = sqlx::query_as::<_, RedirectConfigEntity>(
            r#"
            INSERT INTO redirect_configs (redirect_url, description, is_active)
            VALUES ($1, $2, TRUE)
            ON CONFLICT DO NOTHING
            RETURNING id, redirect_url, description, is_active, created_at
            "#,
        )
        .bind(&defaults.redirect_url)
        .bind(&defaults.description)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        match inserted.map_err(store_error)? {
            Some(entity) => Ok(entity.into()),
            None => self.find_current().await?.ok_or_else(|| {
                StoreError::Database("active redirect missing after insert conflict".into())
            }),
        }
    }
}

#[async_trait]
impl RedirectStore for RedirectConfigRepository {
    async fn replace_active(&self, new: NewRedirectConfig) -> Result<RedirectConfig, StoreError> {
        let timer = QueryTimer::new("replace_active_redirect");
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(REDIRECT_SWITCH_LOCK)
            .execute(&mut *tx)
            .await
            .map_err(store_error)?;

        let deactivated = sqlx::query("UPDATE redirect_configs SET is_active = FALSE WHERE is_active")
            .execute(&mut *tx)
            .await
            .map_err(store_error)?
            .rows_affected();

        let entity = sqlx::query_as::<_, RedirectConfigEntity>(
            r#"
            INSERT INTO redirect_configs (redirect_url, description, is_active)
            VALUES ($1, $2, TRUE)
            RETURNING id, redirect_url, description, is_active, created_at
            "#,
        )
        .bind(&new.redirect_url)
        .bind(&new.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;
        timer.record();

        tracing::debug!(deactivated, "Deactivated previous redirect records");
        Ok(entity.into())
    }

    async fn find_all(&self) -> Result<Vec<RedirectConfig>, StoreError> {
        let timer = QueryTimer::new("list_redirects");
        let result = sqlx::query_as::<_, RedirectConfigEntity>(
            r#"
            SELECT id, redirect_url, description, is_active, created_at
            FROM redirect_configs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();

        Ok(result
            .map_err(store_error)?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
