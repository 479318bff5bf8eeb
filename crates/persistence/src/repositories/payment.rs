//! Payment repository.

use async_trait::async_trait;
use domain::models::{NewPayment, Payment, PaymentFilter, PaymentStatus};
use domain::services::PaymentStore;
use domain::StoreError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PaymentEntity;
use crate::metrics::QueryTimer;
use crate::store_error;

const PAYMENT_COLUMNS: &str = "id, email, phone, card_number, cvc, expiry, status, created_at";

/// Repository for payment records.
#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// WHERE clause for a filter; the status, when present, is bound as `$1`.
fn where_clause(filter: &PaymentFilter) -> &'static str {
    if filter.status.is_some() {
        "WHERE status = $1"
    } else {
        ""
    }
}

#[async_trait]
impl PaymentStore for PaymentRepository {
    async fn create(&self, new: NewPayment) -> Result<Payment, StoreError> {
        let timer = QueryTimer::new("create_payment");
        let query = format!(
            r#"
            INSERT INTO payments (email, phone, card_number, cvc, expiry)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PAYMENT_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, PaymentEntity>(&query)
            .bind(&new.email)
            .bind(&new.phone)
            .bind(&new.card_number)
            .bind(&new.cvc)
            .bind(&new.expiry)
            .fetch_one(&self.pool)
            .await;
        timer.record();

        Ok(result.map_err(store_error)?.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, StoreError> {
        let timer = QueryTimer::new("find_payment_by_id");
        let query = format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1");
        let result = sqlx::query_as::<_, PaymentEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();

        Ok(result.map_err(store_error)?.map(Into::into))
    }

    async fn find(
        &self,
        filter: &PaymentFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Payment>, StoreError> {
        let timer = QueryTimer::new("list_payments");
        let param_offset = if filter.status.is_some() { 1 } else { 0 };
        let query = format!(
            r#"
            SELECT {PAYMENT_COLUMNS}
            FROM payments
            {}
            ORDER BY created_at DESC, id DESC
            LIMIT ${} OFFSET ${}
            "#,
            where_clause(filter),
            param_offset + 1,
            param_offset + 2
        );

        let mut builder = sqlx::query_as::<_, PaymentEntity>(&query);
        if let Some(status) = &filter.status {
            builder = builder.bind(status);
        }
        let result = builder.bind(limit).bind(skip).fetch_all(&self.pool).await;
        timer.record();

        Ok(result
            .map_err(store_error)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn count(&self, filter: &PaymentFilter) -> Result<i64, StoreError> {
        let timer = QueryTimer::new("count_payments");
        let query = format!("SELECT COUNT(*) FROM payments {}", where_clause(filter));

        let mut builder = sqlx::query_scalar::<_, i64>(&query);
        if let Some(status) = &filter.status {
            builder = builder.bind(status);
        }
        let result = builder.fetch_one(&self.pool).await;
        timer.record();

        result.map_err(store_error)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, StoreError> {
        let timer = QueryTimer::new("update_payment_status");
        let query = format!(
            "UPDATE payments SET status = $2 WHERE id = $1 RETURNING {PAYMENT_COLUMNS}"
        );
        let result = sqlx::query_as::<_, PaymentEntity>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await;
        timer.record();

        Ok(result.map_err(store_error)?.map(Into::into))
    }
}
