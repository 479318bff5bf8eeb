//! Company profile repository.

use async_trait::async_trait;
use domain::models::{CompanyProfile, NewCompanyProfile};
use domain::services::{SingletonStore, UpdateById};
use domain::StoreError;
use sqlx::PgPool;

use crate::entities::CompanyProfileEntity;
use crate::metrics::QueryTimer;
use crate::store_error;

/// Repository for the company profile singleton.
#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SingletonStore<CompanyProfile, NewCompanyProfile> for CompanyRepository {
    /// The oldest profile is canonical.
    async fn find_current(&self) -> Result<Option<CompanyProfile>, StoreError> {
        let timer = QueryTimer::new("find_current_company");
        let result = sqlx::query_as::<_, CompanyProfileEntity>(
            r#"
            SELECT id, company_name, logo, email, phone, created_at
            FROM company_profiles
            ORDER BY created_at ASC, id ASC
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
        defaults: NewCompanyProfile,
    ) -> Result<CompanyProfile, StoreError> {
        let timer = QueryTimer::new("insert_default_company");
        let inserted = sqlx::query_as::<_, CompanyProfileEntity>(
            r#"
            INSERT INTO company_profiles (company_name, logo, email, phone)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            RETURNING id, company_name, logo, email, phone, created_at
            "#,
        )
        .bind(&defaults.company_name)
        .bind(&defaults.logo)
        .bind(&defaults.email)
        .bind(&defaults.phone)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        match inserted.map_err(store_error)? {
            Some(entity) => Ok(entity.into()),
            // Lost a race with a concurrent first read.
            None => self.find_current().await?.ok_or_else(|| {
                StoreError::Database("company profile missing after insert conflict".into())
            }),
        }
    }
}

#[async_trait]
impl UpdateById<CompanyProfile> for CompanyRepository {
    async fn update_by_id(
        &self,
        record: &CompanyProfile,
    ) -> Result<Option<CompanyProfile>, StoreError> {
        let timer = QueryTimer::new("update_company");
        let result = sqlx::query_as::<_, CompanyProfileEntity>(
            r#"
            UPDATE company_profiles
            SET company_name = $2, logo = $3, email = $4, phone = $5
            WHERE id = $1
            RETURNING id, company_name, logo, email, phone, created_at
            "#,
        )
        .bind(record.id)
        .bind(&record.company_name)
        .bind(&record.logo)
        .bind(&record.email)
        .bind(&record.phone)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(result.map_err(store_error)?.map(Into::into))
    }
}
