//! In-memory record store.
//!
//! Implements every store trait with the same semantics as the PostgreSQL
//! repositories. Each operation holds the collection lock for its whole
//! duration, so compound operations such as replacing the active redirect
//! are atomic. Used for tests and for running without a database.

use async_trait::async_trait;
use chrono::Utc;
use domain::models::{
    CompanyProfile, NewCompanyProfile, NewPayment, NewRedirectConfig, Payment, PaymentFilter,
    PaymentStatus, RedirectConfig,
};
use domain::services::{PaymentStore, RedirectStore, SingletonStore, UpdateById};
use domain::StoreError;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    companies: RwLock<Vec<CompanyProfile>>,
    redirects: RwLock<Vec<RedirectConfig>>,
    // Insertion order; ties on created_at are broken by it.
    payments: RwLock<Vec<Payment>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of company profile records held.
    pub async fn company_count(&self) -> usize {
        self.companies.read().await.len()
    }
}

#[async_trait]
impl SingletonStore<CompanyProfile, NewCompanyProfile> for InMemoryStore {
    async fn find_current(&self) -> Result<Option<CompanyProfile>, StoreError> {
        let companies = self.companies.read().await;
        Ok(companies.iter().min_by_key(|c| c.created_at).cloned())
    }

    async fn insert_default(
        &self,
        defaults: NewCompanyProfile,
    ) -> Result<CompanyProfile, StoreError> {
        let mut companies = self.companies.write().await;
        if let Some(existing) = companies.iter().min_by_key(|c| c.created_at) {
            return Ok(existing.clone());
        }
        let company = CompanyProfile {
            id: Uuid::new_v4(),
            company_name: defaults.company_name,
            logo: defaults.logo,
            email: defaults.email,
            phone: defaults.phone,
            created_at: Utc::now(),
        };
        companies.push(company.clone());
        Ok(company)
    }
}

#[async_trait]
impl UpdateById<CompanyProfile> for InMemoryStore {
    async fn update_by_id(
        &self,
        record: &CompanyProfile,
    ) -> Result<Option<CompanyProfile>, StoreError> {
        let mut companies = self.companies.write().await;
        Ok(companies.iter_mut().find(|c| c.id == record.id).map(|stored| {
            stored.company_name = record.company_name.clone();
            stored.logo = record.logo.clone();
            stored.email = record.email.clone();
            stored.phone = record.phone.clone();
            stored.clone()
        }))
    }
}

fn new_active_redirect(new: NewRedirectConfig) -> RedirectConfig {
    RedirectConfig {
        id: Uuid::new_v4(),
        redirect_url: new.redirect_url,
        description: new.description,
        is_active: true,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl SingletonStore<RedirectConfig, NewRedirectConfig> for InMemoryStore {
    async fn find_current(&self) -> Result<Option<RedirectConfig>, StoreError> {
        let redirects = self.redirects.read().await;
        Ok(redirects.iter().rev().find(|r| r.is_active).cloned())
    }

    async fn insert_default(
        &self,
        defaults: NewRedirectConfig,
    ) -> Result<RedirectConfig, StoreError> {
        let mut redirects = self.redirects.write().await;
        if let Some(active) = redirects.iter().rev().find(|r| r.is_active) {
            return Ok(active.clone());
        }
        let redirect = new_active_redirect(defaults);
        redirects.push(redirect.clone());
        Ok(redirect)
    }
}

#[async_trait]
impl RedirectStore for InMemoryStore {
    async fn replace_active(&self, new: NewRedirectConfig) -> Result<RedirectConfig, StoreError> {
        let mut redirects = self.redirects.write().await;
        for redirect in redirects.iter_mut() {
            redirect.is_active = false;
        }
        let redirect = new_active_redirect(new);
        redirects.push(redirect.clone());
        Ok(redirect)
    }

    async fn find_all(&self) -> Result<Vec<RedirectConfig>, StoreError> {
        let redirects = self.redirects.read().await;
        let mut all: Vec<RedirectConfig> = redirects.iter().rev().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}

#[async_trait]
impl PaymentStore for InMemoryStore {
    async fn create(&self, new: NewPayment) -> Result<Payment, StoreError> {
        for (field, value) in [
            ("email", &new.email),
            ("phone", &new.phone),
            ("cardNumber", &new.card_number),
        ] {
            if value.is_empty() {
                return Err(StoreError::Validation(format!("{} is required", field)));
            }
        }

        let payment = Payment {
            id: Uuid::new_v4(),
            email: new.email,
            phone: new.phone,
            card_number: new.card_number,
            cvc: new.cvc,
            expiry: new.expiry,
            status: None,
            created_at: Utc::now(),
        };
        self.payments.write().await.push(payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, StoreError> {
        let payments = self.payments.read().await;
        Ok(payments.iter().find(|p| p.id == id).cloned())
    }

    async fn find(
        &self,
        filter: &PaymentFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Payment>, StoreError> {
        let payments = self.payments.read().await;
        // Newest insertion first, then a stable sort so equal timestamps
        // keep that order.
        let mut matching: Vec<&Payment> =
            payments.iter().rev().filter(|p| filter.matches(p)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &PaymentFilter) -> Result<i64, StoreError> {
        let payments = self.payments.read().await;
        Ok(payments.iter().filter(|p| filter.matches(p)).count() as i64)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, StoreError> {
        let mut payments = self.payments.write().await;
        Ok(payments.iter_mut().find(|p| p.id == id).map(|payment| {
            payment.status = Some(status);
            payment.clone()
        }))
    }
}
