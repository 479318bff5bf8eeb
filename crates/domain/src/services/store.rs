//! Record store traits.
//!
//! One trait per entity kind. The persistence crate provides a PostgreSQL
//! implementation and an in-memory implementation of each. Every insert
//! assigns a fresh UUID and creation timestamp; no operation is retried.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    CompanyProfile, NewCompanyProfile, NewPayment, NewRedirectConfig, Payment, PaymentFilter,
    PaymentStatus, RedirectConfig,
};

/// Storage for a resource with one canonical "current" record.
#[async_trait]
pub trait SingletonStore<R, D>: Send + Sync
where
    R: Send,
    D: Send,
{
    /// Returns the canonical record, if any exists.
    async fn find_current(&self) -> Result<Option<R>, StoreError>;

    /// Inserts a record built from `defaults` unless a canonical record
    /// already exists, and returns whichever record is canonical afterwards.
    async fn insert_default(&self, defaults: D) -> Result<R, StoreError>;
}

/// Replaces a stored record by its identifier.
#[async_trait]
pub trait UpdateById<R>: Send + Sync
where
    R: Send + Sync,
{
    /// Writes the mutable fields of `record`. Returns `None` when no record
    /// has that identifier.
    async fn update_by_id(&self, record: &R) -> Result<Option<R>, StoreError>;
}

/// Company profile storage. The oldest record is canonical.
pub trait CompanyStore:
    SingletonStore<CompanyProfile, NewCompanyProfile> + UpdateById<CompanyProfile>
{
}

impl<T> CompanyStore for T where
    T: SingletonStore<CompanyProfile, NewCompanyProfile> + UpdateById<CompanyProfile>
{
}

/// Redirect configuration storage. The active record is canonical.
#[async_trait]
pub trait RedirectStore: SingletonStore<RedirectConfig, NewRedirectConfig> {
    /// Marks every existing record inactive and inserts `new` as the single
    /// active record, as one operation.
    async fn replace_active(&self, new: NewRedirectConfig) -> Result<RedirectConfig, StoreError>;

    /// All records, newest first.
    async fn find_all(&self) -> Result<Vec<RedirectConfig>, StoreError>;
}

/// Payment storage.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn create(&self, new: NewPayment) -> Result<Payment, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, StoreError>;

    /// Payments matching `filter`, newest first, `limit` records after
    /// skipping `skip`.
    async fn find(
        &self,
        filter: &PaymentFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Payment>, StoreError>;

    async fn count(&self, filter: &PaymentFilter) -> Result<i64, StoreError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, StoreError>;
}
