//! Get-or-create and partial update for singleton resources.
//!
//! Both operations read through a [`SingletonStore`] on every call; nothing
//! is cached in process.

use crate::error::StoreError;
use crate::models::MergePatch;

use super::store::{SingletonStore, UpdateById};

/// Returns the canonical record, creating it from `defaults` if none exists.
pub async fn get_or_create_default<R, D, S>(store: &S, defaults: D) -> Result<R, StoreError>
where
    R: Send,
    D: Send,
    S: SingletonStore<R, D> + ?Sized,
{
    if let Some(record) = store.find_current().await? {
        return Ok(record);
    }
    tracing::info!("No singleton record found, creating default");
    store.insert_default(defaults).await
}

/// Resolves (or creates) the canonical record and overwrites the fields the
/// patch carries with a non-empty value. Omitted or empty fields keep their
/// stored value.
pub async fn apply_partial_update<R, D, S>(
    store: &S,
    defaults: D,
    patch: &R::Patch,
) -> Result<R, StoreError>
where
    R: MergePatch + Send + Sync,
    D: Send,
    S: SingletonStore<R, D> + UpdateById<R> + ?Sized,
{
    let mut record = get_or_create_default(store, defaults).await?;
    record.merge_patch(patch);
    store
        .update_by_id(&record)
        .await?
        .ok_or_else(|| StoreError::Database("singleton record vanished during update".into()))
}
