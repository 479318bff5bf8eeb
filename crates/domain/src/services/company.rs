//! Company profile access.

use std::sync::Arc;

use crate::error::ServiceError;
use crate::models::{CompanyPatch, CompanyProfile, NewCompanyProfile};

use super::singleton::{apply_partial_update, get_or_create_default};
use super::store::CompanyStore;

#[derive(Clone)]
pub struct CompanyService {
    store: Arc<dyn CompanyStore>,
    defaults: NewCompanyProfile,
}

impl CompanyService {
    pub fn new(store: Arc<dyn CompanyStore>, defaults: NewCompanyProfile) -> Self {
        Self { store, defaults }
    }

    /// Returns the company profile, creating the default one on first use.
    pub async fn get(&self) -> Result<CompanyProfile, ServiceError> {
        let profile = get_or_create_default(self.store.as_ref(), self.defaults.clone()).await?;
        Ok(profile)
    }

    /// Overwrites the fields carried by `patch`; empty or omitted fields keep
    /// their stored value.
    pub async fn update(&self, patch: &CompanyPatch) -> Result<CompanyProfile, ServiceError> {
        let profile = apply_partial_update::<CompanyProfile, _, _>(
            self.store.as_ref(),
            self.defaults.clone(),
            patch,
        )
        .await?;
        tracing::info!(company_id = %profile.id, "Company profile updated");
        Ok(profile)
    }
}
