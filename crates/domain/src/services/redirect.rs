//! Active redirect management.
//!
//! At most one redirect record is active. Setting a new URL retires the
//! current one instead of overwriting it, so past URLs stay on record.

use std::sync::Arc;

use crate::error::ServiceError;
use crate::models::{NewRedirectConfig, RedirectConfig, UpdateRedirectRequest};

use super::singleton::get_or_create_default;
use super::store::RedirectStore;

/// Message returned when an update carries no URL.
pub const REDIRECT_URL_REQUIRED: &str = "Redirect URL is required";

#[derive(Clone)]
pub struct RedirectService {
    store: Arc<dyn RedirectStore>,
    defaults: NewRedirectConfig,
}

impl RedirectService {
    pub fn new(store: Arc<dyn RedirectStore>, defaults: NewRedirectConfig) -> Self {
        Self { store, defaults }
    }

    /// Returns the active redirect, creating the default one if none is active.
    pub async fn get_active(&self) -> Result<RedirectConfig, ServiceError> {
        let active = get_or_create_default(self.store.as_ref(), self.defaults.clone()).await?;
        Ok(active)
    }

    /// Deactivates every existing record and inserts a new active one.
    pub async fn set_active(
        &self,
        request: UpdateRedirectRequest,
    ) -> Result<RedirectConfig, ServiceError> {
        let redirect_url = match request.redirect_url {
            Some(url) if !url.is_empty() => url,
            _ => return Err(ServiceError::Validation(REDIRECT_URL_REQUIRED.to_string())),
        };

        let created = self
            .store
            .replace_active(NewRedirectConfig {
                redirect_url,
                description: request.description,
            })
            .await?;

        tracing::info!(
            redirect_id = %created.id,
            redirect_url = %created.redirect_url,
            "Active redirect URL replaced"
        );

        Ok(created)
    }

    /// Every redirect record, newest first. Does not create the default.
    pub async fn history(&self) -> Result<Vec<RedirectConfig>, ServiceError> {
        Ok(self.store.find_all().await?)
    }
}
