//! Redirect configuration database entity.

use chrono::{DateTime, Utc};
use domain::models::RedirectConfig;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the redirect_configs table.
#[derive(Debug, Clone, FromRow)]
pub struct RedirectConfigEntity {
    pub id: Uuid,
    pub redirect_url: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<RedirectConfigEntity> for RedirectConfig {
    fn from(entity: RedirectConfigEntity) -> Self {
        Self {
            id: entity.id,
            redirect_url: entity.redirect_url,
            description: entity.description,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}
