//! Company profile database entity.

use chrono::{DateTime, Utc};
use domain::models::CompanyProfile;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the company_profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct CompanyProfileEntity {
    pub id: Uuid,
    pub company_name: String,
    pub logo: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CompanyProfileEntity> for CompanyProfile {
    fn from(entity: CompanyProfileEntity) -> Self {
        Self {
            id: entity.id,
            company_name: entity.company_name,
            logo: entity.logo,
            email: entity.email,
            phone: entity.phone,
            created_at: entity.created_at,
        }
    }
}
