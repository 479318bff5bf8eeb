//! Company profile domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::non_empty;
use shared::string_or_scalar;
use uuid::Uuid;

use super::MergePatch;

/// Company name used when no profile exists yet.
pub const DEFAULT_COMPANY_NAME: &str = "Empire Digital LLC";

/// The operator's company profile shown on the payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub id: Uuid,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Field values for a profile that is about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompanyProfile {
    pub company_name: String,
    pub logo: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Default for NewCompanyProfile {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            logo: None,
            email: None,
            phone: None,
        }
    }
}

/// Partial update body for the company profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    #[serde(default, deserialize_with = "string_or_scalar::deserialize_opt")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_scalar::deserialize_opt")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_scalar::deserialize_opt")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "string_or_scalar::deserialize_opt")]
    pub logo: Option<String>,
}

fn merge_field(target: &mut Option<String>, value: Option<&str>) -> bool {
    match non_empty(value) {
        Some(v) if target.as_deref() != Some(v) => {
            *target = Some(v.to_string());
            true
        }
        _ => false,
    }
}

impl MergePatch for CompanyProfile {
    type Patch = CompanyPatch;

    fn merge_patch(&mut self, patch: &CompanyPatch) -> bool {
        let mut changed = false;
        if let Some(name) = non_empty(patch.company_name.as_deref()) {
            if name != self.company_name {
                self.company_name = name.to_string();
                changed = true;
            }
        }
        changed |= merge_field(&mut self.email, patch.email.as_deref());
        changed |= merge_field(&mut self.phone, patch.phone.as_deref());
        changed |= merge_field(&mut self.logo, patch.logo.as_deref());
        changed
    }
}
