//! Redirect configuration domain model.
//!
//! Redirect records form an append-only history; the record flagged
//! `is_active` is the URL clients are sent to after a submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::string_or_scalar;
use uuid::Uuid;

/// Redirect URL used when no active record exists yet.
pub const DEFAULT_REDIRECT_URL: &str = "https://example.com/success";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectConfig {
    pub id: Uuid,
    pub redirect_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Field values for a redirect record that is about to be inserted as the
/// active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRedirectConfig {
    pub redirect_url: String,
    pub description: Option<String>,
}

impl Default for NewRedirectConfig {
    fn default() -> Self {
        Self {
            redirect_url: DEFAULT_REDIRECT_URL.to_string(),
            description: Some("Default success redirect URL".to_string()),
        }
    }
}

/// Body of the redirect update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRedirectRequest {
    #[serde(default, deserialize_with = "string_or_scalar::deserialize_opt")]
    pub redirect_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_scalar::deserialize_opt")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_new_redirect() {
        let new = NewRedirectConfig::default();
        assert_eq!(new.redirect_url, DEFAULT_REDIRECT_URL);
        assert_eq!(new.description.as_deref(), Some("Default success redirect URL"));
    }

    #[test]
    fn test_serialization() {
        let config = RedirectConfig {
            id: Uuid::new_v4(),
            redirect_url: "https://shop.example.com/thanks".to_string(),
            description: None,
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["redirectUrl"], "https://shop.example.com/thanks");
        assert_eq!(json["isActive"], true);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_update_request_accepts_empty_object() {
        let req: UpdateRedirectRequest = serde_json::from_str("{}").unwrap();
        assert!(req.redirect_url.is_none());
        assert!(req.description.is_none());
    }
}
