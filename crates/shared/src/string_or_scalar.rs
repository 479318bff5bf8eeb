//! Lenient text fields for JSON request bodies.
//!
//! Clients send phone numbers, card numbers and CVCs both as strings and as
//! bare numbers. Fields using [`deserialize_opt`] accept any JSON scalar and
//! keep its text form. Objects and arrays are still rejected.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Str(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Uint(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Use with `#[serde(default, deserialize_with = "...")]` on an
/// `Option<String>` field. `null` reads as `None`.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "deserialize_opt")]
        value: Option<String>,
    }

    fn parse(json: &str) -> Result<Body, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_string_kept() {
        assert_eq!(parse(r#"{"value":"555"}"#).unwrap().value.as_deref(), Some("555"));
    }

    #[test]
    fn test_numbers_become_text() {
        assert_eq!(parse(r#"{"value":5551234}"#).unwrap().value.as_deref(), Some("5551234"));
        assert_eq!(
            parse(r#"{"value":4111111111111111}"#).unwrap().value.as_deref(),
            Some("4111111111111111")
        );
        assert_eq!(
            parse(r#"{"value":18446744073709551615}"#).unwrap().value.as_deref(),
            Some("18446744073709551615")
        );
        assert_eq!(parse(r#"{"value":-7}"#).unwrap().value.as_deref(), Some("-7"));
        assert_eq!(parse(r#"{"value":1.5}"#).unwrap().value.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_bool_becomes_text() {
        assert_eq!(parse(r#"{"value":true}"#).unwrap().value.as_deref(), Some("true"));
    }

    #[test]
    fn test_null_and_missing_are_none() {
        assert!(parse(r#"{"value":null}"#).unwrap().value.is_none());
        assert!(parse("{}").unwrap().value.is_none());
    }

    #[test]
    fn test_structured_values_rejected() {
        assert!(parse(r#"{"value":{"a":1}}"#).is_err());
        assert!(parse(r#"{"value":[1,2]}"#).is_err());
    }
}
