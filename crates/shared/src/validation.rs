//! Common validation utilities.

/// Normalizes an email address for storage: surrounding whitespace is
/// removed and the address is lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Returns the value only if it is present and not the empty string.
///
/// Partial updates treat `""` the same as an omitted field.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn test_normalize_email_already_normal() {
        assert_eq!(normalize_email("a@b.com"), "a@b.com");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("x")), Some("x"));
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_non_empty_keeps_whitespace() {
        assert_eq!(non_empty(Some(" ")), Some(" "));
    }
}
