//! Custom validation functions for logger configuration.

use validator::ValidationError;

/// A prefix is glued in front of every message, so it must stay on one line.
pub fn validate_prefix(prefix: &str) -> Result<(), ValidationError> {
    if prefix.chars().any(char::is_control) {
        let mut error = ValidationError::new("single_line_prefix");
        error.message = Some("prefix must not contain control characters".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_prefixes() {
        assert!(validate_prefix("").is_ok());
        assert!(validate_prefix("[sync]").is_ok());
    }

    #[test]
    fn rejects_multiline_prefixes() {
        let err = validate_prefix("[a]\n[b]").unwrap_err();
        assert_eq!(err.code, "single_line_prefix");
    }
}
