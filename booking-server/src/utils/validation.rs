//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on reasonable UX limits for names, emails
//! and notes; the document store has no built-in length enforcement.

use shared::error::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: room, chair label, staff name, venue name, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Customer names
pub const MAX_CUSTOMER_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Short identifiers: phone, payment reference, chair ids, etc.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// PINs (before hashing)
pub const MAX_PIN_LEN: usize = 32;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Minimal email shape check: `local@domain` with a dot in the domain.
///
/// Deliverability is the mail transport's problem, not ours.
pub fn validate_email(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    let Some((local, domain)) = value.split_once('@') else {
        return Err(AppError::validation(format!("{field} is not a valid email")));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::validation(format!("{field} is not a valid email")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Sala 1", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(300), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "phone", MAX_SHORT_TEXT_LEN).is_ok());
        assert!(
            validate_optional_text(&Some("612345678".into()), "phone", MAX_SHORT_TEXT_LEN).is_ok()
        );
        assert!(
            validate_optional_text(&Some("9".repeat(200)), "phone", MAX_SHORT_TEXT_LEN).is_err()
        );
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ana@example.com", "customer_email").is_ok());
        assert!(validate_email("ana@localhost", "customer_email").is_err());
        assert!(validate_email("not-an-email", "customer_email").is_err());
        assert!(validate_email("@example.com", "customer_email").is_err());
        assert!(validate_email("", "customer_email").is_err());
    }
}
