//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a display label (player name, team name) is not blank.
///
/// # Examples
///
/// ```ignore
/// validate_label("Red Lions") // Ok
/// validate_label("   ")       // Err - blank
/// ```
pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.trim().is_empty() {
        let mut err = ValidationError::new("label_blank");
        err.message = Some("Label must not be blank".into());
        return Err(err);
    }

    if label.chars().count() > 64 {
        let mut err = ValidationError::new("label_length");
        err.message = Some(
            format!(
                "Label must be at most 64 characters (got {})",
                label.chars().count()
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_label_valid() {
        assert!(validate_label("Red Lions").is_ok());
        assert!(validate_label("J").is_ok());
    }

    #[test]
    fn test_validate_label_invalid() {
        assert!(validate_label("").is_err());
        assert!(validate_label("   ").is_err());
        assert!(validate_label(&"x".repeat(65)).is_err());
    }
}
