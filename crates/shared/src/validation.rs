//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref SLUG_RE: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
    static ref HEX_COLOR_RE: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

/// Maximum number of example sentences a single entry may carry.
const MAX_EXAMPLES: usize = 10;

/// Maximum length of one example sentence.
const MAX_EXAMPLE_LEN: usize = 500;

/// Validates a URL slug: lowercase alphanumerics separated by single hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if SLUG_RE.is_match(slug) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug_format");
        err.message = Some("Slug must be lowercase letters, digits, and hyphens".into());
        Err(err)
    }
}

/// Validates a CSS hex color like `#4f46e5`.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_RE.is_match(color) {
        Ok(())
    } else {
        let mut err = ValidationError::new("color_format");
        err.message = Some("Color must be a 6-digit hex value like #4f46e5".into());
        Err(err)
    }
}

/// Validates password strength: at least 8 characters with both a letter and
/// a digit.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= 8;
    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_letter && has_digit {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_strength");
        err.message =
            Some("Password must be at least 8 characters and contain a letter and a digit".into());
        Err(err)
    }
}

/// Validates a list of example sentences (count and per-sentence length).
pub fn validate_example_sentences(sentences: &[String]) -> Result<(), ValidationError> {
    if sentences.len() > MAX_EXAMPLES {
        let mut err = ValidationError::new("examples_count");
        err.message = Some(format!("At most {} example sentences allowed", MAX_EXAMPLES).into());
        return Err(err);
    }

    if sentences
        .iter()
        .any(|s| s.trim().is_empty() || s.chars().count() > MAX_EXAMPLE_LEN)
    {
        let mut err = ValidationError::new("example_length");
        err.message = Some(
            format!(
                "Example sentences must be non-empty and at most {} characters",
                MAX_EXAMPLE_LEN
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}

/// Validates that a quiz question awards a sensible number of points.
pub fn validate_points(points: i32) -> Result<(), ValidationError> {
    if (1..=100).contains(&points) {
        Ok(())
    } else {
        let mut err = ValidationError::new("points_range");
        err.message = Some("Points must be between 1 and 100".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("present-simple").is_ok());
        assert!(validate_slug("a1").is_ok());
        assert!(validate_slug("verbs").is_ok());

        assert!(validate_slug("Present-Simple").is_err());
        assert!(validate_slug("double--hyphen").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("with space").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#4f46e5").is_ok());
        assert!(validate_hex_color("#ABCDEF").is_ok());

        assert!(validate_hex_color("4f46e5").is_err());
        assert!(validate_hex_color("#fff").is_err());
        assert!(validate_hex_color("#12345g").is_err());
    }

    #[test]
    fn test_validate_password_strength() {
        assert!(validate_password_strength("abcdef12").is_ok());
        assert!(validate_password_strength("longer-password-1").is_ok());

        assert!(validate_password_strength("short1").is_err());
        assert!(validate_password_strength("lettersonly").is_err());
        assert!(validate_password_strength("12345678").is_err());
    }

    #[test]
    fn test_validate_password_strength_error_message() {
        let err = validate_password_strength("nope").unwrap_err();
        assert!(err.message.unwrap().to_string().contains("8 characters"));
    }

    #[test]
    fn test_validate_example_sentences() {
        assert!(validate_example_sentences(&[]).is_ok());
        assert!(validate_example_sentences(&["I eat breakfast.".to_string()]).is_ok());

        let too_many: Vec<String> = (0..11).map(|i| format!("Sentence {}.", i)).collect();
        assert!(validate_example_sentences(&too_many).is_err());

        assert!(validate_example_sentences(&["   ".to_string()]).is_err());
        assert!(validate_example_sentences(&["x".repeat(501)]).is_err());
    }

    #[test]
    fn test_validate_points() {
        assert!(validate_points(1).is_ok());
        assert!(validate_points(100).is_ok());
        assert!(validate_points(0).is_err());
        assert!(validate_points(101).is_err());
        assert!(validate_points(-5).is_err());
    }
}
