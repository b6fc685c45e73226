//! Input validation for tool arguments.
//!
//! Each tool's parameter struct implements [`Validate`]. Checks are pure and
//! collect every offending field instead of stopping at the first one, so the
//! calling agent can fix its input in a single retry.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$").unwrap()
});

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Wire name of the offending field (e.g. `startAt`).
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collection of validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Names of the fields that failed, in the order they were checked.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Ok if nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed")?;
        for error in &self.errors {
            write!(f, "\n- {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Field-level constraints of a tool's parameters.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

// ============================================================================
// Validation functions
// ============================================================================

/// Require a non-empty string.
pub fn validate_required(value: &str, field: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::new(field, "is required"));
    }
}

/// Check a string's length in characters against inclusive bounds.
pub fn validate_length(
    value: &str,
    field: &str,
    min: usize,
    max: usize,
    errors: &mut ValidationErrors,
) {
    let len = value.chars().count();
    if len < min {
        let message = if min == 1 {
            "must not be empty".to_string()
        } else {
            format!("must be at least {} characters (got {})", min, len)
        };
        errors.add(ValidationError::new(field, message));
    } else if len > max {
        errors.add(ValidationError::new(
            field,
            format!("must be at most {} characters (got {})", max, len),
        ));
    }
}

/// Same as [`validate_length`] for optional fields; absent values pass.
pub fn validate_optional_length(
    value: Option<&str>,
    field: &str,
    min: usize,
    max: usize,
    errors: &mut ValidationErrors,
) {
    if let Some(value) = value {
        validate_length(value, field, min, max, errors);
    }
}

/// Check an integer against inclusive bounds.
pub fn validate_range(value: i64, field: &str, min: i64, max: i64, errors: &mut ValidationErrors) {
    if value < min || value > max {
        errors.add(ValidationError::new(
            field,
            format!("must be between {} and {} (got {})", min, max, value),
        ));
    }
}

/// Check a float coordinate against inclusive bounds.
pub fn validate_coordinate(
    value: f64,
    field: &str,
    limit: f64,
    errors: &mut ValidationErrors,
) {
    if !value.is_finite() || value < -limit || value > limit {
        errors.add(ValidationError::new(
            field,
            format!("must be between -{} and {}", limit, limit),
        ));
    }
}

/// Reject negative integers (pagination offsets).
pub fn validate_non_negative(value: i64, field: &str, errors: &mut ValidationErrors) {
    if value < 0 {
        errors.add(ValidationError::new(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
}

/// Require a syntactically valid email address.
pub fn validate_email(value: &str, field: &str, errors: &mut ValidationErrors) {
    if !is_valid_email(value) {
        errors.add(ValidationError::new(
            field,
            format!("'{}' is not a valid email address", value),
        ));
    }
}

/// Require an absolute http(s) URL.
pub fn validate_url(value: &str, field: &str, errors: &mut ValidationErrors) {
    if !is_valid_url(value) {
        errors.add(ValidationError::new(
            field,
            format!("'{}' is not a valid URL", value),
        ));
    }
}

pub fn is_valid_email(value: &str) -> bool {
    !value.contains("..") && EMAIL_REGEX.is_match(value)
}

pub fn is_valid_url(value: &str) -> bool {
    match reqwest::Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_length_bounds() {
        let mut errors = ValidationErrors::new();
        validate_length("ab", "title", 3, 100, &mut errors);
        validate_length("abc", "title", 3, 100, &mut errors);
        validate_length(&"x".repeat(101), "title", 3, 100, &mut errors);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.fields(), vec!["title", "title"]);
    }

    #[test]
    fn test_validate_length_counts_characters() {
        let mut errors = ValidationErrors::new();
        validate_length("été", "title", 3, 3, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_range() {
        let mut errors = ValidationErrors::new();
        validate_range(1, "limit", 1, 100, &mut errors);
        validate_range(100, "limit", 1, 100, &mut errors);
        assert!(errors.is_empty());
        validate_range(0, "limit", 1, 100, &mut errors);
        validate_range(101, "limit", 1, 100, &mut errors);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("john.doe+events@mail.example.org"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email("ada..b@example.com"));
        assert!(!is_valid_email("ada @example.com"));
    }

    #[test]
    fn test_url_format() {
        assert!(is_valid_url("https://cdn.example.com/cover.jpg"));
        assert!(is_valid_url("http://localhost:3000/img.png"));
        assert!(!is_valid_url("cover.jpg"));
        assert!(!is_valid_url("ftp://example.com/file"));
        assert!(!is_valid_url("javascript:alert(1)"));
    }

    #[test]
    fn test_errors_display_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new("title", "must be at least 3 characters (got 2)"));
        errors.add(ValidationError::new("email", "'x' is not a valid email address"));

        let msg = errors.to_string();
        assert!(msg.starts_with("Validation failed"));
        assert!(msg.contains("- title: must be at least 3 characters"));
        assert!(msg.contains("- email: 'x' is not a valid email address"));
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new("id", "is required"));
        assert!(errors.into_result().is_err());
    }
}
