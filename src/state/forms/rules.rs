//! Declarative per-field validation rules
//!
//! Each field is bound to exactly one [`FieldRule`]; checks run in a fixed
//! order (required, length, pattern, allowed values) and stop at the first
//! failure.

use regex::Regex;
use std::collections::BTreeMap;
use thiserror::Error;

/// Per-field messages from a validation pass, keyed by wire field name.
/// Empty map means the validated scope is clean.
pub type ErrorMap = BTreeMap<&'static str, String>;

/// A single failed check, rendered as the inline message shown next to the
/// field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,
    #[error("Must be at least {min} characters")]
    TooShort { min: usize },
    #[error("Must be at most {max} characters")]
    TooLong { max: usize },
    #[error("{0}")]
    Pattern(&'static str),
    #[error("Must be one of the listed options")]
    NotAllowed,
}

impl ValidationError {
    /// Whether this is a length violation (either bound)
    pub fn is_length(&self) -> bool {
        matches!(self, Self::TooShort { .. } | Self::TooLong { .. })
    }
}

/// A pattern check: regex source plus the message shown on mismatch
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub source: &'static str,
    pub message: &'static str,
}

/// Validation specification for one field
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRule {
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub pattern: Option<PatternRule>,
    pub allowed: Option<&'static [&'static str]>,
}

/// Validate a single value against its rule.
///
/// The value is trimmed before any check. An empty optional field passes
/// without running the remaining checks. Returns the first failure only.
pub fn validate_field(value: &str, rule: &FieldRule) -> Option<ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        if rule.required {
            return Some(ValidationError::Required);
        }
        return None;
    }

    let len = trimmed.chars().count();
    if let Some(min) = rule.min_len {
        if len < min {
            return Some(ValidationError::TooShort { min });
        }
    }
    if let Some(max) = rule.max_len {
        if len > max {
            return Some(ValidationError::TooLong { max });
        }
    }

    if let Some(pattern) = &rule.pattern {
        match Regex::new(pattern.source) {
            Ok(re) => {
                if !re.is_match(trimmed) {
                    return Some(ValidationError::Pattern(pattern.message));
                }
            }
            Err(err) => {
                tracing::debug!(pattern = pattern.source, "skipping unparsable field pattern: {err}");
            }
        }
    }

    if let Some(allowed) = rule.allowed {
        if !allowed.contains(&trimmed) {
            return Some(ValidationError::NotAllowed);
        }
    }

    None
}

/// Email address shape check used by the login form
pub const EMAIL_PATTERN: PatternRule = PatternRule {
    source: r"^[^@\s]+@[^@\s]+\.[^@\s]+$",
    message: "Enter a valid email address",
};

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> FieldRule {
        FieldRule {
            required: true,
            ..Default::default()
        }
    }

    mod required_check {
        use super::*;

        #[test]
        fn test_empty_required_fails() {
            assert_eq!(
                validate_field("", &required()),
                Some(ValidationError::Required)
            );
        }

        #[test]
        fn test_whitespace_only_required_fails() {
            assert_eq!(
                validate_field("   \t", &required()),
                Some(ValidationError::Required)
            );
        }

        #[test]
        fn test_empty_optional_passes() {
            let rule = FieldRule {
                required: false,
                min_len: Some(3),
                ..Default::default()
            };
            assert_eq!(validate_field("", &rule), None);
        }
    }

    mod length_check {
        use super::*;

        fn rule() -> FieldRule {
            FieldRule {
                required: true,
                min_len: Some(3),
                max_len: Some(5),
                ..Default::default()
            }
        }

        #[test]
        fn test_one_below_min_fails() {
            let err = validate_field("ab", &rule()).expect("should fail");
            assert_eq!(err, ValidationError::TooShort { min: 3 });
            assert!(err.is_length());
        }

        #[test]
        fn test_exactly_min_passes() {
            assert_eq!(validate_field("abc", &rule()), None);
        }

        #[test]
        fn test_exactly_max_passes() {
            assert_eq!(validate_field("abcde", &rule()), None);
        }

        #[test]
        fn test_one_above_max_fails() {
            let err = validate_field("abcdef", &rule()).expect("should fail");
            assert_eq!(err, ValidationError::TooLong { max: 5 });
            assert!(err.is_length());
        }

        #[test]
        fn test_length_measured_after_trimming() {
            // 2 chars of content padded to 6 with whitespace
            assert_eq!(
                validate_field("  ab  ", &rule()),
                Some(ValidationError::TooShort { min: 3 })
            );
        }
    }

    mod pattern_check {
        use super::*;

        fn rule() -> FieldRule {
            FieldRule {
                required: true,
                pattern: Some(EMAIL_PATTERN),
                ..Default::default()
            }
        }

        #[test]
        fn test_matching_value_passes() {
            assert_eq!(validate_field("ada@example.com", &rule()), None);
        }

        #[test]
        fn test_mismatch_fails_with_pattern_message() {
            assert_eq!(
                validate_field("not-an-email", &rule()),
                Some(ValidationError::Pattern(EMAIL_PATTERN.message))
            );
        }
    }

    mod allowed_check {
        use super::*;

        fn rule() -> FieldRule {
            FieldRule {
                required: true,
                allowed: Some(&["1-10", "11-50"]),
                ..Default::default()
            }
        }

        #[test]
        fn test_member_passes() {
            assert_eq!(validate_field("11-50", &rule()), None);
        }

        #[test]
        fn test_non_member_fails() {
            assert_eq!(
                validate_field("99-100", &rule()),
                Some(ValidationError::NotAllowed)
            );
        }
    }

    mod check_order {
        use super::*;

        #[test]
        fn test_required_reported_before_length() {
            let rule = FieldRule {
                required: true,
                min_len: Some(3),
                ..Default::default()
            };
            assert_eq!(validate_field("", &rule), Some(ValidationError::Required));
        }

        #[test]
        fn test_length_reported_before_pattern() {
            let rule = FieldRule {
                required: true,
                min_len: Some(10),
                pattern: Some(EMAIL_PATTERN),
                ..Default::default()
            };
            // Fails both checks; only the length failure is reported
            assert_eq!(
                validate_field("a@b.c", &rule),
                Some(ValidationError::TooShort { min: 10 })
            );
        }

        #[test]
        fn test_pattern_reported_before_allowed() {
            let rule = FieldRule {
                required: true,
                pattern: Some(EMAIL_PATTERN),
                allowed: Some(&["x@y.zz"]),
                ..Default::default()
            };
            assert_eq!(
                validate_field("plainly-wrong", &rule),
                Some(ValidationError::Pattern(EMAIL_PATTERN.message))
            );
        }
    }
}
