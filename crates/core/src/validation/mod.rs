//! Declarative field validation.
//!
//! Each form field declares a static [`FieldRules`] next to its definition.
//! [`validate_field`] is a pure function of the value and those rules; it
//! returns the message of the first failing rule, or `None`.
//!
//! Rules are checked in a fixed order: required, minimum length, maximum
//! length, pattern. Only the empty string counts as missing; callers trim
//! fields where surrounding whitespace is not significant. An empty value
//! that is not required skips everything else. Fields are independent: there are no cross-field rules.

pub mod login;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

pub use login::{LoginForm, email_rules, password_rules};

/// Length bound with the message shown when it is violated.
#[derive(Debug, Clone, Copy)]
pub struct LengthRule {
    /// Bound in characters (Unicode scalar values).
    pub value: usize,
    pub message: &'static str,
}

/// Regex the value must match.
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub regex: &'static LazyLock<Regex>,
    pub message: &'static str,
    /// When set, the pattern only applies to values for which this returns true.
    pub applies_to: Option<fn(&str) -> bool>,
}

/// The static rule set of a single form field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRules {
    pub required: Option<&'static str>,
    pub min_length: Option<LengthRule>,
    pub max_length: Option<LengthRule>,
    pub pattern: Option<PatternRule>,
}

/// Validate one field value against its rules.
///
/// Returns the message of the first rule that fails.
#[must_use]
pub fn validate_field(value: &str, rules: &FieldRules) -> Option<&'static str> {
    if value.is_empty() {
        return rules.required;
    }

    let length = value.chars().count();

    if let Some(min) = rules.min_length
        && length < min.value
    {
        return Some(min.message);
    }

    if let Some(max) = rules.max_length
        && length > max.value
    {
        return Some(max.message);
    }

    if let Some(pattern) = rules.pattern {
        let applies = pattern.applies_to.is_none_or(|applies_to| applies_to(value));
        if applies && !pattern.regex.is_match(value) {
            return Some(pattern.message);
        }
    }

    None
}

/// Per-field messages collected from a failed form submission.
///
/// Keyed by field name. A non-empty `FormErrors` blocks submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("invalid form fields: {}", join_fields(.errors))]
pub struct FormErrors {
    errors: BTreeMap<&'static str, &'static str>,
}

fn join_fields(errors: &BTreeMap<&'static str, &'static str>) -> String {
    errors.keys().copied().collect::<Vec<_>>().join(", ")
}

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `value` and record the message under `field` if it fails.
    pub fn check(&mut self, field: &'static str, value: &str, rules: &FieldRules) {
        if let Some(message) = validate_field(value, rules) {
            self.errors.insert(field, message);
        }
    }

    /// Message attached to a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.errors.get(field).copied()
    }

    /// Iterate over `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed validation.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

    static CODE_RULES: FieldRules = FieldRules {
        required: Some("Code is required"),
        min_length: Some(LengthRule {
            value: 4,
            message: "too short",
        }),
        max_length: Some(LengthRule {
            value: 6,
            message: "too long",
        }),
        pattern: Some(PatternRule {
            regex: &DIGITS,
            message: "digits only",
            applies_to: None,
        }),
    };

    #[test]
    fn test_required() {
        assert_eq!(validate_field("", &CODE_RULES), Some("Code is required"));
        assert_eq!(validate_field("   ", &CODE_RULES), Some("too short"));
    }

    #[test]
    fn test_empty_optional_field_passes() {
        let optional = FieldRules {
            required: None,
            ..CODE_RULES
        };
        assert_eq!(validate_field("", &optional), None);
    }

    #[test]
    fn test_length_checked_before_pattern() {
        assert_eq!(validate_field("ab", &CODE_RULES), Some("too short"));
        assert_eq!(validate_field("abcdefg", &CODE_RULES), Some("too long"));
        assert_eq!(validate_field("abcd", &CODE_RULES), Some("digits only"));
        assert_eq!(validate_field("1234", &CODE_RULES), None);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let rules = FieldRules {
            max_length: Some(LengthRule {
                value: 4,
                message: "too long",
            }),
            ..FieldRules::default()
        };
        assert_eq!(validate_field("ñañá", &rules), None);
    }

    fn is_tagged(value: &str) -> bool {
        value.starts_with('#')
    }

    #[test]
    fn test_guarded_pattern_is_skipped() {
        let rules = FieldRules {
            pattern: Some(PatternRule {
                regex: &DIGITS,
                message: "digits only",
                applies_to: Some(is_tagged),
            }),
            ..FieldRules::default()
        };
        assert_eq!(validate_field("abc", &rules), None);
        assert_eq!(validate_field("#abc", &rules), Some("digits only"));
    }

    #[test]
    fn test_form_errors_collects_every_field() {
        let mut errors = FormErrors::new();
        errors.check("code", "", &CODE_RULES);
        errors.check("backup", "12", &CODE_RULES);
        errors.check("ok", "1234", &CODE_RULES);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("code"), Some("Code is required"));
        assert_eq!(errors.get("backup"), Some("too short"));
        assert_eq!(errors.get("ok"), None);
        assert_eq!(errors.to_string(), "invalid form fields: backup, code");
        assert!(errors.into_result().is_err());
    }
}
