//! Sign-in form fields and their rules.

use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};

use super::{FieldRules, FormErrors, LengthRule, PatternRule};
use crate::Credentials;
use crate::types::email::looks_like_email;

/// Field name of the email/username input.
pub const EMAIL_FIELD: &str = "email";
/// Field name of the password input.
pub const PASSWORD_FIELD: &str = "password";

/// Minimum password length accepted by the form.
pub const MIN_PASSWORD_LENGTH: usize = 6;
/// Maximum password length accepted by the form.
pub const MAX_PASSWORD_LENGTH: usize = 20;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,4}$")
        .expect("email pattern is a valid regex")
});

static EMAIL_RULES: FieldRules = FieldRules {
    required: Some("Email is required."),
    min_length: None,
    max_length: None,
    pattern: Some(PatternRule {
        regex: &EMAIL_PATTERN,
        message: "Please enter a valid email address",
        applies_to: Some(looks_like_email),
    }),
};

static PASSWORD_RULES: FieldRules = FieldRules {
    required: Some("Password is required"),
    min_length: Some(LengthRule {
        value: MIN_PASSWORD_LENGTH,
        message: "Password must be at least 6 characters",
    }),
    max_length: Some(LengthRule {
        value: MAX_PASSWORD_LENGTH,
        message: "Password must not exceed 20 characters",
    }),
    pattern: None,
};

/// Rules of the email/username field.
#[must_use]
pub fn email_rules() -> &'static FieldRules {
    &EMAIL_RULES
}

/// Rules of the password field.
#[must_use]
pub fn password_rules() -> &'static FieldRules {
    &PASSWORD_RULES
}

/// Raw values of the sign-in form, as entered.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl LoginForm {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Check every field and collect the failures.
    #[must_use]
    pub fn errors(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.check(EMAIL_FIELD, self.email.trim(), &EMAIL_RULES);
        errors.check(PASSWORD_FIELD, self.password.expose_secret(), &PASSWORD_RULES);
        errors
    }

    /// Turn the form into credentials if every field passes.
    ///
    /// The email is trimmed; the password is sent as typed.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages if any rule fails.
    pub fn validate(self) -> Result<Credentials, FormErrors> {
        self.errors().into_result()?;
        Ok(Credentials {
            email: self.email.trim().to_owned(),
            password: self.password,
        })
    }
}
