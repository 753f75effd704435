//! Login credentials.

use secrecy::SecretString;

/// Credentials submitted to the auth service.
///
/// Transient: built from a validated login form, sent once, then dropped.
/// Never persisted. The password stays wrapped so it cannot leak through
/// `Debug` or tracing fields.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Email address or username, as typed.
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}
