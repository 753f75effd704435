//! Email addresses attached to user profiles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An email address as the storefront API reports it.
///
/// The value is taken as the server sends it. Whether a shopper typed a
/// usable address is decided by the login form rules in
/// [`crate::validation::login`], not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether a sign-in identifier is meant as an email rather than a
/// username. Anything containing `@` is held to the email pattern.
#[must_use]
pub fn looks_like_email(identifier: &str) -> bool {
    identifier.contains('@')
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
