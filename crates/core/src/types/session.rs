//! Authenticated session.

use secrecy::SecretString;

use crate::{UserId, UserProfile};

/// The signed-in user's identity and auth token.
///
/// Owned by the session store. Lives until logout or an explicit clear.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserProfile,
    pub token: SecretString,
}

impl Session {
    #[must_use]
    pub const fn new(user: UserProfile, token: SecretString) -> Self {
        Self { user, token }
    }

    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user.id
    }
}
