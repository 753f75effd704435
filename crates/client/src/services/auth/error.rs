//! Login flow error types.

use thiserror::Error;

use storefront_core::FormErrors;

use crate::api::ApiError;
use crate::storage::StorageError;

/// Errors that can end a login submission.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The form did not pass client-side validation. Nothing was sent.
    #[error("{0}")]
    Validation(#[from] FormErrors),

    /// Another submission is still running.
    #[error("a login is already in progress")]
    InProgress,

    /// The auth service rejected the credentials or could not be reached.
    #[error("login failed: {0}")]
    Auth(#[source] ApiError),

    /// The session could not be written to durable storage.
    #[error("could not store session: {0}")]
    Session(#[source] StorageError),

    /// The guest cart could not be read or cleared.
    #[error("guest cart storage failed: {0}")]
    GuestCart(#[source] StorageError),

    /// The server did not accept the guest cart merge.
    #[error("cart merge failed: {0}")]
    CartMerge(#[source] ApiError),

    /// The merged cart could not be fetched.
    #[error("cart refresh failed: {0}")]
    CartFetch(#[source] ApiError),
}

impl LoginError {
    /// Whether the user was already signed in when this error happened.
    ///
    /// Cart errors occur after the session is committed: the user stays
    /// signed in with a cart that may be unmerged or stale.
    #[must_use]
    pub const fn session_committed(&self) -> bool {
        matches!(
            self,
            Self::GuestCart(_) | Self::CartMerge(_) | Self::CartFetch(_)
        )
    }

    /// The underlying API error, if any.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Auth(e) | Self::CartMerge(e) | Self::CartFetch(e) => Some(e),
            _ => None,
        }
    }
}
