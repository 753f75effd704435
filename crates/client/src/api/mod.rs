//! Storefront API seams.
//!
//! The flows talk to the server through [`AuthApi`] and [`CartApi`].
//! [`ApiClient`] implements both over HTTP; tests substitute fakes.
//!
//! # Endpoints
//!
//! | Call | Method | Path |
//! |------|--------|------|
//! | `login` | `POST` | `/auth/login` |
//! | `merge_cart` | `POST` | `/user/cart/merge` |
//! | `get_cart` | `GET` | `/user/cart/{userId}` |

mod client;

pub use client::ApiClient;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_core::{CartItem, Credentials, ServerCart, UserId, UserProfile};

/// Errors that can occur when calling the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: StatusCode,
        /// `message` field of the error body, when the server sent one.
        message: Option<String>,
    },

    /// The response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL cannot carry API paths.
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status of a rejected call.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message the server attached to the rejection.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub token: String,
}

/// Body of the cart merge call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeCartRequest {
    pub user_id: UserId,
    pub local_cart_items: Vec<CartItem>,
}

/// Authentication service.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token and the user's profile.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;
}

/// Server-side cart service. Calls are authorized with the session token.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// Merge guest cart lines into the user's server cart.
    async fn merge_cart(
        &self,
        token: &SecretString,
        request: &MergeCartRequest,
    ) -> Result<(), ApiError>;

    /// Fetch the user's authoritative cart.
    async fn get_cart(&self, token: &SecretString, user_id: &UserId)
    -> Result<ServerCart, ApiError>;
}
