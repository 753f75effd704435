//! Command implementations and the context they share.

pub mod auth;
pub mod cart;

use std::sync::Arc;

use storefront_client::{
    ApiClient, ApiError, AppState, ClientConfig, DurableStorage, FileStorage, GuestCart,
    LoginError, LoginFlow, SessionStore, StorageError,
};
use thiserror::Error;

use crate::console::Console;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("{}", storefront_client::error::describe_api_error(.0))]
    Api(#[from] ApiError),
    #[error("{0}")]
    Login(#[from] LoginError),
    #[error("already signed in; sign out to edit the guest cart")]
    SignedIn,
}

impl CliError {
    /// Login failures were already shown by the flow's notifier.
    pub const fn already_reported(&self) -> bool {
        matches!(self, Self::Login(_))
    }
}

/// Everything a command needs, wired from the configuration.
pub struct Context {
    pub api: ApiClient,
    pub sessions: SessionStore,
    pub guest_cart: GuestCart,
}

impl Context {
    /// Open durable storage and restore any stored session.
    pub fn new(config: &ClientConfig) -> Result<Self, CliError> {
        let file = FileStorage::open(&config.storage_dir)?;
        let api = ApiClient::new(config.api_url.clone())?;
        tracing::debug!(api = %api.base_url(), storage = %file.path().display(), "Client ready");

        let storage: Arc<dyn DurableStorage> = Arc::new(file);
        let sessions = SessionStore::new(AppState::new(), Arc::clone(&storage));
        sessions.restore()?;

        Ok(Self {
            api,
            sessions,
            guest_cart: GuestCart::new(storage),
        })
    }

    pub fn login_flow(&self) -> LoginFlow {
        LoginFlow::new(
            Arc::new(self.api.clone()),
            Arc::new(self.api.clone()),
            self.sessions.clone(),
            self.guest_cart.clone(),
            Arc::new(Console),
            Arc::new(Console),
        )
    }
}
