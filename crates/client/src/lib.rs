//! Storefront client library.
//!
//! Everything the storefront needs between the UI and the server:
//!
//! - [`api`] - Auth and cart service seams plus the `reqwest` implementation
//! - [`storage`] - Durable key/value storage (the browser's local storage)
//! - [`state`] - The injected application state container
//! - [`services`] - Session store, guest cart and the login flow
//! - [`navigation`] / [`notify`] - UI collaborators the flows drive
//! - [`error`] - The shared error-to-notification translator
//!
//! The flows are plain async functions over trait objects. A front end binds
//! them to its own events and supplies the collaborators.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod navigation;
pub mod notify;
pub mod services;
pub mod state;
pub mod storage;

pub use api::{ApiClient, ApiError, AuthApi, CartApi};
pub use config::{ClientConfig, ConfigError};
pub use navigation::{Navigator, Route};
pub use notify::Notifier;
pub use services::auth::{LoginError, LoginFlow, LoginOutcome};
pub use services::cart::GuestCart;
pub use services::session::SessionStore;
pub use state::AppState;
pub use storage::{DurableStorage, FileStorage, MemoryStorage, StorageError};
