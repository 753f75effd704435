//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod credentials;
pub mod email;
pub mod id;
pub mod role;
pub mod session;
pub mod user;

pub use cart::{CartItem, LocalCartItem, ServerCart};
pub use credentials::Credentials;
pub use email::Email;
pub use id::*;
pub use role::Role;
pub use session::Session;
pub use user::UserProfile;
