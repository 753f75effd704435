//! Storefront Core - Shared types library.
//!
//! This crate provides the domain types used across the storefront workspace:
//! - `storefront-client` - API client, session store and login flow
//! - `storefront-cli` - Terminal front end for the client flows
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere, including from UI layers that bind the flows to events.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, roles, user profiles, carts and sessions
//! - [`validation`] - Declarative field rules and the login form

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{FieldRules, FormErrors, LengthRule, LoginForm, PatternRule, validate_field};
