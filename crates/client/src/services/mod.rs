//! Client-side services.
//!
//! - [`session`] - Session store mirrored into durable storage
//! - [`cart`] - Guest cart kept in durable storage before sign-in
//! - [`auth`] - Login flow, logout and the submit guard

pub mod auth;
pub mod cart;
pub mod session;
