//! Application state container.
//!
//! Holds the current session and the authoritative cart. The container is
//! created once by the front end and injected into the flows; nothing reads
//! it through a global. State only changes through the operations below.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_core::{ServerCart, Session, UserProfile};

/// Shared application state.
///
/// Cheaply cloneable via `Arc`; clones observe the same state.
#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<Mutex<AppStateInner>>,
}

#[derive(Default)]
struct AppStateInner {
    session: Option<Session>,
    cart: Option<ServerCart>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AppStateInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the current session.
    pub fn set_session(&self, session: Session) {
        self.lock().session = Some(session);
    }

    /// Replace the cart with the server's copy.
    pub fn set_cart(&self, cart: ServerCart) {
        self.lock().cart = Some(cart);
    }

    /// Drop the session and the cart.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.session = None;
        inner.cart = None;
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.lock().session.as_ref().map(|session| session.user.clone())
    }

    #[must_use]
    pub fn cart(&self) -> Option<ServerCart> {
        self.lock().cart.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_some()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("AppState")
            .field("user", &inner.session.as_ref().map(|s| s.user.id.as_str()))
            .field("cart_items", &inner.cart.as_ref().map(ServerCart::item_count))
            .finish()
    }
}
