//! Login flow.
//!
//! One async call per submission:
//!
//! 1. Validate the form. Failures stay on the form; nothing is sent.
//! 2. Authenticate. A failure here ends the flow with nothing stored.
//! 3. Commit the session to durable storage and to state.
//! 4. If a guest cart exists, merge it into the server cart.
//! 5. After a successful merge, clear the guest cart, then fetch the
//!    authoritative server cart into state.
//! 6. Welcome the user and navigate by role.
//!
//! Network calls run one after another; each needs the previous result.
//! Nothing is retried. Errors from steps 2 to 5 all go through the shared
//! [`ErrorReporter`]; the submit flag is cleared on every exit path.

mod error;
mod in_flight;

pub use error::LoginError;
pub use in_flight::{InFlight, SubmitState};

use std::sync::Arc;

use secrecy::SecretString;
use tracing::instrument;

use storefront_core::{Credentials, LoginForm, ServerCart, Session};

use crate::api::{AuthApi, CartApi, MergeCartRequest};
use crate::error::{ErrorReporter, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::navigation::{Navigator, Route};
use crate::notify::Notifier;
use crate::services::cart::GuestCart;
use crate::services::session::SessionStore;
use crate::storage::StorageError;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session: Session,
    /// The server cart after a guest cart merge; `None` when there was
    /// nothing to merge.
    pub cart: Option<ServerCart>,
    /// Where the user was sent.
    pub route: Route,
}

/// The login flow and its collaborators.
#[derive(Clone)]
pub struct LoginFlow {
    auth: Arc<dyn AuthApi>,
    carts: Arc<dyn CartApi>,
    sessions: SessionStore,
    guest_cart: GuestCart,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    reporter: ErrorReporter,
    submit: SubmitState,
}

impl LoginFlow {
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthApi>,
        carts: Arc<dyn CartApi>,
        sessions: SessionStore,
        guest_cart: GuestCart,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            auth,
            carts,
            sessions,
            guest_cart,
            reporter: ErrorReporter::new(Arc::clone(&notifier)),
            notifier,
            navigator,
            submit: SubmitState::new(),
        }
    }

    /// The submit flag front ends bind their submit control to.
    #[must_use]
    pub const fn submit_state(&self) -> &SubmitState {
        &self.submit
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle a submitted sign-in form.
    ///
    /// Validation failures are returned without notifying; they belong next
    /// to their fields. Every other failure is reported through the shared
    /// error translator before being returned.
    ///
    /// # Errors
    ///
    /// - `LoginError::InProgress` if another submission is running
    /// - `LoginError::Validation` if the form is rejected client-side
    /// - any error of [`LoginFlow::run`]
    pub async fn submit(&self, form: LoginForm) -> Result<LoginOutcome, LoginError> {
        let _in_flight = self.submit.begin().ok_or(LoginError::InProgress)?;

        let credentials = form.validate()?;

        match self.run(&credentials).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.reporter.report(&e);
                Err(e)
            }
        }
    }

    /// Run the flow for already validated credentials.
    ///
    /// # Errors
    ///
    /// - `LoginError::Auth` if the auth service fails; nothing is stored
    /// - `LoginError::Session` if the session cannot be persisted
    /// - `LoginError::GuestCart`, `CartMerge` or `CartFetch` after the
    ///   session was committed; the user stays signed in
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn run(&self, credentials: &Credentials) -> Result<LoginOutcome, LoginError> {
        let response = self
            .auth
            .login(credentials)
            .await
            .map_err(LoginError::Auth)?;

        let session = Session::new(response.user, SecretString::from(response.token));
        self.sessions
            .commit(session.clone())
            .map_err(LoginError::Session)?;

        set_sentry_user(
            &session.user.id,
            session.user.email.as_ref().map(|email| email.as_str()),
        );
        add_breadcrumb("auth", "Signed in", Some(&[("role", session.user.role.as_str())]));
        tracing::info!(user_id = %session.user.id, role = %session.user.role, "Signed in");

        let cart = self.merge_guest_cart(&session).await?;

        self.notifier
            .success(&format!("Welcome {}", session.user.first_name));

        let route = Route::after_login(&session.user);
        self.navigator.go_to(route);

        Ok(LoginOutcome {
            session,
            cart,
            route,
        })
    }

    /// Merge the guest cart into the server cart, if there is one.
    ///
    /// The guest cart is cleared right after the server accepts the merge,
    /// before the refetch, so a failed refetch can never cause the same
    /// lines to be merged twice.
    async fn merge_guest_cart(&self, session: &Session) -> Result<Option<ServerCart>, LoginError> {
        let items = self.guest_cart.load().map_err(LoginError::GuestCart)?;
        if items.is_empty() {
            return Ok(None);
        }

        let lines = items.len().to_string();
        let request = MergeCartRequest {
            user_id: session.user_id().clone(),
            local_cart_items: items,
        };

        self.carts
            .merge_cart(&session.token, &request)
            .await
            .map_err(LoginError::CartMerge)?;

        self.guest_cart.clear().map_err(LoginError::GuestCart)?;
        add_breadcrumb("cart", "Guest cart merged", Some(&[("lines", lines.as_str())]));

        let cart = self
            .carts
            .get_cart(&session.token, session.user_id())
            .await
            .map_err(LoginError::CartFetch)?;

        tracing::info!(items = cart.item_count(), "Server cart refreshed");
        self.sessions.state().set_cart(cart.clone());
        Ok(Some(cart))
    }
}

/// Sign out: forget the session in state and durable storage.
///
/// # Errors
///
/// Returns an error if durable storage cannot be written. The in-memory
/// session is gone either way.
pub fn logout(sessions: &SessionStore) -> Result<(), StorageError> {
    let user_id = sessions.current().map(|session| session.user.id);
    clear_sentry_user();
    sessions.clear()?;
    if let Some(user_id) = user_id {
        tracing::info!(%user_id, "Signed out");
    }
    Ok(())
}
