//! Routes the flows can send the user to.

use storefront_core::UserProfile;

use crate::api::ApiError;
use crate::services::auth::LoginError;

/// Storefront routes reachable from the sign-in flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    AdminOverview,
    AccountDashboard,
    ResetPassword,
    SignUp,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::AdminOverview => "/admin/overview",
            Self::AccountDashboard => "/account/dashboard",
            Self::ResetPassword => "/reset-password",
            Self::SignUp => "/sign-up",
        }
    }

    /// Landing page after a successful login.
    #[must_use]
    pub const fn after_login(user: &UserProfile) -> Self {
        if user.is_admin() {
            Self::AdminOverview
        } else {
            Self::AccountDashboard
        }
    }

    /// Pages to offer when the auth service refused the credentials.
    ///
    /// Empty for every other failure: those are not the shopper's to fix.
    #[must_use]
    pub fn after_rejection(error: &LoginError) -> &'static [Self] {
        match error {
            LoginError::Auth(ApiError::Status { status, .. }) if status.is_client_error() => {
                &[Self::ResetPassword, Self::SignUp]
            }
            _ => &[],
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Routing collaborator. Side-effecting; nothing is returned.
pub trait Navigator: Send + Sync {
    fn go_to(&self, route: Route);
}
