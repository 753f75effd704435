//! Session commands.

use storefront_client::{LoginError, Route};
use storefront_core::LoginForm;

use super::{CliError, Context};
use crate::console;

/// Run the login flow for the given credentials.
pub async fn login(ctx: &Context, email: String, password: String) -> Result<(), CliError> {
    if let Some(current) = ctx.sessions.current() {
        tracing::info!(user_id = %current.user.id, "Replacing existing session");
    }

    let flow = ctx.login_flow();
    match flow.submit(LoginForm::new(email, password)).await {
        Ok(outcome) => {
            if let Some(cart) = outcome.cart {
                console::print_server_cart(&cart);
            }
            Ok(())
        }
        Err(LoginError::Validation(errors)) => {
            // The flow leaves field errors to the form
            for (field, message) in errors.iter() {
                console::failure(&format!("{field}: {message}"));
            }
            Err(LoginError::Validation(errors).into())
        }
        Err(e) => {
            for route in Route::after_rejection(&e) {
                console::line(&format!("  {}: {route}", hint_label(*route)));
            }
            Err(e.into())
        }
    }
}

const fn hint_label(route: Route) -> &'static str {
    match route {
        Route::ResetPassword => "Forgot your password?",
        Route::SignUp => "New here? Create an account",
        Route::AdminOverview | Route::AccountDashboard => "Continue",
    }
}

pub fn logout(ctx: &Context) -> Result<(), CliError> {
    let signed_in = ctx.sessions.current().is_some();
    storefront_client::services::auth::logout(&ctx.sessions)?;
    console::line(if signed_in {
        "Signed out"
    } else {
        "Not signed in"
    });
    Ok(())
}

pub fn whoami(ctx: &Context) {
    let Some(session) = ctx.sessions.current() else {
        console::line("Not signed in");
        return;
    };

    let user = &session.user;
    let email = user
        .email
        .as_ref()
        .map(|email| format!(" <{email}>"))
        .unwrap_or_default();
    console::line(&format!(
        "{}{email} ({}, id {})",
        user.first_name, user.role, user.id
    ));
}
