//! Shared error-to-notification translator with Sentry integration.
//!
//! Every network or storage failure of a flow passes through
//! [`ErrorReporter::report`]: the error is logged, captured to Sentry when it
//! points at the server or the transport, and turned into one line of text
//! for the notification collaborator.

use std::sync::Arc;

use reqwest::StatusCode;

use crate::api::ApiError;
use crate::notify::Notifier;
use crate::services::auth::LoginError;

const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";
const UNREACHABLE_MESSAGE: &str = "Unable to reach the server";

/// User-facing text for an API error.
///
/// The server's own message wins; otherwise the status class decides.
#[must_use]
pub fn describe_api_error(error: &ApiError) -> String {
    if let Some(message) = error.server_message() {
        return message.to_owned();
    }

    match error {
        ApiError::Http(_) => UNREACHABLE_MESSAGE.to_owned(),
        ApiError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED => {
            "Invalid credentials".to_owned()
        }
        ApiError::Status { status, .. } if status.is_client_error() => {
            status.canonical_reason().unwrap_or(GENERIC_MESSAGE).to_owned()
        }
        _ => GENERIC_MESSAGE.to_owned(),
    }
}

/// User-facing text for a failed login submission.
#[must_use]
pub fn describe_error(error: &LoginError) -> String {
    match error {
        LoginError::Validation(errors) => errors
            .iter()
            .map(|(_, message)| message)
            .collect::<Vec<_>>()
            .join(" "),
        LoginError::InProgress => "Please wait, signing you in".to_owned(),
        LoginError::Auth(e) | LoginError::CartMerge(e) | LoginError::CartFetch(e) => {
            describe_api_error(e)
        }
        LoginError::Session(_) | LoginError::GuestCart(_) => GENERIC_MESSAGE.to_owned(),
    }
}

/// Whether an error says something is wrong on our side rather than the
/// user's, and is therefore worth a Sentry event.
fn is_reportable(error: &LoginError) -> bool {
    match error.api_error() {
        Some(ApiError::Status { status, .. }) => status.is_server_error(),
        Some(_) => true,
        None => matches!(error, LoginError::Session(_) | LoginError::GuestCart(_)),
    }
}

/// The single error boundary of the flows.
#[derive(Clone)]
pub struct ErrorReporter {
    notifier: Arc<dyn Notifier>,
}

impl ErrorReporter {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Log, capture and surface an error. Returns the text that was shown.
    pub fn report(&self, error: &LoginError) -> String {
        if is_reportable(error) {
            let event_id = sentry::capture_error(error);
            tracing::error!(
                error = %error,
                session_committed = error.session_committed(),
                sentry_event_id = %event_id,
                "Login flow failed"
            );
        } else {
            tracing::warn!(error = %error, "Login rejected");
        }

        let message = describe_error(error);
        self.notifier.error(&message);
        message
    }
}

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a flow milestone.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of steps
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, PoisonError};

    use storefront_core::LoginForm;

    use super::*;
    use crate::storage::StorageError;

    fn status(status: StatusCode, message: Option<&str>) -> ApiError {
        ApiError::Status {
            status,
            message: message.map(str::to_owned),
        }
    }

    #[test]
    fn test_server_message_wins() {
        let err = status(StatusCode::BAD_REQUEST, Some("Account is locked"));
        assert_eq!(describe_api_error(&err), "Account is locked");
    }

    #[test]
    fn test_status_fallbacks() {
        assert_eq!(
            describe_api_error(&status(StatusCode::UNAUTHORIZED, None)),
            "Invalid credentials"
        );
        assert_eq!(
            describe_api_error(&status(StatusCode::NOT_FOUND, None)),
            "Not Found"
        );
        assert_eq!(
            describe_api_error(&status(StatusCode::SERVICE_UNAVAILABLE, None)),
            GENERIC_MESSAGE
        );
    }

    #[test]
    fn test_describe_validation_joins_messages() {
        let Err(errors) = LoginForm::new("", "").validate() else {
            panic!("empty form must fail");
        };
        assert_eq!(
            describe_error(&LoginError::Validation(errors)),
            "Email is required. Password is required"
        );
    }

    #[test]
    fn test_reportable_errors() {
        assert!(!is_reportable(&LoginError::Auth(status(
            StatusCode::UNAUTHORIZED,
            None
        ))));
        assert!(is_reportable(&LoginError::CartFetch(status(
            StatusCode::INTERNAL_SERVER_ERROR,
            None
        ))));
        assert!(is_reportable(&LoginError::Session(StorageError::Corrupt(
            "x".into()
        ))));
        assert!(!is_reportable(&LoginError::InProgress));
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Notifier for Recorder {
        fn success(&self, _message: &str) {}

        fn error(&self, message: &str) {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(message.to_owned());
        }
    }

    #[test]
    fn test_report_notifies_once() {
        let recorder = Arc::new(Recorder::default());
        let reporter = ErrorReporter::new(recorder.clone());

        let shown = reporter.report(&LoginError::Auth(status(
            StatusCode::UNAUTHORIZED,
            Some("Wrong password"),
        )));

        assert_eq!(shown, "Wrong password");
        let seen = recorder.0.lock().unwrap_or_else(PoisonError::into_inner);
        assert_eq!(*seen, vec!["Wrong password".to_owned()]);
    }
}
