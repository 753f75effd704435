//! User-visible notifications.

/// Toast-style notification collaborator.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}
