//! Session store.
//!
//! The in-memory session lives in [`AppState`]; a copy is mirrored into
//! durable storage so a restart can pick it up again:
//!
//! - `"token"` - the raw auth token
//! - `"user"` - the profile as JSON

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use storefront_core::{Session, UserProfile};

use crate::state::AppState;
use crate::storage::{DurableStorage, StorageError, keys, read_json, write_json};

/// Owner of the current session.
#[derive(Clone)]
pub struct SessionStore {
    state: AppState,
    storage: Arc<dyn DurableStorage>,
}

impl SessionStore {
    #[must_use]
    pub fn new(state: AppState, storage: Arc<dyn DurableStorage>) -> Self {
        Self { state, storage }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// The current session, if any.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.state.session()
    }

    /// Store a new session in durable storage and in state.
    ///
    /// Durable storage is written first. If that fails, anything already
    /// written is removed again and the in-memory state is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if durable storage cannot be written.
    pub fn commit(&self, session: Session) -> Result<(), StorageError> {
        self.storage
            .set(keys::TOKEN, session.token.expose_secret())?;

        if let Err(e) = write_json(self.storage.as_ref(), keys::USER, &session.user) {
            if let Err(rollback) = self.storage.remove(keys::TOKEN) {
                tracing::warn!(error = %rollback, "Failed to roll back stored token");
            }
            return Err(e);
        }

        tracing::debug!(user_id = %session.user.id, "Session committed");
        self.state.set_session(session);
        Ok(())
    }

    /// Load a previously committed session back into state.
    ///
    /// A half-written or unreadable session is discarded and its keys are
    /// removed, so the user simply appears signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend itself fails.
    pub fn restore(&self) -> Result<Option<Session>, StorageError> {
        let token = self.storage.get(keys::TOKEN)?;
        let (user, unreadable) = match read_json::<UserProfile>(self.storage.as_ref(), keys::USER) {
            Ok(user) => (user, false),
            Err(StorageError::Serde(e)) => {
                tracing::warn!(error = %e, "Discarding unreadable stored user");
                (None, true)
            }
            Err(e) => return Err(e),
        };

        match (token, user) {
            (Some(token), Some(user)) if !token.is_empty() => {
                let session = Session::new(user, SecretString::from(token));
                self.state.set_session(session.clone());
                Ok(Some(session))
            }
            (None, None) if !unreadable => Ok(None),
            _ => {
                tracing::warn!("Discarding incomplete stored session");
                self.remove_keys()?;
                Ok(None)
            }
        }
    }

    /// End the session: forget it in state and in durable storage.
    ///
    /// The guest cart is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if durable storage cannot be written. The in-memory
    /// state is cleared either way.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.state.clear();
        self.remove_keys()
    }

    fn remove_keys(&self) -> Result<(), StorageError> {
        self.storage.remove(keys::TOKEN)?;
        self.storage.remove(keys::USER)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storefront_core::Role;

    use super::*;
    use crate::storage::MemoryStorage;

    /// Storage that refuses writes to one key.
    struct FailingKey {
        inner: MemoryStorage,
        key: &'static str,
    }

    impl DurableStorage for FailingKey {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.key {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    fn session() -> Session {
        Session::new(
            UserProfile::new("u1", "Sam", Role::Customer),
            SecretString::from("T"),
        )
    }

    fn store(storage: Arc<dyn DurableStorage>) -> SessionStore {
        SessionStore::new(AppState::new(), storage)
    }

    #[test]
    fn test_commit_writes_state_and_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let sessions = store(storage.clone());

        sessions.commit(session()).unwrap();

        assert!(sessions.state().is_authenticated());
        assert_eq!(storage.get(keys::TOKEN).unwrap().as_deref(), Some("T"));
        let user: UserProfile = read_json(storage.as_ref(), keys::USER).unwrap().unwrap();
        assert_eq!(user.first_name, "Sam");
    }

    #[test]
    fn test_failed_commit_leaves_nothing_behind() {
        let storage = Arc::new(FailingKey {
            inner: MemoryStorage::new(),
            key: keys::USER,
        });
        let sessions = store(storage.clone());

        assert!(sessions.commit(session()).is_err());
        assert!(!sessions.state().is_authenticated());
        assert!(storage.inner.is_empty());
    }

    #[test]
    fn test_restore_round_trip() {
        let storage: Arc<dyn DurableStorage> = Arc::new(MemoryStorage::new());
        store(storage.clone()).commit(session()).unwrap();

        let reloaded = store(storage);
        let restored = reloaded.restore().unwrap().unwrap();
        assert_eq!(restored.token.expose_secret(), "T");
        assert_eq!(restored.user.id.as_str(), "u1");
        assert!(reloaded.state().is_authenticated());
    }

    #[test]
    fn test_restore_discards_half_written_session() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::TOKEN, "T").unwrap();

        let sessions = store(storage.clone());
        assert!(sessions.restore().unwrap().is_none());
        assert!(!sessions.state().is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_restore_discards_unreadable_user() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::TOKEN, "T").unwrap();
        storage.set(keys::USER, "{broken").unwrap();

        let sessions = store(storage.clone());
        assert!(sessions.restore().unwrap().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_restore_removes_unreadable_user_without_token() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::USER, "{broken").unwrap();

        let sessions = store(storage.clone());
        assert!(sessions.restore().unwrap().is_none());
        assert!(storage.get(keys::USER).unwrap().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clear_keeps_guest_cart() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::CART, "[]").unwrap();
        let sessions = store(storage.clone());
        sessions.commit(session()).unwrap();

        sessions.clear().unwrap();

        assert!(!sessions.state().is_authenticated());
        assert!(storage.get(keys::TOKEN).unwrap().is_none());
        assert!(storage.get(keys::USER).unwrap().is_none());
        assert_eq!(storage.get(keys::CART).unwrap().as_deref(), Some("[]"));
    }
}
