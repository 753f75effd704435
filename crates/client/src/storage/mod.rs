//! Durable client-side key/value storage.
//!
//! The storefront keeps a handful of string values that must survive a
//! reload: the auth token, the signed-in profile and the guest cart. This is
//! the browser's local storage in a web front end; here it is a trait with
//! an in-memory and a file-backed implementation.
//!
//! Values are plain strings. Structured data is serialized by the caller,
//! see [`read_json`] and [`write_json`].

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Fixed storage keys.
pub mod keys {
    /// Raw auth token of the current session.
    pub const TOKEN: &str = "token";

    /// JSON-encoded profile of the signed-in user.
    pub const USER: &str = "user";

    /// JSON-encoded guest cart lines.
    pub const CART: &str = "cart";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The backing store itself is unreadable.
    #[error("storage is corrupt: {0}")]
    Corrupt(String),
}

/// String key/value store that survives process restarts.
///
/// Implementations must be safe to share between tasks. There is no locking
/// across processes.
pub trait DurableStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value.
///
/// # Errors
///
/// Returns an error if the backend fails or the stored value is not valid
/// JSON for `T`.
pub fn read_json<T: DeserializeOwned>(
    storage: &dyn DurableStorage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    storage
        .get(key)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(StorageError::from)
}

/// Encode and store a JSON value.
///
/// # Errors
///
/// Returns an error if encoding fails or the backend cannot be written.
pub fn write_json<T: Serialize + ?Sized>(
    storage: &dyn DurableStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_helpers() {
        let storage = MemoryStorage::new();
        write_json(&storage, "numbers", &[1, 2, 3]).unwrap();
        assert_eq!(storage.get("numbers").unwrap().as_deref(), Some("[1,2,3]"));

        let numbers: Option<Vec<u8>> = read_json(&storage, "numbers").unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));

        let missing: Option<Vec<u8>> = read_json(&storage, "missing").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_read_json_rejects_garbage() {
        let storage = MemoryStorage::new();
        storage.set("numbers", "not json").unwrap();
        let result: Result<Option<Vec<u8>>, _> = read_json(&storage, "numbers");
        assert!(matches!(result, Err(StorageError::Serde(_))));
    }
}
