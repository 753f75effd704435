//! Guest cart.
//!
//! Lines added before sign-in live only in durable storage under `"cart"`.
//! They are merge candidates exactly once: the login flow clears the key as
//! soon as the server accepts the merge.

use std::sync::Arc;

use storefront_core::LocalCartItem;

use crate::storage::{DurableStorage, StorageError, keys, write_json};

/// Typed access to the guest cart in durable storage.
#[derive(Clone)]
pub struct GuestCart {
    storage: Arc<dyn DurableStorage>,
}

impl GuestCart {
    #[must_use]
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        Self { storage }
    }

    /// Current guest cart lines.
    ///
    /// A missing or unparseable value reads as an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage backend fails.
    pub fn load(&self) -> Result<Vec<LocalCartItem>, StorageError> {
        let Some(raw) = self.storage.get(keys::CART)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unparseable guest cart");
                Ok(Vec::new())
            }
        }
    }

    /// Add a line, accumulating quantity onto an existing line for the same
    /// product and size. Returns the updated cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn add(&self, item: LocalCartItem) -> Result<Vec<LocalCartItem>, StorageError> {
        let mut items = self.load()?;

        match items.iter_mut().find(|line| line.same_variant(&item)) {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => items.push(item),
        }

        self.save(&items)?;
        Ok(items)
    }

    /// Replace the stored lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn save(&self, items: &[LocalCartItem]) -> Result<(), StorageError> {
        write_json(self.storage.as_ref(), keys::CART, items)
    }

    /// Forget the guest cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(keys::CART)
    }
}
