//! Cart repository over a key-value slot.

use std::sync::Arc;

use sketchshop_core::Cart;

use crate::storage::{KeyValueStore, StorageError};

/// Name of the slot holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Persistence boundary for a shopper's cart.
pub trait CartRepository: Send + Sync {
    /// Load the stored cart. Missing or unreadable data yields an empty cart.
    fn load(&self) -> Cart;

    /// Replace the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be serialized or written.
    fn save(&self, cart: &Cart) -> Result<(), StorageError>;

    /// Delete the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot cannot be removed.
    fn remove(&self) -> Result<(), StorageError>;
}

/// Stores the cart as JSON in the [`CART_KEY`] slot of a key-value store.
#[derive(Clone)]
pub struct KeyValueCartRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueCartRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl CartRepository for KeyValueCartRepository {
    fn load(&self) -> Cart {
        let text = match self.store.get(CART_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored cart, starting empty");
                return Cart::new();
            }
        };

        Cart::from_json(&text).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Ignoring malformed stored cart");
            Cart::new()
        })
    }

    fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let text = cart.to_json()?;
        self.store.set(CART_KEY, &text)
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.store.remove(CART_KEY)
    }
}
