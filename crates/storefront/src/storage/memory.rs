//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use sketchshop_core::ShopperId;

use super::{KeyValueStore, StorageError};

pub(super) type Spaces = HashMap<ShopperId, HashMap<String, String>>;

/// One shopper's slots inside a process-local map. Clones share the map.
///
/// A shopper's entry exists only while it holds at least one slot, so
/// visitors who never keep anything leave no trace behind.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    spaces: Arc<Mutex<Spaces>>,
    shopper: ShopperId,
}

impl MemoryStore {
    /// A store over a fresh map of its own.
    #[must_use]
    pub fn new() -> Self {
        Self::within(Arc::default(), ShopperId::generate())
    }

    pub(super) const fn within(spaces: Arc<Mutex<Spaces>>, shopper: ShopperId) -> Self {
        Self { spaces, shopper }
    }

    /// Whether a slot is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.spaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&self.shopper)
            .is_some_and(|slots| slots.contains_key(key))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .spaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&self.shopper)
            .and_then(|slots| slots.get(key))
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.spaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(self.shopper)
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut spaces = self.spaces.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(slots) = spaces.get_mut(&self.shopper) {
            slots.remove(key);
            if slots.is_empty() {
                spaces.remove(&self.shopper);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slots() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("cart", "[]").unwrap();
        assert!(other.contains("cart"));

        other.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_entry_lives_only_while_slots_exist() {
        let spaces = Arc::<Mutex<Spaces>>::default();
        let store = MemoryStore::within(Arc::clone(&spaces), ShopperId::generate());

        assert_eq!(store.get("cart").unwrap(), None);
        store.remove("cart").unwrap();
        assert!(spaces.lock().unwrap().is_empty());

        store.set("cart", "[]").unwrap();
        store.set("note", "x").unwrap();
        store.remove("cart").unwrap();
        assert_eq!(spaces.lock().unwrap().len(), 1);

        store.remove("note").unwrap();
        assert!(spaces.lock().unwrap().is_empty());
    }

    #[test]
    fn test_shoppers_do_not_share_slots() {
        let spaces = Arc::<Mutex<Spaces>>::default();
        let alice = MemoryStore::within(Arc::clone(&spaces), ShopperId::generate());
        let bob = MemoryStore::within(Arc::clone(&spaces), ShopperId::generate());

        alice.set("cart", "[1]").unwrap();
        assert_eq!(bob.get("cart").unwrap(), None);
        bob.remove("cart").unwrap();
        assert!(alice.contains("cart"));
    }
}
