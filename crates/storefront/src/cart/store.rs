//! The owned cart store.
//!
//! One `CartStore` exists per live shopper. Handlers receive it through the
//! shopper extractor instead of re-reading storage, and observers (the header
//! badge stream) follow changes through [`CartStore::subscribe`].

use std::sync::Arc;

use sketchshop_core::{Cart, Product};
use tokio::sync::watch;

use super::repository::CartRepository;
use crate::storage::StorageError;

/// A shopper's cart, persisted on every mutation.
///
/// Mutations run inside the watch channel's write lock and persist before the
/// lock is released, so concurrent requests for the same shopper serialize as
/// read-modify-write with last-writer-wins storage.
pub struct CartStore {
    state: watch::Sender<Cart>,
    repository: Arc<dyn CartRepository>,
}

impl CartStore {
    /// Create a store holding whatever the repository has saved.
    #[must_use]
    pub fn load(repository: Arc<dyn CartRepository>) -> Self {
        let cart = repository.load();
        let (state, _) = watch::channel(cart);
        Self { state, repository }
    }

    /// Current cart contents.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Total units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.state.borrow().item_count()
    }

    /// Receive a notification after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Add one unit of `product` and persist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting fails. The in-memory cart keeps
    /// the new item either way.
    pub fn add_one(&self, product: &Product) -> Result<(), StorageError> {
        self.mutate(|cart| cart.add_one(product), |repository, cart| repository.save(cart))
    }

    /// Empty the cart and delete its storage slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.mutate(Cart::clear, |repository, _| repository.remove())
    }

    /// Remove the units covered by a completed payment and persist.
    ///
    /// The storage slot is deleted once nothing unpaid is left.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot cannot be written or removed.
    pub fn settle(&self, paid: &Cart) -> Result<(), StorageError> {
        self.mutate(
            |cart| cart.settle(paid),
            |repository, cart| {
                if cart.is_empty() {
                    repository.remove()
                } else {
                    repository.save(cart)
                }
            },
        )
    }

    fn mutate(
        &self,
        change: impl FnOnce(&mut Cart),
        persist: impl FnOnce(&dyn CartRepository, &Cart) -> Result<(), StorageError>,
    ) -> Result<(), StorageError> {
        let mut result = Ok(());
        self.state.send_modify(|cart| {
            change(cart);
            result = persist(self.repository.as_ref(), cart);
        });
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sketchshop_core::{ArtistName, Price, ProductId};

    use super::*;
    use crate::cart::repository::{CART_KEY, KeyValueCartRepository};
    use crate::storage::{KeyValueStore, MemoryStore};

    fn product(id: &str, dollars: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Sketch {id}"),
            artist: ArtistName::new("R. Kapoor"),
            price: Price::from_dollars(dollars),
            description: String::new(),
            dims: String::new(),
            image: String::new(),
            available: 3,
            tags: Vec::new(),
        }
    }

    fn store_over(slots: &MemoryStore) -> CartStore {
        CartStore::load(Arc::new(KeyValueCartRepository::new(Arc::new(slots.clone()))))
    }

    #[test]
    fn test_add_one_persists_every_change() {
        let slots = MemoryStore::new();
        let store = store_over(&slots);
        let sketch = product("sk-002", 45);

        store.add_one(&sketch).unwrap();
        store.add_one(&sketch).unwrap();

        let stored = Cart::from_json(&slots.get(CART_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored, store.snapshot());
        assert_eq!(stored.items().len(), 1);
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn test_clear_empties_and_removes_slot() {
        let slots = MemoryStore::new();
        let store = store_over(&slots);
        store.add_one(&product("sk-001", 35)).unwrap();

        store.clear().unwrap();

        assert!(store.snapshot().is_empty());
        assert!(!slots.contains(CART_KEY));
        assert!(store_over(&slots).snapshot().is_empty());
    }

    #[test]
    fn test_settle_everything_removes_slot() {
        let slots = MemoryStore::new();
        let store = store_over(&slots);
        store.add_one(&product("sk-001", 35)).unwrap();

        store.settle(&store.snapshot()).unwrap();

        assert!(store.snapshot().is_empty());
        assert!(!slots.contains(CART_KEY));
        assert!(store_over(&slots).snapshot().is_empty());
    }

    #[test]
    fn test_settle_keeps_unpaid_lines_stored() {
        let slots = MemoryStore::new();
        let store = store_over(&slots);
        store.add_one(&product("sk-001", 35)).unwrap();
        let paid = store.snapshot();
        store.add_one(&product("sk-002", 45)).unwrap();

        store.settle(&paid).unwrap();

        let reloaded = store_over(&slots).snapshot();
        assert_eq!(reloaded, store.snapshot());
        assert!(reloaded.line(&ProductId::new("sk-001")).is_none());
        assert_eq!(reloaded.line(&ProductId::new("sk-002")).unwrap().qty, 1);
    }

    #[test]
    fn test_reload_sees_persisted_cart() {
        let slots = MemoryStore::new();
        store_over(&slots).add_one(&product("sk-003", 75)).unwrap();

        let reloaded = store_over(&slots);
        assert_eq!(reloaded.item_count(), 1);
    }

    #[test]
    fn test_malformed_slot_starts_empty() {
        let slots = MemoryStore::new();
        slots.set(CART_KEY, "{not json").unwrap();
        assert!(store_over(&slots).snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let store = store_over(&MemoryStore::new());
        let mut updates = store.subscribe();

        store.add_one(&product("sk-001", 35)).unwrap();

        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update().item_count(), 1);

        store.clear().unwrap();
        updates.changed().await.unwrap();
        assert!(updates.borrow_and_update().is_empty());
    }
}
