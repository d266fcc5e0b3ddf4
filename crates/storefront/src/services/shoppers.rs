//! Live shoppers and their owned state.
//!
//! A [`Shopper`] bundles one visitor's cart store and checkout flow. The
//! [`ShopperRegistry`] keeps recently active shoppers in memory and rebuilds
//! evicted ones from storage on their next request.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sketchshop_core::{Cart, CheckoutError, CheckoutStatus, Product, ShopperId};
use tracing::instrument;

use super::checkout::CheckoutFlow;
use crate::cart::{CartStore, KeyValueCartRepository};
use crate::storage::{StorageBackend, StorageError};

/// One visitor's cart and checkout state.
pub struct Shopper {
    id: ShopperId,
    cart: CartStore,
    checkout: CheckoutFlow,
}

impl Shopper {
    /// Load a shopper's cart from storage.
    #[must_use]
    pub fn load(id: ShopperId, storage: &StorageBackend, payment_delay: Duration) -> Self {
        let repository = KeyValueCartRepository::new(storage.store_for(id));
        Self {
            id,
            cart: CartStore::load(Arc::new(repository)),
            checkout: CheckoutFlow::new(payment_delay),
        }
    }

    #[must_use]
    pub const fn id(&self) -> ShopperId {
        self.id
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Current checkout status for the current cart.
    #[must_use]
    pub fn checkout_status(&self) -> CheckoutStatus {
        self.checkout.status(&self.cart.snapshot())
    }

    /// Add one unit of a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    #[instrument(skip(self, product), fields(shopper = %self.id, product = %product.id))]
    pub fn add_to_cart(&self, product: &Product) -> Result<(), StorageError> {
        self.cart.add_one(product)?;
        tracing::info!(items = self.cart.item_count(), "Added to cart");
        Ok(())
    }

    /// Start the simulated payment.
    ///
    /// Returns immediately in `Processing`; a background task completes the
    /// payment after the configured delay.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` if the cart is empty or a payment is already
    /// in flight.
    #[instrument(skip(self), fields(shopper = %self.id))]
    pub fn pay(self: &Arc<Self>) -> Result<CheckoutStatus, CheckoutError> {
        let cart: Cart = self.cart.snapshot();
        self.checkout.begin(&cart)?;
        tracing::info!(items = cart.item_count(), "Payment started");

        let shopper = Arc::clone(self);
        tokio::spawn(async move { shopper.complete_payment(cart).await });

        Ok(CheckoutStatus::Processing)
    }

    async fn complete_payment(&self, paid: Cart) {
        tokio::time::sleep(self.checkout.payment_delay()).await;

        if let Err(e) = self.cart.settle(&paid) {
            let event_id = sentry::capture_error(&e);
            tracing::error!(
                shopper = %self.id,
                error = %e,
                sentry_event_id = %event_id,
                "Failed to store settled cart after payment"
            );
        }
        self.checkout.complete();
        tracing::info!(
            shopper = %self.id,
            paid_items = paid.item_count(),
            remaining_items = self.cart.item_count(),
            "Payment completed"
        );
    }
}

/// In-memory index of active shoppers.
#[derive(Clone)]
pub struct ShopperRegistry {
    shoppers: Cache<ShopperId, Arc<Shopper>>,
    storage: StorageBackend,
    payment_delay: Duration,
}

impl ShopperRegistry {
    /// Create a registry evicting shoppers idle for longer than `idle_timeout`.
    #[must_use]
    pub fn new(storage: StorageBackend, payment_delay: Duration, idle_timeout: Duration) -> Self {
        Self {
            shoppers: Cache::builder().time_to_idle(idle_timeout).build(),
            storage,
            payment_delay,
        }
    }

    /// Fetch a live shopper, loading it from storage if needed.
    pub async fn get(&self, id: ShopperId) -> Arc<Shopper> {
        self.shoppers
            .get_with(id, async {
                tracing::debug!(shopper = %id, "Loading shopper");
                Arc::new(Shopper::load(id, &self.storage, self.payment_delay))
            })
            .await
    }

    /// Storage backend the registry loads from.
    #[must_use]
    pub const fn storage(&self) -> &StorageBackend {
        &self.storage
    }
}
