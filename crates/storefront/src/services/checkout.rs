//! Checkout status tracking for one shopper.
//!
//! The payment itself is simulated: [`super::shoppers::Shopper::pay`] moves
//! the flow to `Processing`, waits for the configured delay on a spawned task,
//! then clears the cart and marks the flow `Success`.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use sketchshop_core::{Cart, CheckoutError, CheckoutStatus};

/// Per-shopper checkout state.
#[derive(Debug)]
pub struct CheckoutFlow {
    status: Mutex<CheckoutStatus>,
    payment_delay: Duration,
}

impl CheckoutFlow {
    #[must_use]
    pub fn new(payment_delay: Duration) -> Self {
        Self {
            status: Mutex::new(CheckoutStatus::default()),
            payment_delay,
        }
    }

    /// How long the simulated payment takes.
    #[must_use]
    pub const fn payment_delay(&self) -> Duration {
        self.payment_delay
    }

    /// Current status, reconciled against the cart.
    pub fn status(&self, cart: &Cart) -> CheckoutStatus {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        *status = status.reconcile(cart.is_empty());
        *status
    }

    /// Check and enter `Processing` under one lock.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` if the cart is empty or a payment is in flight.
    pub fn begin(&self, cart: &Cart) -> Result<(), CheckoutError> {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        *status = status.begin_payment(cart.is_empty())?;
        Ok(())
    }

    /// Mark the in-flight payment as completed.
    pub fn complete(&self) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = CheckoutStatus::Success;
    }
}
