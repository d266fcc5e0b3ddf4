//! Checkout status machine.
//!
//! ```text
//! Empty ──(item added)──> Idle ──pay──> Processing ──(delay)──> Success
//!   ^                      │ ^                                     │
//!   └──(cart emptied)──────┘ └──────────(item added)───────────────┘
//! ```
//!
//! `Empty` cannot be paid from. A pay request while `Processing` is rejected
//! so a double-submitted form never starts two payments. `Success` falls back
//! to `Idle` once the shopper starts a new cart, so the confirmation banner
//! does not linger over an unpaid cart.

use serde::{Deserialize, Serialize};

/// Where a shopper is in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    /// Nothing in the cart; the pay action is unavailable.
    Empty,
    /// Cart has items and payment has not started.
    #[default]
    Idle,
    /// Simulated payment in flight.
    Processing,
    /// Payment completed and the cart was cleared.
    Success,
}

/// Reasons a pay request is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("payment already in progress")]
    AlreadyProcessing,
}

impl CheckoutStatus {
    /// Align the status with the current cart contents.
    ///
    /// `Processing` is never changed here; only payment completion ends it.
    #[must_use]
    pub const fn reconcile(self, cart_is_empty: bool) -> Self {
        match (self, cart_is_empty) {
            (Self::Idle | Self::Empty, true) => Self::Empty,
            (Self::Empty | Self::Success, false) => Self::Idle,
            (status, _) => status,
        }
    }

    /// Attempt the `Idle -> Processing` transition.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::AlreadyProcessing` while a payment is in
    /// flight and `CheckoutError::EmptyCart` when there is nothing to pay for.
    pub const fn begin_payment(self, cart_is_empty: bool) -> Result<Self, CheckoutError> {
        match self.reconcile(cart_is_empty) {
            Self::Processing => Err(CheckoutError::AlreadyProcessing),
            Self::Empty | Self::Success => Err(CheckoutError::EmptyCart),
            Self::Idle => Ok(Self::Processing),
        }
    }

    /// Whether the pay button should be offered.
    #[must_use]
    pub const fn can_pay(self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub const fn is_processing(self) -> bool {
        matches!(self, Self::Processing)
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_with_empty_cart() {
        assert_eq!(CheckoutStatus::Idle.reconcile(true), CheckoutStatus::Empty);
        assert_eq!(CheckoutStatus::Empty.reconcile(true), CheckoutStatus::Empty);
        assert_eq!(CheckoutStatus::Success.reconcile(true), CheckoutStatus::Success);
        assert_eq!(
            CheckoutStatus::Processing.reconcile(true),
            CheckoutStatus::Processing
        );
    }

    #[test]
    fn test_reconcile_with_items() {
        assert_eq!(CheckoutStatus::Empty.reconcile(false), CheckoutStatus::Idle);
        assert_eq!(CheckoutStatus::Idle.reconcile(false), CheckoutStatus::Idle);
        // A new cart after a purchase clears the stale confirmation.
        assert_eq!(CheckoutStatus::Success.reconcile(false), CheckoutStatus::Idle);
        assert_eq!(
            CheckoutStatus::Processing.reconcile(false),
            CheckoutStatus::Processing
        );
    }

    #[test]
    fn test_begin_payment_from_idle() {
        assert_eq!(
            CheckoutStatus::Idle.begin_payment(false),
            Ok(CheckoutStatus::Processing)
        );
    }

    #[test]
    fn test_begin_payment_rejects_empty_cart() {
        assert_eq!(
            CheckoutStatus::Empty.begin_payment(true),
            Err(CheckoutError::EmptyCart)
        );
        assert_eq!(
            CheckoutStatus::Idle.begin_payment(true),
            Err(CheckoutError::EmptyCart)
        );
        assert_eq!(
            CheckoutStatus::Success.begin_payment(true),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn test_begin_payment_rejects_double_submission() {
        assert_eq!(
            CheckoutStatus::Processing.begin_payment(false),
            Err(CheckoutError::AlreadyProcessing)
        );
    }

    #[test]
    fn test_begin_payment_after_success_with_new_cart() {
        assert_eq!(
            CheckoutStatus::Success.begin_payment(false),
            Ok(CheckoutStatus::Processing)
        );
    }

    #[test]
    fn test_only_idle_can_pay() {
        assert!(CheckoutStatus::Idle.can_pay());
        assert!(!CheckoutStatus::Empty.can_pay());
        assert!(!CheckoutStatus::Processing.can_pay());
        assert!(!CheckoutStatus::Success.can_pay());
    }
}
