//! Business logic services.
//!
//! - [`shoppers`] - Live shopper registry, cart mutations and simulated payment
//! - [`checkout`] - Per-shopper checkout status tracking

pub mod checkout;
pub mod shoppers;

pub use checkout::CheckoutFlow;
pub use shoppers::{Shopper, ShopperRegistry};
