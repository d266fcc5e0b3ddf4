//! Core types for SketchShop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod id;
pub mod price;
pub mod status;

pub use cart::{Cart, CartFormatError, CartLineItem};
pub use catalog::{Artist, Product};
pub use checkout::{CheckoutSummary, ShippingTier, UnknownShippingTier};
pub use id::*;
pub use price::{DisplayAmount, DisplayCurrency, INR, Price};
pub use status::{CheckoutError, CheckoutStatus};
