//! SketchShop Core - Shared types library.
//!
//! This crate provides the domain types used by the SketchShop storefront:
//! catalog entries, the shopper's cart, shipping tiers, checkout totals and
//! the checkout status machine.
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage,
//! no HTTP. Persistence and rendering live in `sketchshop-storefront`.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, catalog entries, cart and checkout types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
