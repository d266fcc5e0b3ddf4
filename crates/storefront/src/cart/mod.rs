//! Shopper cart persistence and the owned cart store.
//!
//! - [`repository`] - `load`/`save`/`remove` of the cart over a key-value slot
//! - [`store`] - the single in-memory cart per shopper with change notification

pub mod repository;
pub mod store;

pub use repository::{CART_KEY, CartRepository, KeyValueCartRepository};
pub use store::CartStore;
