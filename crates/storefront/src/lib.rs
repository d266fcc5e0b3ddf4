//! SketchShop storefront library.
//!
//! Server-rendered storefront for the sketch catalog: browsing, filtering,
//! product and artist pages, and a simulated checkout over a per-shopper
//! cart kept in local key-value storage. Exposed as a library so the
//! integration tests can drive the full router in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
