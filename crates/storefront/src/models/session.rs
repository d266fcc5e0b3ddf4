//! Session-related types.
//!
//! The session cookie only identifies the shopper; cart contents live in the
//! shopper's storage slot, not in the session record.

/// Session keys.
pub mod keys {
    /// Key for the anonymous shopper id.
    pub const SHOPPER_ID: &str = "shopper_id";
}
