//! Session middleware configuration.
//!
//! Sessions only carry the shopper id; cart contents live in cart storage.

use tower_sessions::{Expiry, SessionManagerLayer};

use super::session_store::MokaSessionStore;
use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "sketchshop_session";

/// Session expiry time in seconds (30 days).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session layer backed by an in-process store.
///
/// Records are dropped once their expiry passes. A restart issues new
/// session ids; carts written to the file store under the old shopper ids
/// are left on disk.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaSessionStore> {
    SessionManagerLayer::new(MokaSessionStore::new())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
