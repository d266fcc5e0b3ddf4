//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions over an expiring moka cache)
//! 5. Security headers (CSP, frame and referrer policy)
//!
//! Handlers resolve the visitor's cart through the [`CurrentShopper`]
//! extractor, which reads the shopper id from the session.

pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod session_store;
pub mod shopper;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use session_store::MokaSessionStore;
pub use shopper::CurrentShopper;
