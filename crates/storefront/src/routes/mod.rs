//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                     - Home page (`q` search, `tag` filter)
//! GET  /health               - Health check
//!
//! # Art
//! GET  /art/{id}             - Product detail
//! POST /art/{id}/add         - Add one to cart, redirect to checkout
//! GET  /artist/{name}        - Artist profile
//!
//! # Checkout
//! GET  /checkout             - Cart, shipping selector and totals (`shipping`)
//! POST /checkout/pay         - Start simulated payment
//!
//! # Cart badge
//! GET  /cart/count           - Cart count badge (fragment)
//! GET  /cart/events          - Cart count updates (server-sent events)
//! ```

pub mod artists;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use std::time::Duration;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::error::AppError;
use crate::middleware::{create_session_layer, request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the art (product) routes router.
pub fn art_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/add", post(products::add))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/pay", post(checkout::pay))
}

/// Create the cart badge routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/count", get(cart::count))
        .route("/events", get(cart::events))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .nest("/art", art_routes())
        .route("/artist/{name}", get(artists::show))
        .nest("/checkout", checkout_routes())
        .nest("/cart", cart_routes())
        .fallback(not_found)
}

/// Build the complete application with its middleware stack.
///
/// Sentry layers are added by the binary so tests run without a client.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .merge(routes())
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}
