//! Cart badge route handlers.
//!
//! The header badge is rendered with every page and kept current by
//! `static/js/cart-badge.js`, which listens on `/cart/events`.

use std::convert::Infallible;

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{
    Sse,
    sse::{Event, KeepAlive},
};
use tracing::instrument;

use crate::middleware::CurrentShopper;

/// SSE event name carrying the cart item count.
pub const CART_COUNT_EVENT: &str = "cart-count";

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub cart_count: u32,
}

/// Cart count badge fragment.
#[instrument(skip(shopper))]
pub async fn count(CurrentShopper(shopper): CurrentShopper) -> CartCountTemplate {
    CartCountTemplate {
        cart_count: shopper.cart().item_count(),
    }
}

/// Stream the cart item count, once now and again after every change.
///
/// The stream ends when the shopper is evicted from memory.
#[instrument(skip(shopper), fields(shopper = %shopper.id()))]
pub async fn events(
    CurrentShopper(shopper): CurrentShopper,
) -> Sse<impl futures::Stream<Item = Result<Event, Infallible>>> {
    let mut changes = shopper.cart().subscribe();
    drop(shopper);

    let stream = async_stream::stream! {
        loop {
            let count = changes.borrow_and_update().item_count();
            yield Ok::<_, Infallible>(Event::default().event(CART_COUNT_EVENT).data(count.to_string()));

            if changes.changed().await.is_err() {
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
