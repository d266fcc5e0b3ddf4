//! Shopper extractor.
//!
//! Resolves the visitor's [`Shopper`] from the session, minting a fresh
//! shopper id on first contact.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use sketchshop_core::ShopperId;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session_keys;
use crate::services::Shopper;
use crate::state::AppState;

/// Extractor for the current visitor's cart and checkout state.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentShopper(shopper): CurrentShopper) -> impl IntoResponse {
///     format!("{} items", shopper.cart().item_count())
/// }
/// ```
pub struct CurrentShopper(pub Arc<Shopper>);

impl FromRequestParts<AppState> for CurrentShopper {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let id = shopper_id(session).await?;
        Ok(Self(state.shoppers().get(id).await))
    }
}

/// Read the shopper id from the session, assigning one if absent.
async fn shopper_id(session: &Session) -> Result<ShopperId, AppError> {
    let existing = session
        .get::<ShopperId>(session_keys::SHOPPER_ID)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding unreadable shopper id");
            None
        });

    if let Some(id) = existing {
        return Ok(id);
    }

    let id = ShopperId::generate();
    session
        .insert(session_keys::SHOPPER_ID, id)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store shopper id: {e}")))?;
    tracing::debug!(shopper = %id, "Assigned new shopper");
    Ok(id)
}
