//! Catalog entries: products and the artists they are attributed to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::{ArtistName, ProductId};
use super::price::Price;

/// A purchasable sketch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Name of the attributed artist (key into the artist directory).
    pub artist: ArtistName,
    pub price: Price,
    pub description: String,
    /// Paper size, e.g. "11 x 14 in".
    pub dims: String,
    /// Image URL. Never fetched by the server.
    pub image: String,
    /// Informational stock count. Checkout does not decrement it.
    pub available: u32,
    pub tags: Vec<String>,
}

impl Product {
    /// Whether the product carries the given tag (exact match).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match against title, description and artist.
    ///
    /// The fields are matched as one concatenated string, so a query may
    /// span the boundary between two of them.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let haystack = format!("{}{}{}", self.title, self.description, self.artist).to_lowercase();
        haystack.contains(&query.to_lowercase())
    }
}

/// An artist profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: ArtistName,
    pub bio: String,
    /// Avatar image URL.
    pub avatar: String,
    /// Social network name to profile URL, e.g. `instagram`.
    #[serde(default)]
    pub social: BTreeMap<String, String>,
}
