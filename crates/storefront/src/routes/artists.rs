//! Artist profile route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use sketchshop_core::Artist;
use tracing::instrument;

use super::home::ProductCardView;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CurrentShopper;
use crate::state::AppState;

/// External profile link.
#[derive(Clone)]
pub struct SocialLinkView {
    pub label: String,
    pub url: String,
}

/// Artist profile display data.
#[derive(Clone)]
pub struct ArtistView {
    pub name: String,
    pub bio: String,
    pub avatar: String,
    pub social: Vec<SocialLinkView>,
}

impl From<&Artist> for ArtistView {
    fn from(artist: &Artist) -> Self {
        Self {
            name: artist.name.to_string(),
            bio: artist.bio.clone(),
            avatar: artist.avatar.clone(),
            social: artist
                .social
                .iter()
                .map(|(network, url)| SocialLinkView {
                    label: network_label(network),
                    url: url.clone(),
                })
                .collect(),
        }
    }
}

/// `instagram` -> `Instagram`.
fn network_label(network: &str) -> String {
    let mut chars = network.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Artist profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "artists/show.html")]
pub struct ArtistShowTemplate {
    pub cart_count: u32,
    pub artist: ArtistView,
    pub works: Vec<ProductCardView>,
}

/// Display an artist and the works attributed to them.
#[instrument(skip(state, shopper))]
pub async fn show(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Path(name): Path<String>,
) -> Result<ArtistShowTemplate> {
    let catalog = state.catalog();
    let artist = catalog
        .find_artist(&name)
        .ok_or_else(|| AppError::NotFound("Artist not found".to_string()))?;

    Ok(ArtistShowTemplate {
        cart_count: shopper.cart().item_count(),
        artist: ArtistView::from(artist),
        works: catalog
            .products_by_artist(&name)
            .into_iter()
            .map(ProductCardView::from)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_label() {
        assert_eq!(network_label("instagram"), "Instagram");
        assert_eq!(network_label(""), "");
    }
}
