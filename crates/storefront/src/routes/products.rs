//! Product detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use sketchshop_core::{Artist, Price, Product};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CurrentShopper;
use crate::state::AppState;

/// Product detail display data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub title: String,
    pub artist: String,
    pub artist_href: String,
    pub description: String,
    pub dims: String,
    pub image: String,
    pub price: Price,
    pub available: u32,
    pub tags: Vec<String>,
    pub add_action: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        let id = urlencoding::encode(product.id.as_str());
        Self {
            title: product.title.clone(),
            artist: product.artist.to_string(),
            artist_href: artist_href(product.artist.as_str()),
            description: product.description.clone(),
            dims: product.dims.clone(),
            image: product.image.clone(),
            price: product.price,
            available: product.available,
            tags: product.tags.clone(),
            add_action: format!("/art/{id}/add"),
        }
    }
}

/// "About the artist" panel on the detail page.
#[derive(Clone)]
pub struct ArtistSummaryView {
    pub name: String,
    pub bio: String,
    pub avatar: String,
    pub href: String,
}

impl From<&Artist> for ArtistSummaryView {
    fn from(artist: &Artist) -> Self {
        Self {
            name: artist.name.to_string(),
            bio: artist.bio.clone(),
            avatar: artist.avatar.clone(),
            href: artist_href(artist.name.as_str()),
        }
    }
}

/// Link to an artist profile.
pub(crate) fn artist_href(name: &str) -> String {
    format!("/artist/{}", urlencoding::encode(name))
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub cart_count: u32,
    pub product: ProductDetailView,
    pub artist: Option<ArtistSummaryView>,
}

/// Display product detail page.
#[instrument(skip(state, shopper))]
pub async fn show(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let catalog = state.catalog();
    let product = catalog
        .find_product(&id)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(ProductShowTemplate {
        cart_count: shopper.cart().item_count(),
        product: ProductDetailView::from(product),
        artist: catalog
            .find_artist(product.artist.as_str())
            .map(ArtistSummaryView::from),
    })
}

/// Add one unit of a product to the cart and continue to checkout.
#[instrument(skip(state, shopper))]
pub async fn add(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let product = state
        .catalog()
        .find_product(&id)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
    shopper.add_to_cart(product)?;

    Ok(Redirect::to("/checkout"))
}
