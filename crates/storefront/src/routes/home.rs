//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use sketchshop_core::{Price, Product};
use tracing::instrument;

use crate::catalog::TagFilter;
use crate::filters;
use crate::middleware::CurrentShopper;
use crate::state::AppState;

/// Search and tag filter from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub q: Option<String>,
    pub tag: Option<String>,
}

/// Product card display data, shared with the artist page.
#[derive(Clone)]
pub struct ProductCardView {
    pub href: String,
    pub title: String,
    pub artist: String,
    pub image: String,
    pub price: Price,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            href: format!("/art/{}", urlencoding::encode(product.id.as_str())),
            title: product.title.clone(),
            artist: product.artist.to_string(),
            image: product.image.clone(),
            price: product.price,
        }
    }
}

/// One entry of the tag sidebar.
#[derive(Clone)]
pub struct TagView {
    pub label: String,
    pub href: String,
    pub selected: bool,
}

impl TagView {
    fn new(label: &str, value: &str, query: &str, selected: &TagFilter) -> Self {
        let mut href = format!("/?tag={}", urlencoding::encode(value));
        if !query.is_empty() {
            href.push_str("&q=");
            href.push_str(&urlencoding::encode(query));
        }

        Self {
            label: label.to_string(),
            href,
            selected: selected.as_str() == value,
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub cart_count: u32,
    pub query: String,
    pub tag: String,
    pub tags: Vec<TagView>,
    pub products: Vec<ProductCardView>,
}

/// Display the catalog filtered by search text and tag.
#[instrument(skip(state, shopper))]
pub async fn home(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Query(params): Query<HomeQuery>,
) -> impl IntoResponse {
    let query = params.q.unwrap_or_default();
    let filter = TagFilter::parse(params.tag.as_deref());
    let catalog = state.catalog();

    let products: Vec<ProductCardView> = catalog
        .products_matching(&query, &filter)
        .into_iter()
        .map(ProductCardView::from)
        .collect();
    tracing::debug!(results = products.len(), "Filtered catalog");

    let mut tags = vec![TagView::new("All", TagFilter::ALL, &query, &filter)];
    tags.extend(
        catalog
            .tags()
            .into_iter()
            .map(|tag| TagView::new(tag, tag, &query, &filter)),
    );

    HomeTemplate {
        cart_count: shopper.cart().item_count(),
        tag: filter.as_str().to_string(),
        query,
        tags,
        products,
    }
}
