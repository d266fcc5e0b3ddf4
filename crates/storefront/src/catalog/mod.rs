//! The read-only product catalog and artist directory.
//!
//! Built once at startup and shared through [`crate::state::AppState`].
//! All lookups return entries in catalog insertion order.

mod data;

use std::collections::HashMap;

use sketchshop_core::{Artist, ArtistName, Product};

/// Tag filter selected on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    /// The `all` wildcard.
    #[default]
    All,
    /// Exact tag membership.
    Tag(String),
}

impl TagFilter {
    /// Wildcard value used in query strings.
    pub const ALL: &'static str = "all";

    /// Parse a query-string value. Missing, empty and `all` are the wildcard.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("" | Self::ALL) => Self::All,
            Some(tag) => Self::Tag(tag.to_string()),
        }
    }

    /// Query-string value for this filter.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Tag(tag) => tag,
        }
    }

    fn accepts(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => product.has_tag(tag),
        }
    }
}

/// Immutable catalog of products and artists.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    artists: HashMap<ArtistName, Artist>,
}

impl Catalog {
    /// Build a catalog from products and artist profiles.
    #[must_use]
    pub fn new(products: Vec<Product>, artists: impl IntoIterator<Item = Artist>) -> Self {
        Self {
            products,
            artists: artists
                .into_iter()
                .map(|artist| (artist.name.clone(), artist))
                .collect(),
        }
    }

    /// The store's built-in demo catalog.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(data::products(), data::artists())
    }

    /// All products in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    #[must_use]
    pub fn find_artist(&self, name: &str) -> Option<&Artist> {
        self.artists.get(&ArtistName::new(name))
    }

    /// Products attributed to `name`.
    #[must_use]
    pub fn products_by_artist(&self, name: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.artist.as_str() == name)
            .collect()
    }

    /// Products matching both the free-text query and the tag filter.
    #[must_use]
    pub fn products_matching(&self, query: &str, tag: &TagFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.matches_query(query) && tag.accepts(p))
            .collect()
    }

    /// Distinct tags in order of first appearance.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.products.iter().flat_map(|p| &p.tags) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }
        tags
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_every_product_is_found_by_id() {
        let catalog = Catalog::demo();
        for product in catalog.products() {
            assert_eq!(catalog.find_product(product.id.as_str()), Some(product));
        }
    }

    #[test]
    fn test_unknown_lookups_are_none() {
        let catalog = Catalog::demo();
        assert!(catalog.find_product("unknown-id").is_none());
        assert!(catalog.find_artist("Nobody").is_none());
        assert!(catalog.products_by_artist("Nobody").is_empty());
    }

    #[test]
    fn test_every_product_artist_has_a_profile() {
        let catalog = Catalog::demo();
        for product in catalog.products() {
            assert!(catalog.find_artist(product.artist.as_str()).is_some());
        }
    }

    #[test]
    fn test_products_by_artist() {
        let catalog = Catalog::demo();
        assert_eq!(ids(&catalog.products_by_artist("M. Iyer")), ["sk-003"]);
    }

    #[test]
    fn test_query_matches_title_description_and_artist() {
        let catalog = Catalog::demo();
        let all = TagFilter::All;
        assert_eq!(ids(&catalog.products_matching("pines", &all)), ["sk-001"]);
        assert_eq!(ids(&catalog.products_matching("ALLEY", &all)), ["sk-002"]);
        assert_eq!(ids(&catalog.products_matching("iyer", &all)), ["sk-003"]);
        assert_eq!(catalog.products_matching("", &all).len(), 3);
        assert!(catalog.products_matching("watercolour", &all).is_empty());
    }

    #[test]
    fn test_tag_filter_is_exact() {
        let catalog = Catalog::demo();
        let ink = TagFilter::Tag("ink".to_string());
        assert_eq!(ids(&catalog.products_matching("", &ink)), ["sk-002"]);
        let partial = TagFilter::Tag("in".to_string());
        assert!(catalog.products_matching("", &partial).is_empty());
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let catalog = Catalog::demo();
        let queries = ["", "sketch", "charcoal", "a", "verma", "zzz"];
        let mut tags = vec![TagFilter::All];
        tags.extend(catalog.tags().into_iter().map(|t| TagFilter::Tag(t.to_string())));

        for query in queries {
            let by_query = ids(&catalog.products_matching(query, &TagFilter::All));
            for tag in &tags {
                let by_tag = ids(&catalog.products_matching("", tag));
                for id in ids(&catalog.products_matching(query, tag)) {
                    assert!(by_query.contains(&id) && by_tag.contains(&id));
                }
            }
        }

        let pencil = TagFilter::Tag("pencil".to_string());
        assert!(catalog.products_matching("urban", &pencil).is_empty());
    }

    #[test]
    fn test_tags_in_first_appearance_order() {
        let catalog = Catalog::demo();
        assert_eq!(
            catalog.tags(),
            ["landscape", "pencil", "urban", "ink", "portrait", "charcoal"]
        );
    }

    #[test]
    fn test_tag_filter_parse() {
        assert_eq!(TagFilter::parse(None), TagFilter::All);
        assert_eq!(TagFilter::parse(Some("")), TagFilter::All);
        assert_eq!(TagFilter::parse(Some("all")), TagFilter::All);
        assert_eq!(
            TagFilter::parse(Some("ink")),
            TagFilter::Tag("ink".to_string())
        );
        assert_eq!(TagFilter::Tag("ink".to_string()).as_str(), "ink");
    }
}
