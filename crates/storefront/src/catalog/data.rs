//! Built-in demo catalog.

use std::collections::BTreeMap;

use sketchshop_core::{Artist, ArtistName, Price, Product, ProductId};

struct ProductSeed {
    id: &'static str,
    title: &'static str,
    artist: &'static str,
    price_cents: i64,
    description: &'static str,
    dims: &'static str,
    image: &'static str,
    available: u32,
    tags: &'static [&'static str],
}

struct ArtistSeed {
    name: &'static str,
    bio: &'static str,
    avatar: &'static str,
    instagram: Option<&'static str>,
}

const PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        id: "sk-001",
        title: "Whispering Pines — Pencil Sketch",
        artist: "A. Verma",
        price_cents: 3500,
        description: "Hand-drawn graphite sketch of a pine tree landscape.",
        dims: "11 x 14 in",
        image: "https://picsum.photos/seed/sk1/800/600?grayscale",
        available: 5,
        tags: &["landscape", "pencil"],
    },
    ProductSeed {
        id: "sk-002",
        title: "Urban Lines — Ink Sketch",
        artist: "R. Kapoor",
        price_cents: 4500,
        description: "High-contrast ink sketch of an alley and lamp posts.",
        dims: "12 x 16 in",
        image: "https://picsum.photos/seed/sk2/800/600?grayscale",
        available: 3,
        tags: &["urban", "ink"],
    },
    ProductSeed {
        id: "sk-003",
        title: "Portrait of a Doubter — Charcoal",
        artist: "M. Iyer",
        price_cents: 7500,
        description: "Charcoal portrait on toned paper.",
        dims: "9 x 12 in",
        image: "https://picsum.photos/seed/sk3/800/600?grayscale",
        available: 2,
        tags: &["portrait", "charcoal"],
    },
];

const ARTISTS: &[ArtistSeed] = &[
    ArtistSeed {
        name: "A. Verma",
        bio: "Aditi Verma is a fine-arts graduate specializing in nature sketches.",
        avatar: "https://i.pravatar.cc/150?img=3",
        instagram: Some("https://instagram.com/aditi.verma.art"),
    },
    ArtistSeed {
        name: "R. Kapoor",
        bio: "Rohan Kapoor's ink sketches explore city life and light.",
        avatar: "https://i.pravatar.cc/150?img=4",
        instagram: Some("https://instagram.com/rohan.kapoor.sketches"),
    },
    ArtistSeed {
        name: "M. Iyer",
        bio: "Meera Iyer works with charcoal and mixed media for expressive portraits.",
        avatar: "https://i.pravatar.cc/150?img=5",
        instagram: Some("https://instagram.com/meera.iyer.charcoal"),
    },
];

pub(super) fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            title: seed.title.to_string(),
            artist: ArtistName::new(seed.artist),
            price: Price::from_cents(seed.price_cents),
            description: seed.description.to_string(),
            dims: seed.dims.to_string(),
            image: seed.image.to_string(),
            available: seed.available,
            tags: seed.tags.iter().map(ToString::to_string).collect(),
        })
        .collect()
}

pub(super) fn artists() -> Vec<Artist> {
    ARTISTS
        .iter()
        .map(|seed| Artist {
            name: ArtistName::new(seed.name),
            bio: seed.bio.to_string(),
            avatar: seed.avatar.to_string(),
            social: seed
                .instagram
                .map(|url| BTreeMap::from([("instagram".to_string(), url.to_string())]))
                .unwrap_or_default(),
        })
        .collect()
}
