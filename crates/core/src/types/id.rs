//! Newtype keys for type-safe catalog references.
//!
//! Use the `define_key!` macro to create string-backed key wrappers that
//! prevent accidentally mixing product ids with artist names.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe string key wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use sketchshop_core::define_key;
/// define_key!(SkuKey);
/// define_key!(ShelfKey);
///
/// let sku = SkuKey::new("sk-001");
/// assert_eq!(sku.as_str(), "sk-001");
///
/// // These are different types, so this won't compile:
/// // let _: ShelfKey = sku;
/// ```
#[macro_export]
macro_rules! define_key {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new key from anything string-like.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_key!(ProductId);
define_key!(ArtistName);

/// Anonymous shopper identifier, kept in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopperId(Uuid);

impl ShopperId {
    /// Generate a fresh random shopper id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ShopperId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display_and_eq() {
        let id = ProductId::new("sk-001");
        assert_eq!(id.to_string(), "sk-001");
        assert_eq!(id, ProductId::from("sk-001"));
    }

    #[test]
    fn test_product_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::new("sk-002")).unwrap_or_default();
        assert_eq!(json, "\"sk-002\"");
    }

    #[test]
    fn test_shopper_id_display_is_simple_hex() {
        let id = ShopperId::from_uuid(Uuid::from_u128(255));
        assert_eq!(id.to_string(), "000000000000000000000000000000ff");
    }

    #[test]
    fn test_generated_shopper_ids_differ() {
        assert_ne!(ShopperId::generate(), ShopperId::generate());
    }
}
