//! Shopper cart: an ordered set of line items keyed by product id.
//!
//! The serialized form is a JSON array of `{id, title, price, qty}` records.
//! Deserialization validates that quantities are positive, ids unique and
//! prices non-negative, and that the checkout total converts to the display
//! currency without overflow. A cart read back from storage therefore upholds
//! the same invariants as one built through [`Cart::add_one`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::catalog::Product;
use super::checkout::ShippingTier;
use super::id::ProductId;
use super::price::{INR, Price};

/// One product entry in the cart with an aggregated quantity.
///
/// Title and price are snapshots taken when the product was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub qty: u32,
}

impl CartLineItem {
    /// Price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.qty)
    }
}

/// Errors found while validating a stored cart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartFormatError {
    /// A line item has quantity zero.
    #[error("line item {0} has zero quantity")]
    ZeroQuantity(ProductId),
    /// The same product appears on two lines.
    #[error("duplicate line item {0}")]
    DuplicateItem(ProductId),
    /// A line item's price is negative, or its total is out of range.
    #[error("line item {0} has an invalid price")]
    InvalidPrice(ProductId),
}

/// The shopper's pending selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.qty).sum()
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line if the product is already in the cart,
    /// otherwise appends a new line snapshotting the product's title and price.
    pub fn add_one(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            item.qty = item.qty.saturating_add(1);
            return;
        }

        self.items.push(CartLineItem {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            qty: 1,
        });
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Remove the units covered by a completed payment.
    ///
    /// `paid` is the cart as it was when payment began. Lines added since
    /// then, and extra units added to paid lines, stay in the cart.
    pub fn settle(&mut self, paid: &Self) {
        for paid_line in &paid.items {
            if let Some(item) = self.items.iter_mut().find(|item| item.id == paid_line.id) {
                item.qty = item.qty.saturating_sub(paid_line.qty);
            }
        }
        self.items.retain(|item| item.qty > 0);
    }

    /// Sum of price times quantity over all lines, in exact arithmetic.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Parse a stored cart.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the text is not a JSON array of line
    /// items or violates the cart invariants.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize for storage.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl TryFrom<Vec<CartLineItem>> for Cart {
    type Error = CartFormatError;

    fn try_from(items: Vec<CartLineItem>) -> Result<Self, Self::Error> {
        let most_shipping = ShippingTier::ALL
            .into_iter()
            .map(ShippingTier::cost)
            .max()
            .unwrap_or(Price::ZERO);

        let mut seen = HashSet::with_capacity(items.len());
        let mut running = most_shipping;
        for item in &items {
            if item.qty == 0 {
                return Err(CartFormatError::ZeroQuantity(item.id.clone()));
            }
            if !seen.insert(&item.id) {
                return Err(CartFormatError::DuplicateItem(item.id.clone()));
            }
            if item.price.is_negative() {
                return Err(CartFormatError::InvalidPrice(item.id.clone()));
            }
            running = item
                .price
                .checked_times(item.qty)
                .and_then(|line| running.checked_add(line))
                .filter(|total| INR.checked_convert(*total).is_some())
                .ok_or_else(|| CartFormatError::InvalidPrice(item.id.clone()))?;
        }
        Ok(Self { items })
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
