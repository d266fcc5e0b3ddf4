//! Shipping tiers and checkout totals.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::cart::Cart;
use super::price::Price;

/// Delivery option chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShippingTier {
    #[default]
    Standard,
    Express,
}

impl ShippingTier {
    /// Every tier, in the order offered to shoppers.
    pub const ALL: [Self; 2] = [Self::Standard, Self::Express];

    /// Fixed shipping cost for the tier.
    #[must_use]
    pub fn cost(self) -> Price {
        match self {
            Self::Standard => Price::from_dollars(5),
            Self::Express => Price::from_dollars(10),
        }
    }

    /// Form value for the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Express => "Express",
        }
    }
}

impl fmt::Display for ShippingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown shipping tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shipping tier: {0}")]
pub struct UnknownShippingTier(pub String);

impl FromStr for ShippingTier {
    type Err = UnknownShippingTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            _ => Err(UnknownShippingTier(s.to_string())),
        }
    }
}

/// Canonical checkout amounts for a cart and shipping tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl CheckoutSummary {
    /// Compute subtotal, shipping and total in exact arithmetic.
    #[must_use]
    pub fn compute(cart: &Cart, tier: ShippingTier) -> Self {
        let subtotal = cart.subtotal();
        let shipping = tier.cost();
        Self {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}
