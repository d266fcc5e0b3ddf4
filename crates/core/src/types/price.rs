//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog and cart amounts are stored in US dollars as exact decimals.
//! Shoppers see prices in rupees: every display point converts the canonical
//! dollar amount with [`DisplayCurrency::convert`] and rounds once, so display
//! rounding never feeds back into arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in the store's canonical currency (USD).
///
/// Serialized as a bare JSON number so stored carts stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    /// Amount in the currency's standard unit (dollars, not cents).
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self {
        amount: Decimal::ZERO,
    };

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self {
            amount: Decimal::new(cents, 2),
        }
    }

    /// Create a price from whole dollars.
    #[must_use]
    pub fn from_dollars(dollars: i64) -> Self {
        Self {
            amount: Decimal::from(dollars),
        }
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// This price multiplied by a quantity, or `None` on overflow.
    #[must_use]
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(Self::new)
    }

    /// Sum of two prices, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.amount.checked_add(rhs.amount).map(Self::new)
    }

    /// This price multiplied by a quantity, saturating at the decimal bounds.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount.saturating_mul(Decimal::from(quantity)))
    }
}

/// Saturates at the decimal bounds instead of panicking.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount.saturating_add(rhs.amount))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.amount)
    }
}

/// A currency used only for presenting prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayCurrency {
    /// Symbol prefixed to converted amounts.
    pub symbol: &'static str,
    /// Display units per canonical unit.
    pub rate: u32,
}

/// Indian rupees at the store's fixed demo rate.
pub const INR: DisplayCurrency = DisplayCurrency {
    symbol: "₹",
    rate: 83,
};

impl DisplayCurrency {
    /// Convert a canonical price, or `None` if the converted amount overflows.
    #[must_use]
    pub fn checked_convert(&self, price: Price) -> Option<DisplayAmount> {
        let converted = price.amount.checked_mul(Decimal::from(self.rate))?;
        Some(self.rounded(converted))
    }

    /// Convert a canonical price, rounding half away from zero to whole units.
    ///
    /// Amounts too large to convert saturate at the decimal bounds.
    #[must_use]
    pub fn convert(&self, price: Price) -> DisplayAmount {
        self.rounded(price.amount.saturating_mul(Decimal::from(self.rate)))
    }

    fn rounded(&self, converted: Decimal) -> DisplayAmount {
        DisplayAmount {
            units: converted
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .normalize(),
            symbol: self.symbol,
        }
    }
}

/// A converted, rounded amount ready for display. Never used in arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayAmount {
    units: Decimal,
    symbol: &'static str,
}

impl DisplayAmount {
    /// Whole display units.
    #[must_use]
    pub const fn units(&self) -> Decimal {
        self.units
    }
}

impl fmt::Display for DisplayAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.symbol, self.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_rounds_to_whole_units() {
        let amount = INR.convert(Price::from_dollars(75));
        assert_eq!(amount.units(), Decimal::from(6225));
        assert_eq!(amount.to_string(), "₹6225");
    }

    #[test]
    fn test_convert_rounds_half_away_from_zero() {
        // 0.50 * 83 = 41.5
        assert_eq!(INR.convert(Price::from_cents(50)).to_string(), "₹42");
        // 0.01 * 83 = 0.83
        assert_eq!(INR.convert(Price::from_cents(1)).to_string(), "₹1");
        // 0.006 * 83 = 0.498
        assert_eq!(
            INR.convert(Price::new(Decimal::new(6, 3))).to_string(),
            "₹0"
        );
    }

    #[test]
    fn test_conversion_is_not_chained() {
        // Three items at $0.50 each: 1.50 * 83 = 124.5 -> 125,
        // whereas rounding each item first would give 42 * 3 = 126.
        let line = Price::from_cents(50).times(3);
        assert_eq!(INR.convert(line).to_string(), "₹125");
    }

    #[test]
    fn test_price_sum_and_times() {
        let total: Price = [Price::from_dollars(35).times(2), Price::from_dollars(5)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_dollars(75));
        assert_eq!(total.to_string(), "$75.00");
    }

    #[test]
    fn test_overflowing_arithmetic_saturates() {
        let huge = Price::new(Decimal::MAX);
        assert_eq!(huge.checked_times(2), None);
        assert_eq!(huge.checked_add(Price::from_dollars(1)), None);
        assert_eq!(INR.checked_convert(huge), None);

        assert_eq!(huge.times(2), huge);
        assert_eq!(huge + Price::from_dollars(1), huge);
        assert_eq!(INR.convert(huge).units(), Decimal::MAX);
    }

    #[test]
    fn test_checked_arithmetic_within_range() {
        assert_eq!(
            Price::from_dollars(35).checked_times(2),
            Some(Price::from_dollars(70))
        );
        assert_eq!(
            INR.checked_convert(Price::from_dollars(5)).map(|a| a.to_string()),
            Some("₹415".to_string())
        );
        assert!(Price::from_dollars(-1).is_negative());
        assert!(!Price::ZERO.is_negative());
    }

    #[test]
    fn test_price_serializes_as_number() {
        let json = serde_json::to_string(&Price::from_dollars(35)).unwrap_or_default();
        let back: Price = serde_json::from_str("35.0").unwrap_or_default();
        assert_eq!(back, Price::from_dollars(35));
        assert!(json.starts_with("35"));
        assert!(!json.contains('"'));
    }
}
