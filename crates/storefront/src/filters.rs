//! Custom Askama template filters.

use std::borrow::Borrow;
use std::fmt::Display;

use sketchshop_core::{DisplayAmount, INR, Price};

/// Shows a canonical price in rupees, rounded to whole units.
///
/// View models carry [`Price`] values and only templates convert them, so
/// arithmetic never sees a rounded amount.
///
/// Usage in templates: `{{ product.price|inr }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn inr(price: impl Borrow<Price>, _env: &dyn askama::Values) -> askama::Result<DisplayAmount> {
    Ok(INR.convert(*price.borrow()))
}

/// Returns the current year for the footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use askama::Template;
    use sketchshop_core::Price;

    use crate::filters;

    #[derive(Template)]
    #[template(source = "{{ price|inr }} / {{ total|inr }}", ext = "html")]
    struct PriceLine {
        price: Price,
        total: Price,
    }

    #[test]
    fn test_inr_filter_converts_and_rounds() {
        let line = PriceLine {
            price: Price::from_cents(50),
            total: Price::from_dollars(75),
        };
        assert_eq!(line.render().unwrap(), "₹42 / ₹6225");
    }
}
