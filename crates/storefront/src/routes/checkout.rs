//! Checkout route handlers.
//!
//! Shipping selection travels in the query string so totals can be
//! recomputed on every render. Payment is simulated; while it runs the page
//! refreshes itself until the flow reaches `Success`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::Query, response::Redirect};
use serde::Deserialize;
use sketchshop_core::{
    CartLineItem, CheckoutError, CheckoutStatus, CheckoutSummary, INR, Price, ShippingTier,
    UnknownShippingTier,
};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CurrentShopper;

/// Seconds between automatic reloads while a payment is processing.
const PROCESSING_REFRESH_SECS: u32 = 1;

/// Shipping tier selected on the checkout page.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutQuery {
    pub shipping: Option<String>,
}

/// Pay form data.
#[derive(Debug, Default, Deserialize)]
pub struct PayForm {
    pub shipping: Option<String>,
}

/// One cart line on the checkout page.
#[derive(Clone)]
pub struct CheckoutLineView {
    pub title: String,
    pub qty: u32,
    pub total: Price,
}

impl From<&CartLineItem> for CheckoutLineView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            title: item.title.clone(),
            qty: item.qty,
            total: item.line_total(),
        }
    }
}

/// Entry of the shipping selector.
#[derive(Clone)]
pub struct ShippingOptionView {
    pub value: &'static str,
    pub label: String,
    pub selected: bool,
}

impl ShippingOptionView {
    fn new(tier: ShippingTier, selected: ShippingTier) -> Self {
        Self {
            value: tier.as_str(),
            label: format!("{} ({})", tier.label(), INR.convert(tier.cost())),
            selected: tier == selected,
        }
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart_count: u32,
    pub lines: Vec<CheckoutLineView>,
    pub shipping: &'static str,
    pub shipping_options: Vec<ShippingOptionView>,
    pub subtotal: Price,
    pub shipping_cost: Price,
    pub total: Price,
    pub is_empty: bool,
    pub can_pay: bool,
    pub processing: bool,
    pub success: bool,
    pub refresh_secs: u32,
}

/// Parse the selected tier; missing or empty selects the default.
fn shipping_tier(value: Option<&str>) -> Result<ShippingTier> {
    match value {
        None | Some("") => Ok(ShippingTier::default()),
        Some(value) => value
            .parse()
            .map_err(|e: UnknownShippingTier| AppError::BadRequest(e.to_string())),
    }
}

/// Checkout page URL for a shipping tier.
fn checkout_href(tier: ShippingTier) -> String {
    format!("/checkout?shipping={tier}")
}

/// Display the checkout page.
#[instrument(skip(shopper), fields(shopper = %shopper.id()))]
pub async fn show(
    CurrentShopper(shopper): CurrentShopper,
    Query(params): Query<CheckoutQuery>,
) -> Result<CheckoutTemplate> {
    let tier = shipping_tier(params.shipping.as_deref())?;
    let cart = shopper.cart().snapshot();
    let status = shopper.checkout_status();
    let summary = CheckoutSummary::compute(&cart, tier);

    Ok(CheckoutTemplate {
        cart_count: cart.item_count(),
        lines: cart.items().iter().map(CheckoutLineView::from).collect(),
        shipping: tier.as_str(),
        shipping_options: ShippingTier::ALL
            .into_iter()
            .map(|option| ShippingOptionView::new(option, tier))
            .collect(),
        subtotal: summary.subtotal,
        shipping_cost: summary.shipping,
        total: summary.total,
        is_empty: cart.is_empty(),
        can_pay: status.can_pay(),
        processing: status.is_processing(),
        success: status.is_success(),
        refresh_secs: PROCESSING_REFRESH_SECS,
    })
}

/// Start the simulated payment and return to the checkout page.
///
/// A repeated submission while the payment runs is ignored.
#[instrument(skip(shopper, form), fields(shopper = %shopper.id()))]
pub async fn pay(
    CurrentShopper(shopper): CurrentShopper,
    Form(form): Form<PayForm>,
) -> Result<Redirect> {
    let tier = shipping_tier(form.shipping.as_deref())?;

    match shopper.pay() {
        Ok(CheckoutStatus::Processing) => {
            add_breadcrumb("checkout", "Payment started", Some(&[("shipping", tier.as_str())]));
        }
        Ok(status) => tracing::debug!(?status, "Payment request settled"),
        Err(CheckoutError::AlreadyProcessing) => {
            tracing::info!("Ignoring repeated pay request");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to(&checkout_href(tier)))
}
