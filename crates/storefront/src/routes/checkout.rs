//! Checkout flow handlers.
//!
//! Collects shipping and payment form data, validates it server-side, then
//! simulates payment processing with a timer before clearing the cart and
//! redirecting to the confirmation page. No payment provider is ever
//! contacted.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use resonant_harmony_core::{Email, cart::CartState};

use crate::filters;
use crate::models::session_keys;
use crate::routes::cart::{CartView, load_cart};
use crate::state::AppState;

/// Flat shipping cost applied to every order.
const SHIPPING_COST: Decimal = Decimal::from_parts(500, 0, 0, false, 2); // 5.00

/// Tax rate applied to the subtotal (8%).
const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2); // 0.08

/// Order cost summary rendered next to the form.
#[derive(Clone)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub taxes: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// Compute the summary from the current cart.
    #[must_use]
    pub fn from_cart(cart: &CartState) -> Self {
        let subtotal = cart.total_price();
        let taxes = subtotal * TAX_RATE;
        Self {
            subtotal,
            shipping: SHIPPING_COST,
            taxes,
            total: subtotal + SHIPPING_COST + taxes,
        }
    }
}

/// Checkout form data (shipping + simulated payment).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    pub email: String,
    pub shipping_name: String,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_zip: String,
    pub card_name: String,
    pub card_number: String,
    pub card_expiry: String,
    pub card_cvc: String,
}

/// Validate the checkout form without contacting any backend.
///
/// Returns the first rejection, mirroring the inline form validation of the
/// checkout page: the store is never touched when validation fails.
///
/// # Errors
///
/// Returns a human-readable description of the first invalid field.
pub fn validate(form: &CheckoutForm) -> Result<(), String> {
    Email::parse(&form.email).map_err(|e| format!("Email: {e}"))?;

    if form.shipping_name.trim().len() < 2 {
        return Err("Full name must be at least 2 characters".to_owned());
    }
    if form.shipping_address.trim().len() < 5 {
        return Err("Street address must be at least 5 characters".to_owned());
    }
    if form.shipping_city.trim().len() < 2 {
        return Err("City must be at least 2 characters".to_owned());
    }
    if form.shipping_state.trim().len() < 2 {
        return Err("State must be at least 2 characters".to_owned());
    }
    if form.shipping_zip.trim().len() < 5 {
        return Err("ZIP code must be at least 5 characters".to_owned());
    }
    if form.card_name.trim().len() < 2 {
        return Err("Name on card must be at least 2 characters".to_owned());
    }
    if form.card_number.len() != 16 || !form.card_number.chars().all(|c| c.is_ascii_digit()) {
        return Err("Card number must be 16 digits".to_owned());
    }
    if !is_valid_expiry(&form.card_expiry) {
        return Err("Expiry must be in MM/YY format".to_owned());
    }
    if !(3..=4).contains(&form.card_cvc.len())
        || !form.card_cvc.chars().all(|c| c.is_ascii_digit())
    {
        return Err("CVC must be 3 or 4 digits".to_owned());
    }

    Ok(())
}

/// `MM/YY` with a month between 01 and 12.
fn is_valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 || !year.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}

// =============================================================================
// Templates
// =============================================================================

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub summary: OrderSummary,
    pub error: Option<String>,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate;

// =============================================================================
// Handlers
// =============================================================================

/// Display the checkout form; an empty cart is bounced back to the cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Response {
    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    let summary = OrderSummary::from_cart(&cart);
    CheckoutTemplate {
        cart: CartView::from(&cart),
        summary,
        error: None,
    }
    .into_response()
}

/// Place the order: validate, simulate processing, clear the cart, redirect.
///
/// Validation failures re-render the form with a notice and never reach the
/// processing step. Processing failures do not exist in the simulation; the
/// only wait is the configured timer.
#[instrument(skip(state, session, form))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Response {
    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    if let Err(message) = validate(&form) {
        let summary = OrderSummary::from_cart(&cart);
        return CheckoutTemplate {
            cart: CartView::from(&cart),
            summary,
            error: Some(message),
        }
        .into_response();
    }

    // Simulated payment processing.
    tokio::time::sleep(state.config().checkout_processing).await;

    if let Err(e) = session
        .remove::<Vec<resonant_harmony_core::cart::CartItem>>(session_keys::CART_ITEMS)
        .await
    {
        tracing::error!("Failed to clear cart after checkout: {e}");
    }

    tracing::info!(total = %OrderSummary::from_cart(&cart).total, "Order placed");
    Redirect::to("/order-confirmation").into_response()
}

/// Display the order confirmation page.
#[instrument]
pub async fn confirmation() -> impl IntoResponse {
    ConfirmationTemplate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            email: "customer@example.com".to_owned(),
            shipping_name: "Ada Lovelace".to_owned(),
            shipping_address: "12 Harmony Lane".to_owned(),
            shipping_city: "Portland".to_owned(),
            shipping_state: "OR".to_owned(),
            shipping_zip: "97201".to_owned(),
            card_name: "Ada Lovelace".to_owned(),
            card_number: "4242424242424242".to_owned(),
            card_expiry: "04/27".to_owned(),
            card_cvc: "123".to_owned(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate(&valid_form()).is_ok());
    }

    #[test]
    fn test_bad_email_rejected() {
        let form = CheckoutForm {
            email: "not-an-email".to_owned(),
            ..valid_form()
        };
        assert!(validate(&form).is_err());
    }

    #[test]
    fn test_short_card_number_rejected() {
        let form = CheckoutForm {
            card_number: "4242".to_owned(),
            ..valid_form()
        };
        assert!(validate(&form).is_err());
    }

    #[test]
    fn test_non_digit_card_number_rejected() {
        let form = CheckoutForm {
            card_number: "4242-4242-4242-42".to_owned(),
            ..valid_form()
        };
        assert!(validate(&form).is_err());
    }

    #[test]
    fn test_expiry_format() {
        assert!(is_valid_expiry("01/26"));
        assert!(is_valid_expiry("12/30"));
        assert!(!is_valid_expiry("13/26"));
        assert!(!is_valid_expiry("1/26"));
        assert!(!is_valid_expiry("0426"));
        assert!(!is_valid_expiry("04/2026"));
    }

    #[test]
    fn test_cvc_length() {
        for (cvc, ok) in [("123", true), ("1234", true), ("12", false), ("12a", false)] {
            let form = CheckoutForm {
                card_cvc: cvc.to_owned(),
                ..valid_form()
            };
            assert_eq!(validate(&form).is_ok(), ok, "cvc {cvc}");
        }
    }

    #[test]
    fn test_order_summary_totals() {
        use resonant_harmony_core::cart::{CartAction, reduce};
        use resonant_harmony_core::{Price, Product, ProductId, ProductTag, Slug};

        let product = Product {
            id: ProductId::generate(),
            slug: Slug::from_name("Zen Harmony Bowl"),
            name: "Zen Harmony Bowl".to_owned(),
            description: String::new(),
            price: Price::parse("100.00").expect("valid price"),
            image_url: String::new(),
            image_hint: String::new(),
            audio_url: String::new(),
            tag: ProductTag::SingingBowl,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let cart = reduce(CartState::default(), CartAction::AddItem(product));
        let summary = OrderSummary::from_cart(&cart);

        assert_eq!(summary.subtotal, Decimal::new(10000, 2));
        assert_eq!(summary.shipping, Decimal::new(500, 2));
        assert_eq!(summary.taxes, Decimal::new(800, 2));
        assert_eq!(summary.total, Decimal::new(11300, 2));
    }
}
