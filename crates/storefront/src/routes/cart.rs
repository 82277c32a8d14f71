//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The line items live in the session as a full snapshot under a fixed key:
//! every mutation loads the snapshot, runs the pure reducer, and writes the
//! whole sequence back.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use resonant_harmony_core::{
    ProductId,
    cart::{CartAction, CartItem, CartState, reduce},
};

use crate::filters;
use crate::models::session_keys;
use crate::routes::products::load_product;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart snapshot from the session.
///
/// A missing or unreadable snapshot degrades to an empty cart; corruption is
/// logged, never propagated.
pub async fn load_cart(session: &Session) -> CartState {
    match session.get::<Vec<CartItem>>(session_keys::CART_ITEMS).await {
        Ok(Some(items)) => reduce(CartState::default(), CartAction::Replace(items)),
        Ok(None) => CartState::default(),
        Err(e) => {
            tracing::warn!("Failed to read cart snapshot from session: {e}");
            CartState::default()
        }
    }
}

/// Persist the full cart snapshot to the session.
async fn save_cart(
    session: &Session,
    cart: &CartState,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART_ITEMS, &cart.items).await
}

// =============================================================================
// Views
// =============================================================================

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: ProductId,
    pub name: String,
    pub image_url: String,
    pub quantity: u32,
    pub price: Decimal,
    pub line_total: Decimal,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub subtotal: Decimal,
    pub item_count: u32,
}

impl From<&CartState> for CartView {
    fn from(cart: &CartState) -> Self {
        Self {
            items: cart
                .items
                .iter()
                .map(|item| CartLineView {
                    id: item.id,
                    name: item.name.clone(),
                    image_url: item.image_url.clone(),
                    quantity: item.quantity,
                    price: item.price.amount(),
                    line_total: item.line_total(),
                })
                .collect(),
            subtotal: cart.total_price(),
            item_count: cart.total_items(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartShowTemplate {
        cart: CartView::from(&cart),
    }
}

/// Add item to cart (HTMX).
///
/// Snapshots the product's name/price/image at add time and returns an HTMX
/// trigger to update the cart count badge.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let product = match load_product(&state, &form.product_id).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Html("<span class=\"error\">Product not found</span>"),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to load product for cart add: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<span class=\"error\">Error adding to cart</span>"),
            )
                .into_response();
        }
    };

    let cart = reduce(load_cart(&session).await, CartAction::AddItem(product));

    if let Err(e) = save_cart(&session, &cart).await {
        tracing::error!("Failed to save cart snapshot to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.total_items(),
        },
    )
        .into_response()
}

/// Update cart item quantity (HTMX). Quantity zero removes the line.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Response {
    let cart = reduce(
        load_cart(&session).await,
        CartAction::UpdateQuantity {
            id: form.product_id,
            quantity: form.quantity,
        },
    );

    if let Err(e) = save_cart(&session, &cart).await {
        tracing::error!("Failed to save cart snapshot to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Remove item from cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Response {
    let cart = reduce(
        load_cart(&session).await,
        CartAction::RemoveItem(form.product_id),
    );

    if let Err(e) = save_cart(&session, &cart).await {
        tracing::error!("Failed to save cart snapshot to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartCountTemplate {
        count: cart.total_items(),
    }
}
