//! Wishlist route handlers.
//!
//! Same persistence contract as the cart: the saved set lives in the session
//! as a full snapshot under a fixed key, rewritten on every mutation.

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
    ProductId, Slug,
    wishlist::{WishlistAction, WishlistItem, WishlistState, reduce},
};

use crate::filters;
use crate::models::session_keys;
use crate::routes::products::load_product;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the wishlist snapshot from the session.
///
/// Missing or unreadable snapshots degrade to an empty wishlist.
pub async fn load_wishlist(session: &Session) -> WishlistState {
    match session
        .get::<Vec<WishlistItem>>(session_keys::WISHLIST_ITEMS)
        .await
    {
        Ok(Some(items)) => reduce(WishlistState::default(), WishlistAction::Replace(items)),
        Ok(None) => WishlistState::default(),
        Err(e) => {
            tracing::warn!("Failed to read wishlist snapshot from session: {e}");
            WishlistState::default()
        }
    }
}

/// Persist the full wishlist snapshot to the session.
async fn save_wishlist(
    session: &Session,
    wishlist: &WishlistState,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::WISHLIST_ITEMS, &wishlist.items)
        .await
}

// =============================================================================
// Views
// =============================================================================

/// Wishlist entry display data for templates.
#[derive(Clone)]
pub struct WishlistEntryView {
    pub id: ProductId,
    pub name: String,
    pub image_url: String,
    pub price: Decimal,
    pub slug: Slug,
}

impl From<&WishlistItem> for WishlistEntryView {
    fn from(item: &WishlistItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            image_url: item.image_url.clone(),
            price: item.price.amount(),
            slug: item.slug.clone(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Wishlist toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleWishlistForm {
    pub product_id: String,
}

/// Wishlist removal form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromWishlistForm {
    pub product_id: ProductId,
}

// =============================================================================
// Templates
// =============================================================================

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistShowTemplate {
    pub items: Vec<WishlistEntryView>,
}

/// Wishlist items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_items.html")]
pub struct WishlistItemsTemplate {
    pub items: Vec<WishlistEntryView>,
}

/// Wishlist count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_count.html")]
pub struct WishlistCountTemplate {
    pub count: usize,
}

/// Wishlist heart-button fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_button.html")]
pub struct WishlistButtonTemplate {
    pub product_id: ProductId,
    pub in_wishlist: bool,
}

fn entry_views(wishlist: &WishlistState) -> Vec<WishlistEntryView> {
    wishlist.items.iter().map(WishlistEntryView::from).collect()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display wishlist page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let wishlist = load_wishlist(&session).await;
    WishlistShowTemplate {
        items: entry_views(&wishlist),
    }
}

/// Toggle a product's wishlist membership (HTMX).
///
/// Present products are removed, absent products are added (adding twice is
/// a no-op by construction). Returns the heart-button fragment.
#[instrument(skip(state, session))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ToggleWishlistForm>,
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
            tracing::error!("Failed to load product for wishlist toggle: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<span class=\"error\">Error updating wishlist</span>"),
            )
                .into_response();
        }
    };

    let current = load_wishlist(&session).await;
    let product_id = product.id;
    let action = if current.is_in_wishlist(product_id) {
        WishlistAction::RemoveItem(product_id)
    } else {
        WishlistAction::AddItem(product)
    };
    let wishlist = reduce(current, action);

    if let Err(e) = save_wishlist(&session, &wishlist).await {
        tracing::error!("Failed to save wishlist snapshot to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "wishlist-updated")]),
        WishlistButtonTemplate {
            product_id,
            in_wishlist: wishlist.is_in_wishlist(product_id),
        },
    )
        .into_response()
}

/// Remove item from wishlist (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromWishlistForm>) -> Response {
    let wishlist = reduce(
        load_wishlist(&session).await,
        WishlistAction::RemoveItem(form.product_id),
    );

    if let Err(e) = save_wishlist(&session, &wishlist).await {
        tracing::error!("Failed to save wishlist snapshot to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "wishlist-updated")]),
        WishlistItemsTemplate {
            items: entry_views(&wishlist),
        },
    )
        .into_response()
}

/// Get wishlist count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let wishlist = load_wishlist(&session).await;
    WishlistCountTemplate {
        count: wishlist.total_items(),
    }
}
