//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use resonant_harmony_core::{Product, ProductTag, wishlist::WishlistState};

use crate::db::{ProductRepository, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::routes::wishlist::load_wishlist;
use crate::state::AppState;

/// A product card with the widget state the template needs.
#[derive(Clone)]
pub struct ProductCardView {
    pub product: Product,
    pub in_wishlist: bool,
    pub playing: bool,
}

/// A tag filter chip.
pub struct TagChip {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Listing filter query parameters.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub tag: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub cards: Vec<ProductCardView>,
    pub chips: Vec<TagChip>,
    pub heading: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: Product,
    pub in_wishlist: bool,
    pub playing: bool,
}

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub identifier: String,
}

/// Fetch a product by id-or-slug through the short-TTL lookup cache.
///
/// # Errors
///
/// Returns `RepositoryError` if the underlying query fails.
pub async fn load_product(
    state: &AppState,
    identifier: &str,
) -> Result<Option<Product>, RepositoryError> {
    if let Some(product) = state.product_cache().get(identifier).await {
        return Ok(Some(product));
    }

    let product = ProductRepository::new(state.pool())
        .get_by_identifier(identifier)
        .await?;

    if let Some(ref product) = product {
        state
            .product_cache()
            .insert(identifier.to_owned(), product.clone())
            .await;
    }

    Ok(product)
}

/// Build card views for a set of products against the visitor's wishlist and
/// the playback coordinator.
pub fn card_views(
    state: &AppState,
    wishlist: &WishlistState,
    products: Vec<Product>,
) -> Vec<ProductCardView> {
    products
        .into_iter()
        .map(|product| {
            let in_wishlist = wishlist.is_in_wishlist(product.id);
            let playing = state.playback().is_playing(product.id);
            ProductCardView {
                product,
                in_wishlist,
                playing,
            }
        })
        .collect()
}

/// Display the product listing page, optionally filtered by tag.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListingQuery>,
) -> Result<Response, AppError> {
    let selected_tag = query
        .tag
        .as_deref()
        .and_then(|raw| raw.parse::<ProductTag>().ok());

    let mut products = ProductRepository::new(state.pool()).list().await?;
    if let Some(tag) = selected_tag {
        products.retain(|product| product.tag == tag);
    }

    let heading = selected_tag.map_or_else(|| "All Products".to_owned(), |tag| tag.label().to_owned());

    let chips = ProductTag::ALL
        .iter()
        .map(|tag| TagChip {
            value: tag.as_str(),
            label: tag.label(),
            selected: selected_tag == Some(*tag),
        })
        .collect();

    let wishlist = load_wishlist(&session).await;
    let cards = card_views(&state, &wishlist, products);

    Ok(ProductsIndexTemplate {
        cards,
        chips,
        heading,
    }
    .into_response())
}

/// Display the product detail page (lookup by id or slug).
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(identifier): Path<String>,
) -> Result<Response, AppError> {
    let Some(product) = load_product(&state, &identifier).await? else {
        return Ok((
            StatusCode::NOT_FOUND,
            ProductNotFoundTemplate { identifier },
        )
            .into_response());
    };

    let wishlist = load_wishlist(&session).await;
    let in_wishlist = wishlist.is_in_wishlist(product.id);
    let playing = state.playback().is_playing(product.id);

    Ok(ProductShowTemplate {
        product,
        in_wishlist,
        playing,
    }
    .into_response())
}
