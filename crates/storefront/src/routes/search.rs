//! Catalog search route handler.
//!
//! Deliberately a plain case-insensitive substring match over product names
//! and descriptions; there is no ranking.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use resonant_harmony_core::Product;

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::filters;
use crate::routes::products::{ProductCardView, card_views};
use crate::routes::wishlist::load_wishlist;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Search results page template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub query: String,
    pub cards: Vec<ProductCardView>,
}

/// True when the product's name or description contains the needle,
/// case-insensitively.
fn matches(product: &Product, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
}

/// Display search results for `?q=`.
#[instrument(skip(state, session))]
pub async fn search(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let needle = query.q.unwrap_or_default();
    let trimmed = needle.trim();

    let results = if trimmed.is_empty() {
        Vec::new()
    } else {
        let mut products = ProductRepository::new(state.pool()).list().await?;
        products.retain(|product| matches(product, trimmed));
        products
    };

    let wishlist = load_wishlist(&session).await;
    let cards = card_views(&state, &wishlist, results);

    Ok(SearchTemplate {
        query: trimmed.to_owned(),
        cards,
    }
    .into_response())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use resonant_harmony_core::{Price, ProductId, ProductTag, Slug};

    fn product(name: &str, description: &str) -> Product {
        Product {
            id: ProductId::generate(),
            slug: Slug::from_name(name),
            name: name.to_owned(),
            description: description.to_owned(),
            price: Price::parse("59.99").expect("valid price"),
            image_url: String::new(),
            image_hint: String::new(),
            audio_url: String::new(),
            tag: ProductTag::SingingBowl,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_matches_name_case_insensitively() {
        let bowl = product("Zen Harmony Bowl", "");
        assert!(matches(&bowl, "harmony"));
        assert!(matches(&bowl, "ZEN"));
    }

    #[test]
    fn test_matches_description() {
        let bowl = product("Bowl", "hand-hammered Tibetan alloy");
        assert!(matches(&bowl, "tibetan"));
    }

    #[test]
    fn test_no_match() {
        let bowl = product("Zen Harmony Bowl", "seven-metal alloy");
        assert!(!matches(&bowl, "incense"));
    }
}
