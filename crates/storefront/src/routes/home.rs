//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::filters;
use crate::routes::products::{ProductCardView, card_views};
use crate::routes::wishlist::load_wishlist;
use crate::state::AppState;

/// How many products the home page features.
const FEATURED_COUNT: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<ProductCardView>,
}

/// Display the home page with the newest products featured.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    let mut products = ProductRepository::new(state.pool()).list().await?;
    products.truncate(FEATURED_COUNT);

    let wishlist = load_wishlist(&session).await;
    let featured = card_views(&state, &wishlist, products);

    Ok(HomeTemplate { featured }.into_response())
}
