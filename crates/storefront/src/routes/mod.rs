//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (?tag= filter)
//! GET  /products/{identifier}  - Product detail (id or slug)
//! GET  /search                 - Substring search (?q=)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Wishlist (HTMX fragments)
//! GET  /wishlist               - Wishlist page
//! POST /wishlist/toggle        - Toggle membership (returns heart fragment)
//! POST /wishlist/remove        - Remove item (returns wishlist_items fragment)
//! GET  /wishlist/count         - Wishlist count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Checkout form
//! POST /checkout               - Place order (simulated processing)
//! GET  /order-confirmation     - Post-checkout page
//!
//! # Audio preview coordination
//! GET  /audio/events           - SSE stream of playback events
//! POST /audio/{id}/play        - Start a sample (pauses any other)
//! POST /audio/{id}/pause       - Pause the owning sample
//! POST /audio/{id}/ended       - Sample finished naturally
//! POST /audio/{id}/release     - Widget unmounted while playing
//!
//! # Mock auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action (email only)
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action (name + email)
//! POST /auth/logout            - Logout action
//!
//! # Product JSON API
//! GET    /api/products               - All products, newest first
//! POST   /api/products               - Create product
//! GET    /api/products/{idOrSlug}    - Product by id or slug
//! PUT    /api/products/{id}          - Partial update
//! DELETE /api/products/{id}          - Delete product
//! ```

pub mod api;
pub mod audio;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;
pub mod search;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{identifier}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
        .route("/remove", post(wishlist::remove))
        .route("/count", get(wishlist::count))
}

/// Create the audio coordination routes router.
pub fn audio_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(audio::events))
        .route("/{id}/play", post(audio::play))
        .route("/{id}/pause", post(audio::pause))
        .route("/{id}/ended", post(audio::ended))
        .route("/{id}/release", post(audio::release))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the product JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(api::products::list).post(api::products::create))
        .route(
            "/products/{identifier}",
            get(api::products::get)
                .put(api::products::update)
                .delete(api::products::remove),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Search
        .route("/search", get(search::search))
        // Cart routes
        .nest("/cart", cart_routes())
        // Wishlist routes
        .nest("/wishlist", wishlist_routes())
        // Checkout flow
        .route("/checkout", get(checkout::show).post(checkout::place_order))
        .route("/order-confirmation", get(checkout::confirmation))
        // Audio preview coordination
        .nest("/audio", audio_routes())
        // Mock auth routes
        .nest("/auth", auth_routes())
        // Product JSON API
        .nest("/api", api_routes())
}
