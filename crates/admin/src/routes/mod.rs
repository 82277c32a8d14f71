//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Dashboard
//! GET  /health                  - Health check
//!
//! # Products (backed by the shared product table)
//! GET  /products                - Product table
//! GET  /products/new            - Blank product form
//! POST /products                - Create product
//! GET  /products/{id}/edit      - Pre-filled product form
//! POST /products/{id}           - Update product
//! POST /products/{id}/delete    - Delete product
//!
//! # Customers (mock, in-memory)
//! GET  /customers               - Customer table
//! POST /customers/{id}/delete   - Remove customer from the mock list
//!
//! # Orders (mock, in-memory, read-only)
//! GET  /orders                  - Order table
//! ```

pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new_form))
        .route("/{id}", post(products::update))
        .route("/{id}/edit", get(products::edit_form))
        .route("/{id}/delete", post(products::delete))
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index))
        .route("/{id}/delete", post(customers::delete))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .nest("/products", product_routes())
        .nest("/customers", customer_routes())
        .route("/orders", get(orders::index))
}
