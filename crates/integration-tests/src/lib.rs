//! Integration tests for Resonant Harmony.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations + seed
//! cargo run -p resonant-harmony-cli -- migrate
//! cargo run -p resonant-harmony-cli -- seed
//!
//! # Start the storefront (port 3000)
//! cargo run -p resonant-harmony-storefront
//!
//! # Run the ignored integration tests
//! cargo test -p resonant-harmony-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_products_api` - JSON CRUD over the product table
//! - `storefront_cart` - Cookie-backed cart flow through the HTMX endpoints

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
