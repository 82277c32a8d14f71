//! Integration tests for the cookie-backed cart flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied and the catalog
//!   seeded (rh-cli migrate && rh-cli seed)
//! - The storefront server running (cargo run -p resonant-harmony-storefront)
//!
//! Run with: cargo test -p resonant-harmony-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::Value;

use resonant_harmony_integration_tests::storefront_base_url;

/// Session-cookie client so the cart snapshot persists across requests.
fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Fetch any two seeded product ids through the JSON API.
async fn two_product_ids(client: &Client) -> (String, String) {
    let base_url = storefront_base_url();
    let products: Vec<Value> = client
        .get(format!("{base_url}/api/products"))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to parse products");

    assert!(products.len() >= 2, "seed the catalog before running");
    (
        products[0]["id"].as_str().expect("id").to_owned(),
        products[1]["id"].as_str().expect("id").to_owned(),
    )
}

async fn add_to_cart(client: &Client, product_id: &str) {
    let base_url = storefront_base_url();
    let resp = client
        .post(format!("{base_url}/cart/add"))
        .form(&[("product_id", product_id)])
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::OK);
}

async fn cart_count_badge(client: &Client) -> String {
    let base_url = storefront_base_url();
    client
        .get(format!("{base_url}/cart/count"))
        .send()
        .await
        .expect("Failed to get cart count")
        .text()
        .await
        .expect("Failed to read count fragment")
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_add_two_products_remove_one() {
    let client = session_client();
    let base_url = storefront_base_url();
    let (first, second) = two_product_ids(&client).await;

    add_to_cart(&client, &first).await;
    add_to_cart(&client, &second).await;
    add_to_cart(&client, &second).await;

    // 1 + 2 units across two lines
    assert!(cart_count_badge(&client).await.contains('3'));

    let resp = client
        .post(format!("{base_url}/cart/remove"))
        .form(&[("product_id", first.as_str())])
        .send()
        .await
        .expect("Failed to remove from cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let fragment = resp.text().await.expect("Failed to read items fragment");
    assert!(
        !fragment.contains(&first),
        "removed line must not render"
    );
    assert!(fragment.contains(&second));

    // Remaining count equals the surviving line's quantity
    assert!(cart_count_badge(&client).await.contains('2'));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_update_quantity_to_zero_removes_line() {
    let client = session_client();
    let base_url = storefront_base_url();
    let (first, _) = two_product_ids(&client).await;

    add_to_cart(&client, &first).await;

    let resp = client
        .post(format!("{base_url}/cart/update"))
        .form(&[("product_id", first.as_str()), ("quantity", "0")])
        .send()
        .await
        .expect("Failed to update cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let fragment = resp.text().await.expect("Failed to read items fragment");
    assert!(fragment.contains("Your cart is empty"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_checkout_requires_items() {
    let client = session_client();
    let base_url = storefront_base_url();

    // Fresh session, empty cart: checkout bounces back to the cart page.
    let resp = client
        .get(format!("{base_url}/checkout"))
        .send()
        .await
        .expect("Failed to get checkout");

    assert!(resp.url().path().ends_with("/cart"));
}
