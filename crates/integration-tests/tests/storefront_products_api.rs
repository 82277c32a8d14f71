//! Integration tests for the product JSON API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront server running (cargo run -p resonant-harmony-storefront)
//!
//! Run with: cargo test -p resonant-harmony-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use resonant_harmony_core::Slug;
use resonant_harmony_integration_tests::storefront_base_url;

fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// Create a product with a unique name so reruns never collide on slug.
async fn create_test_product(client: &Client) -> Value {
    let base_url = storefront_base_url();
    let unique = Uuid::new_v4().simple().to_string();

    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "name": format!("Test Bowl {unique}"),
            "price": "42.00",
            "description": "Created by integration tests",
        }))
        .send()
        .await
        .expect("Failed to create test product");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse created product")
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_list_products_ordered_newest_first() {
    let client = client();
    let base_url = storefront_base_url();

    let first = create_test_product(&client).await;
    let second = create_test_product(&client).await;

    let resp = client
        .get(format!("{base_url}/api/products"))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::OK);

    let products: Vec<Value> = resp.json().await.expect("Failed to parse product list");
    let ids: Vec<&str> = products
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();

    let first_pos = ids.iter().position(|id| Some(*id) == first["id"].as_str());
    let second_pos = ids.iter().position(|id| Some(*id) == second["id"].as_str());
    assert!(
        second_pos < first_pos,
        "newer product must come before older"
    );
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_create_derives_slug_from_name() {
    let created = create_test_product(&client()).await;

    let name = created["name"].as_str().expect("name");
    let slug = created["slug"].as_str().expect("slug");
    assert_eq!(slug, Slug::from_name(name).as_str());

    // Defaults applied for omitted fields
    assert_eq!(created["imageHint"], "product image");
    assert_eq!(created["audioUrl"], "");
    assert_eq!(created["tag"], "singing-bowl");
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_get_by_id_and_by_slug() {
    let client = client();
    let base_url = storefront_base_url();
    let created = create_test_product(&client).await;

    for identifier in [
        created["id"].as_str().expect("id"),
        created["slug"].as_str().expect("slug"),
    ] {
        let resp = client
            .get(format!("{base_url}/api/products/{identifier}"))
            .send()
            .await
            .expect("Failed to fetch product");
        assert_eq!(resp.status(), StatusCode::OK, "identifier {identifier}");

        let product: Value = resp.json().await.expect("Failed to parse product");
        assert_eq!(product["id"], created["id"]);
    }
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_get_unknown_identifier_is_404_json() {
    let client = client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/api/products/no-such-bowl-anywhere"))
        .send()
        .await
        .expect("Failed to fetch product");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_create_without_price_is_rejected() {
    let client = client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({ "name": "Bowl Without A Price" }))
        .send()
        .await
        .expect("Failed to post product");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_update_and_delete_round_trip() {
    let client = client();
    let base_url = storefront_base_url();
    let created = create_test_product(&client).await;
    let id = created["id"].as_str().expect("id");

    // Partial update: only the price changes
    let resp = client
        .put(format!("{base_url}/api/products/{id}"))
        .json(&json!({ "price": 49.5 }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: Value = resp.json().await.expect("Failed to parse updated product");
    assert_eq!(updated["price"], "49.5");
    assert_eq!(updated["name"], created["name"], "untouched field survives");

    // Delete
    let resp = client
        .delete(format!("{base_url}/api/products/{id}"))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse delete body");
    assert_eq!(body["message"], "Product deleted successfully");

    // Gone afterwards
    let resp = client
        .get(format!("{base_url}/api/products/{id}"))
        .send()
        .await
        .expect("Failed to re-fetch product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
