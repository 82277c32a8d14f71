//! Product JSON API handlers.
//!
//! The REST surface over the `product` table:
//!
//! ```text
//! GET    /api/products             - all products, newest first
//! POST   /api/products             - create (name + price required)
//! GET    /api/products/{idOrSlug}  - lookup by id, falling back to slug
//! PUT    /api/products/{id}        - partial update
//! DELETE /api/products/{id}        - delete
//! ```

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use resonant_harmony_core::{
    NewProduct, Price, Product, ProductId, ProductPatch, ProductTag, Slug,
};

use super::{ApiError, ApiResult};
use crate::db::ProductRepository;
use crate::state::AppState;

/// A price field that accepts either a JSON number or a numeric string,
/// matching what the admin form and API clients actually send.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Number(f64),
    Text(String),
}

impl PriceField {
    fn parse(&self) -> Result<Price, ApiError> {
        let price = match self {
            Self::Number(n) => {
                let amount = rust_decimal::Decimal::try_from(*n)
                    .map_err(|_| ApiError::BadRequest(format!("Invalid price: {n}")))?;
                Price::new(amount)
            }
            Self::Text(s) => Price::parse(s),
        };
        price.map_err(|e| ApiError::BadRequest(format!("Invalid price: {e}")))
    }
}

/// Create-product request body. Name and price are required; everything else
/// is defaulted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<PriceField>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_hint: Option<String>,
    pub audio_url: Option<String>,
    pub tag: Option<String>,
}

/// Update-product request body. Every field is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<PriceField>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_hint: Option<String>,
    pub audio_url: Option<String>,
    pub tag: Option<String>,
}

fn parse_slug(raw: &str) -> Result<Slug, ApiError> {
    Slug::parse(raw).map_err(|e| ApiError::BadRequest(format!("Invalid slug: {e}")))
}

fn parse_tag(raw: &str) -> Result<ProductTag, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown tag: {raw}")))
}

fn parse_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid product id: {raw}")))
}

/// List all products, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool())
        .list()
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to fetch products"))?;

    Ok(Json(products))
}

/// Fetch a single product by id, falling back to slug.
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get_by_identifier(&identifier)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to fetch product"))?
        .ok_or(ApiError::NotFound("Product not found"))?;

    Ok(Json(product))
}

/// Create a new product.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let name = body
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Name is required".to_owned()))?;
    let price = body
        .price
        .ok_or_else(|| ApiError::BadRequest("Price is required".to_owned()))?
        .parse()?;

    let slug = body.slug.as_deref().map(parse_slug).transpose()?;
    let tag = body.tag.as_deref().map(parse_tag).transpose()?;

    let input = NewProduct::build(
        name,
        price,
        slug,
        body.description,
        body.image_url,
        body.image_hint,
        body.audio_url,
        tag,
    );
    if input.slug.as_str().is_empty() {
        // A name with no sluggable characters cannot derive a usable slug.
        return Err(ApiError::BadRequest("Slug is required".to_owned()));
    }

    let product = ProductRepository::new(state.pool())
        .create(input)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to create product"))?;

    state.product_cache().invalidate_all();

    Ok((StatusCode::CREATED, Json(product)))
}

/// Apply a partial update to a product.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> ApiResult<Json<Product>> {
    let id = parse_id(&raw_id)?;

    let patch = ProductPatch {
        slug: body.slug.as_deref().map(parse_slug).transpose()?,
        name: body.name,
        description: body.description,
        price: body.price.as_ref().map(PriceField::parse).transpose()?,
        image_url: body.image_url,
        image_hint: body.image_hint,
        audio_url: body.audio_url,
        tag: body.tag.as_deref().map(parse_tag).transpose()?,
    };

    let product = ProductRepository::new(state.pool())
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to update product"))?;

    state.product_cache().invalidate_all();

    Ok(Json(product))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&raw_id)?;

    ProductRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to delete product"))?;

    state.product_cache().invalidate_all();

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_field_accepts_number() {
        let price = PriceField::Number(99.99).parse().expect("valid");
        assert_eq!(price, Price::parse("99.99").expect("valid"));
    }

    #[test]
    fn test_price_field_accepts_numeric_string() {
        let price = PriceField::Text("249.99".to_owned()).parse().expect("valid");
        assert_eq!(price, Price::parse("249.99").expect("valid"));
    }

    #[test]
    fn test_price_field_rejects_garbage_string() {
        assert!(PriceField::Text("cheap".to_owned()).parse().is_err());
    }

    #[test]
    fn test_price_field_rejects_negative() {
        assert!(PriceField::Number(-1.0).parse().is_err());
    }

    #[test]
    fn test_request_body_is_camel_case() {
        let body: CreateProductRequest = serde_json::from_value(json!({
            "name": "Zen Bowl Deluxe",
            "price": "99.99",
            "imageUrl": "https://img.example/bowl.jpg",
            "audioUrl": "https://audio.example/bowl.mp3"
        }))
        .expect("valid body");

        assert_eq!(body.image_url.as_deref(), Some("https://img.example/bowl.jpg"));
        assert_eq!(body.audio_url.as_deref(), Some("https://audio.example/bowl.mp3"));
        assert!(body.slug.is_none());
    }

    #[test]
    fn test_parse_tag_rejects_unknown() {
        assert!(parse_tag("gongs").is_err());
        assert!(parse_tag("meditation-cushion").is_ok());
    }
}
