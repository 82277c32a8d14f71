//! Admin product CRUD handlers.
//!
//! The form is a controlled mirror of the product fields (minus id).
//! Validation happens before the repository is touched: a submission with a
//! missing name, slug, or price, or a non-numeric price, re-renders the form
//! with a notice and performs no store call.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use resonant_harmony_core::{NewProduct, Price, Product, ProductId, ProductTag, Slug};

use crate::db::{ProductRepository, RepositoryError};
use crate::error::AppError;
use crate::state::AppState;

/// Placeholder image applied when the form leaves the URL blank.
const PLACEHOLDER_IMAGE: &str = "https://picsum.photos/seed/placeholder/600/400";

/// Image hint applied when the form leaves it blank.
const DEFAULT_FORM_IMAGE_HINT: &str = "singing bowl";

// =============================================================================
// Form Types
// =============================================================================

/// Raw product form data, exactly as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub image_hint: String,
    pub audio_url: String,
    pub tag: String,
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            slug: product.slug.to_string(),
            description: product.description.clone(),
            price: product.price.amount().to_string(),
            image_url: product.image_url.clone(),
            image_hint: product.image_hint.clone(),
            audio_url: product.audio_url.clone(),
            tag: product.tag.to_string(),
        }
    }
}

/// Validate the form into a repository input without touching the store.
///
/// # Errors
///
/// Returns a notice describing the first rejected field.
pub fn validate(form: &ProductForm) -> Result<NewProduct, String> {
    if form.name.trim().is_empty() {
        return Err("Name is required".to_owned());
    }
    if form.slug.trim().is_empty() {
        return Err("Slug is required".to_owned());
    }
    if form.price.trim().is_empty() {
        return Err("Price is required".to_owned());
    }

    let price = Price::parse(&form.price).map_err(|e| format!("Price: {e}"))?;
    let slug = Slug::parse(form.slug.trim()).map_err(|e| format!("Slug: {e}"))?;

    let tag = if form.tag.trim().is_empty() {
        ProductTag::default()
    } else {
        form.tag
            .parse()
            .map_err(|_| format!("Unknown category: {}", form.tag))?
    };

    let image_url = if form.image_url.trim().is_empty() {
        PLACEHOLDER_IMAGE.to_owned()
    } else {
        form.image_url.trim().to_owned()
    };
    let image_hint = if form.image_hint.trim().is_empty() {
        DEFAULT_FORM_IMAGE_HINT.to_owned()
    } else {
        form.image_hint.trim().to_owned()
    };

    Ok(NewProduct {
        slug,
        name: form.name.trim().to_owned(),
        description: form.description.trim().to_owned(),
        price,
        image_url,
        image_hint,
        audio_url: form.audio_url.trim().to_owned(),
        tag,
    })
}

// =============================================================================
// Views & Templates
// =============================================================================

/// A category option for the form's selector.
pub struct TagOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn tag_options(selected: &str) -> Vec<TagOption> {
    ProductTag::ALL
        .iter()
        .map(|tag| TagOption {
            value: tag.as_str(),
            label: tag.label(),
            selected: tag.as_str() == selected,
        })
        .collect()
}

/// Product table template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<Product>,
}

/// Product form template (create and edit).
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub title: &'static str,
    pub action: String,
    pub values: ProductForm,
    pub tags: Vec<TagOption>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product table.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(ProductsIndexTemplate { products }.into_response())
}

/// Display a blank product form.
#[instrument]
pub async fn new_form() -> impl IntoResponse {
    ProductFormTemplate {
        title: "Add New Product",
        action: "/products".to_owned(),
        values: ProductForm::default(),
        tags: tag_options(ProductTag::default().as_str()),
        error: None,
    }
}

/// Create a product from the form.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let input = match validate(&form) {
        Ok(input) => input,
        Err(notice) => {
            return Ok(rerender("Add New Product", "/products".to_owned(), form, notice));
        }
    };

    match ProductRepository::new(state.pool()).create(input).await {
        Ok(product) => {
            tracing::info!(product = %product.slug, "Product created");
            Ok(Redirect::to("/products").into_response())
        }
        Err(RepositoryError::Conflict(detail)) => {
            Ok(rerender("Add New Product", "/products".to_owned(), form, detail))
        }
        Err(other) => Err(other.into()),
    }
}

/// Display the form pre-filled with an existing product.
#[instrument(skip(state))]
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Response, AppError> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductFormTemplate {
        title: "Edit Product",
        action: format!("/products/{id}"),
        values: ProductForm::from(&product),
        tags: tag_options(product.tag.as_str()),
        error: None,
    }
    .into_response())
}

/// Update a product from the form.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let action = format!("/products/{id}");
    let input = match validate(&form) {
        Ok(input) => input,
        Err(notice) => return Ok(rerender("Edit Product", action, form, notice)),
    };

    match ProductRepository::new(state.pool()).update(id, input).await {
        Ok(product) => {
            tracing::info!(product = %product.slug, "Product updated");
            Ok(Redirect::to("/products").into_response())
        }
        Err(RepositoryError::Conflict(detail)) => Ok(rerender("Edit Product", action, form, detail)),
        Err(other) => Err(other.into()),
    }
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Redirect, AppError> {
    ProductRepository::new(state.pool()).delete(id).await?;
    tracing::info!(%id, "Product deleted");
    Ok(Redirect::to("/products"))
}

fn rerender(title: &'static str, action: String, form: ProductForm, notice: String) -> Response {
    let selected = form.tag.clone();
    ProductFormTemplate {
        title,
        action,
        values: form,
        tags: tag_options(&selected),
        error: Some(notice),
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ProductForm {
        ProductForm {
            name: "Zen Harmony Bowl".to_owned(),
            slug: "zen-harmony-bowl".to_owned(),
            description: "Seven-metal alloy bowl.".to_owned(),
            price: "99.99".to_owned(),
            image_url: "https://img.example/bowl.jpg".to_owned(),
            image_hint: "singing bowl meditation".to_owned(),
            audio_url: "https://audio.example/bowl.mp3".to_owned(),
            tag: "singing-bowl".to_owned(),
        }
    }

    #[test]
    fn test_valid_form_builds_input() {
        let input = validate(&filled_form()).expect("valid form");
        assert_eq!(input.slug.as_str(), "zen-harmony-bowl");
        assert_eq!(input.price, Price::parse("99.99").expect("valid"));
        assert_eq!(input.tag, ProductTag::SingingBowl);
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        for field in ["name", "slug", "price"] {
            let mut form = filled_form();
            match field {
                "name" => form.name.clear(),
                "slug" => form.slug.clear(),
                _ => form.price.clear(),
            }
            assert!(validate(&form).is_err(), "empty {field} must be rejected");
        }
    }

    #[test]
    fn test_non_numeric_price_rejected() {
        let form = ProductForm {
            price: "ninety-nine".to_owned(),
            ..filled_form()
        };
        assert!(validate(&form).is_err());
    }

    #[test]
    fn test_blank_optionals_get_defaults() {
        let form = ProductForm {
            image_url: String::new(),
            image_hint: String::new(),
            tag: String::new(),
            ..filled_form()
        };
        let input = validate(&form).expect("valid form");
        assert_eq!(input.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(input.image_hint, DEFAULT_FORM_IMAGE_HINT);
        assert_eq!(input.tag, ProductTag::SingingBowl);
    }
}
