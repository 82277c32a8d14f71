//! Write-side product repository for the admin panel.
//!
//! The admin form is a controlled full form, so updates write every column
//! in one statement rather than patching.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use resonant_harmony_core::{NewProduct, Price, Product, ProductId, Slug};

use super::RepositoryError;

const PRODUCT_COLUMNS: &str = "id, slug, name, description, price, image_url, \
     image_hint, audio_url, tag, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    slug: String,
    name: String,
    description: String,
    price: Decimal,
    image_url: String,
    image_hint: String,
    audio_url: String,
    tag: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let slug = Slug::parse(&row.slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid slug in database: {e}"))
        })?;
        let tag = row.tag.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid tag in database: {e}"))
        })?;
        let price = Price::new(row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            slug,
            name: row.name,
            description: row.description,
            price,
            image_url: row.image_url,
            image_hint: row.image_hint,
            audio_url: row.audio_url,
            tag,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    pub async fn create(&self, input: NewProduct) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(&format!(
            "INSERT INTO product (slug, name, description, price, image_url, \
                                  image_hint, audio_url, tag) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(input.slug.as_str())
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price.amount())
        .bind(&input.image_url)
        .bind(&input.image_hint)
        .bind(&input.audio_url)
        .bind(input.tag.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(map_unique_violation)?;

        row.try_into()
    }

    /// Overwrite every editable column of a product in one statement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the ID does not exist.
    /// Returns `RepositoryError::Conflict` if the new slug already exists.
    pub async fn update(
        &self,
        id: ProductId,
        input: NewProduct,
    ) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE product SET \
                 slug = $2, name = $3, description = $4, price = $5, \
                 image_url = $6, image_hint = $7, audio_url = $8, tag = $9, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(input.slug.as_str())
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price.amount())
        .bind(&input.image_url)
        .bind(&input.image_hint)
        .bind(&input.audio_url)
        .bind(input.tag.as_str())
        .fetch_optional(self.pool)
        .await
        .map_err(map_unique_violation)?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the ID does not exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

fn map_unique_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("slug already exists".to_owned());
    }
    RepositoryError::Database(e)
}
