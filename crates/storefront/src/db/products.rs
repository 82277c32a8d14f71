//! Product repository for database operations.
//!
//! Each operation is a single SQL statement, so a failure can never leave a
//! partially-applied row behind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use resonant_harmony_core::{NewProduct, Price, Product, ProductId, ProductPatch, Slug};

use super::RepositoryError;

const PRODUCT_COLUMNS: &str = "id, slug, name, description, price, image_url, \
     image_hint, audio_url, tag, created_at, updated_at";

/// Raw database row for a product.
///
/// String-typed columns are validated into their newtype forms in
/// [`TryFrom`]; a row that fails validation surfaces as
/// [`RepositoryError::DataCorruption`] rather than a panic.
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
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a stored row fails validation.
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

    /// Get a product by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Look up a product by ID first, falling back to slug.
    ///
    /// The identifier is whatever appeared in the URL path: a UUID string is
    /// tried as a primary-key lookup, anything else (or a UUID that matches
    /// no row) is tried as a slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        if let Ok(id) = identifier.parse::<ProductId>() {
            if let Some(product) = self.get_by_id(id).await? {
                return Ok(Some(product));
            }
        }

        self.get_by_slug(identifier).await
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    /// Returns `RepositoryError::Database` for other database errors.
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
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("slug already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Apply a partial patch to a product in a single statement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the ID does not exist.
    /// Returns `RepositoryError::Conflict` if the new slug already exists.
    pub async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE product SET \
                 slug = COALESCE($2, slug), \
                 name = COALESCE($3, name), \
                 description = COALESCE($4, description), \
                 price = COALESCE($5, price), \
                 image_url = COALESCE($6, image_url), \
                 image_hint = COALESCE($7, image_hint), \
                 audio_url = COALESCE($8, audio_url), \
                 tag = COALESCE($9, tag), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(patch.slug.map(Slug::into_inner))
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.price.map(|p| p.amount()))
        .bind(patch.image_url)
        .bind(patch.image_hint)
        .bind(patch.audio_url)
        .bind(patch.tag.map(|t| t.as_str().to_owned()))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("slug already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

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

#[cfg(test)]
mod tests {
    use super::*;
    use resonant_harmony_core::ProductTag;

    fn row(slug: &str, tag: &str, price: Decimal) -> ProductRow {
        ProductRow {
            id: Uuid::new_v4(),
            slug: slug.to_owned(),
            name: "Zen Harmony Bowl".to_owned(),
            description: String::new(),
            price,
            image_url: String::new(),
            image_hint: "singing bowl".to_owned(),
            audio_url: String::new(),
            tag: tag.to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_row_converts() {
        let product =
            Product::try_from(row("zen-harmony-bowl", "singing-bowl", Decimal::new(9999, 2)))
                .expect("valid row");
        assert_eq!(product.tag, ProductTag::SingingBowl);
        assert_eq!(product.slug.as_str(), "zen-harmony-bowl");
    }

    #[test]
    fn test_unknown_tag_is_data_corruption() {
        let result = Product::try_from(row("zen-harmony-bowl", "gongs", Decimal::ONE));
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[test]
    fn test_invalid_slug_is_data_corruption() {
        let result = Product::try_from(row("Not A Slug", "singing-bowl", Decimal::ONE));
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[test]
    fn test_negative_price_is_data_corruption() {
        let result = Product::try_from(row("bowl", "singing-bowl", Decimal::new(-100, 2)));
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }
}
