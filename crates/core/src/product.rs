//! The catalog entity and its create/patch inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, ProductTag, Slug};

/// A catalog item (singing bowl or accessory).
///
/// Serialized in camelCase: this struct is the JSON wire format of the
/// product REST API as well as the domain entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub slug: Slug,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
    /// Display metadata describing the image (alt-text hints).
    pub image_hint: String,
    /// Optional audio sample; empty string when the product has none.
    pub audio_url: String,
    pub tag: ProductTag,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a product.
///
/// Construction goes through [`NewProduct::build`], which applies the
/// store's defaulting rules. The id and timestamps are assigned by the
/// database.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub slug: Slug,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
    pub image_hint: String,
    pub audio_url: String,
    pub tag: ProductTag,
}

impl NewProduct {
    /// Default image hint when the caller supplies none.
    pub const DEFAULT_IMAGE_HINT: &'static str = "product image";

    /// Assemble a `NewProduct`, deriving the slug from the name when it is
    /// not supplied and filling defaults for the optional display fields.
    #[must_use]
    pub fn build(
        name: String,
        price: Price,
        slug: Option<Slug>,
        description: Option<String>,
        image_url: Option<String>,
        image_hint: Option<String>,
        audio_url: Option<String>,
        tag: Option<ProductTag>,
    ) -> Self {
        let slug = slug.unwrap_or_else(|| Slug::from_name(&name));
        Self {
            slug,
            name,
            description: description.unwrap_or_default(),
            price,
            image_url: image_url.unwrap_or_default(),
            image_hint: image_hint.unwrap_or_else(|| Self::DEFAULT_IMAGE_HINT.to_owned()),
            audio_url: audio_url.unwrap_or_default(),
            tag: tag.unwrap_or_default(),
        }
    }
}

/// A partial patch applied to an existing product.
///
/// `None` fields are left untouched; the repository applies the whole patch
/// in a single statement so a failure never leaves a half-updated row.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub slug: Option<Slug>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub image_url: Option<String>,
    pub image_hint: Option<String>,
    pub audio_url: Option<String>,
    pub tag: Option<ProductTag>,
}

impl ProductPatch {
    /// True when the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slug.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image_url.is_none()
            && self.image_hint.is_none()
            && self.audio_url.is_none()
            && self.tag.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(s: &str) -> Price {
        Price::parse(s).expect("valid price")
    }

    #[test]
    fn test_build_derives_slug_from_name() {
        let input = NewProduct::build(
            "Zen Bowl Deluxe".to_owned(),
            price("99.99"),
            None,
            None,
            None,
            None,
            None,
            None,
        );
        assert_eq!(input.slug.as_str(), "zen-bowl-deluxe");
    }

    #[test]
    fn test_build_keeps_supplied_slug() {
        let slug = Slug::parse("custom-slug").expect("valid slug");
        let input = NewProduct::build(
            "Zen Bowl".to_owned(),
            price("10"),
            Some(slug.clone()),
            None,
            None,
            None,
            None,
            None,
        );
        assert_eq!(input.slug, slug);
    }

    #[test]
    fn test_build_fills_defaults() {
        let input = NewProduct::build(
            "Bowl".to_owned(),
            price("10"),
            None,
            None,
            None,
            None,
            None,
            None,
        );
        assert_eq!(input.image_hint, NewProduct::DEFAULT_IMAGE_HINT);
        assert_eq!(input.audio_url, "");
        assert_eq!(input.tag, ProductTag::SingingBowl);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());
        let patch = ProductPatch {
            name: Some("Renamed".to_owned()),
            ..ProductPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
