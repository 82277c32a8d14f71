//! Core type definitions.
//!
//! Newtype wrappers that make invalid states unrepresentable: type-safe IDs,
//! validated slugs and emails, non-negative prices, and the product category
//! enum.

pub mod email;
pub mod id;
pub mod price;
pub mod slug;
pub mod tag;

pub use email::{Email, EmailError};
pub use id::{CustomerId, OrderId, ProductId};
pub use price::{Price, PriceError};
pub use slug::{Slug, SlugError};
pub use tag::ProductTag;
