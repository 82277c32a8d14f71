//! Resonant Harmony Core - Shared types library.
//!
//! This crate provides common types used across all Resonant Harmony
//! components:
//! - `storefront` - Public-facing e-commerce site
//! - `admin` - Internal administration panel
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure state machines - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, slugs, emails,
//!   and category tags
//! - [`product`] - The catalog entity and its create/patch inputs
//! - [`cart`] - Pure cart state machine (tagged-union actions, pure reducer)
//! - [`wishlist`] - Pure wishlist state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod product;
pub mod types;
pub mod wishlist;

pub use product::*;
pub use types::*;
