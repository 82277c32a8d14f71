//! Session-related types.
//!
//! The session is the storefront's per-visitor store: the mock identity plus
//! the cart and wishlist snapshots. Each value is written as a full-snapshot
//! overwrite under its fixed key, so a corrupted value degrades to "absent"
//! on the next load instead of propagating.

use serde::{Deserialize, Serialize};

use resonant_harmony_core::Email;

/// Session-stored visitor identity (mock auth; no password is ever involved).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Display name ("Guest User" for logins, the given name for signups).
    pub name: String,
    /// Visitor's email address.
    pub email: Email,
}

/// Session keys for visitor state.
pub mod keys {
    /// Key for storing the current logged-in visitor.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the cart line-item snapshot.
    pub const CART_ITEMS: &str = "cart_items";

    /// Key for the wishlist snapshot.
    pub const WISHLIST_ITEMS: &str = "wishlist_items";
}
