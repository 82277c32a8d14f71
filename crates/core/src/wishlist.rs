//! Wishlist state machine.
//!
//! Same shape as the cart reducer: a pure function over tagged-union
//! actions. The wishlist is a set keyed by [`ProductId`]: adding an
//! already-present product is a no-op, so `AddItem` is idempotent.

use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::{Price, ProductId, Slug};

/// A saved-for-later product snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_url: String,
    pub slug: Slug,
}

impl WishlistItem {
    /// Snapshot a product into a wishlist entry.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            slug: product.slug.clone(),
        }
    }
}

/// An action applied to the wishlist.
#[derive(Debug, Clone)]
pub enum WishlistAction {
    /// Save a product; no-op if it is already present.
    AddItem(Product),
    /// Remove an entry; no-op if absent.
    RemoveItem(ProductId),
    /// Empty the wishlist.
    Clear,
    /// Restore a previously persisted snapshot.
    Replace(Vec<WishlistItem>),
}

/// The saved-for-later set, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WishlistState {
    pub items: Vec<WishlistItem>,
}

impl WishlistState {
    /// Pure membership query.
    #[must_use]
    pub fn is_in_wishlist(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Number of saved products.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pure transition function from (state, action) to the next state.
#[must_use]
pub fn reduce(mut state: WishlistState, action: WishlistAction) -> WishlistState {
    match action {
        WishlistAction::AddItem(product) => {
            if !state.is_in_wishlist(product.id) {
                state.items.push(WishlistItem::from_product(&product));
            }
            state
        }
        WishlistAction::RemoveItem(id) => {
            state.items.retain(|item| item.id != id);
            state
        }
        WishlistAction::Clear => WishlistState::default(),
        WishlistAction::Replace(items) => WishlistState { items },
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::ProductTag;

    fn product(name: &str) -> Product {
        Product {
            id: ProductId::generate(),
            slug: Slug::from_name(name),
            name: name.to_owned(),
            description: String::new(),
            price: Price::parse("59.99").expect("valid price"),
            image_url: format!("https://img.example/{name}.jpg"),
            image_hint: "singing bowl".to_owned(),
            audio_url: String::new(),
            tag: ProductTag::SingingBowl,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let bowl = product("Serenity Now Bowl");
        let mut state = reduce(WishlistState::default(), WishlistAction::AddItem(bowl.clone()));
        state = reduce(state, WishlistAction::AddItem(bowl.clone()));

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, bowl.id);
    }

    #[test]
    fn test_membership_reflects_add_and_remove_immediately() {
        let bowl = product("Serenity Now Bowl");
        let mut state = WishlistState::default();
        assert!(!state.is_in_wishlist(bowl.id));

        state = reduce(state, WishlistAction::AddItem(bowl.clone()));
        assert!(state.is_in_wishlist(bowl.id));

        state = reduce(state, WishlistAction::RemoveItem(bowl.id));
        assert!(!state.is_in_wishlist(bowl.id));
    }

    #[test]
    fn test_entry_snapshots_slug_for_navigation() {
        let bowl = product("Tibetan Thunder Bowl");
        let state = reduce(WishlistState::default(), WishlistAction::AddItem(bowl.clone()));
        assert_eq!(state.items[0].slug, bowl.slug);
    }

    #[test]
    fn test_remove_absent_is_noop_and_clear_empties() {
        let a = product("Bowl A");
        let b = product("Bowl B");

        let mut state = reduce(WishlistState::default(), WishlistAction::AddItem(a));
        state = reduce(state, WishlistAction::RemoveItem(b.id));
        assert_eq!(state.total_items(), 1);

        state = reduce(state, WishlistAction::Clear);
        assert!(state.is_empty());
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let a = product("Bowl A");
        let b = product("Bowl B");
        let c = product("Bowl C");

        let mut state = WishlistState::default();
        for p in [&a, &b, &c] {
            state = reduce(state, WishlistAction::AddItem(p.clone()));
        }

        let ids: Vec<ProductId> = state.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }
}
