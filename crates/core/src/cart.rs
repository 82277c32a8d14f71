//! Cart state machine.
//!
//! A pure reducer over tagged-union actions: `reduce(state, action)` returns
//! the next state and performs no I/O. Persistence (session snapshots) and
//! rendering live in the storefront crate; this module can be tested without
//! any web harness.
//!
//! # Invariants
//!
//! - No two items share a [`ProductId`].
//! - Every item's quantity is at least 1; reducing a quantity to zero
//!   removes the item rather than retaining it.
//! - Item order is insertion order, which is also display order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::{Price, ProductId};

/// A line in the cart.
///
/// Name, price, and image are denormalized snapshots captured when the item
/// was added; the price is deliberately never re-synced to later catalog
/// changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_url: String,
    pub quantity: u32,
}

impl CartItem {
    /// Snapshot a product into a quantity-1 cart line.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            quantity: 1,
        }
    }

    /// The line total (price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.line_total(self.quantity)
    }
}

/// An action applied to the cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add one unit of the product, merging into an existing line.
    AddItem(Product),
    /// Remove the line entirely; no-op if absent.
    RemoveItem(ProductId),
    /// Set a line's quantity absolutely; zero removes the line. No-op if
    /// the id is absent.
    UpdateQuantity { id: ProductId, quantity: u32 },
    /// Empty the cart.
    Clear,
    /// Restore a previously persisted snapshot.
    Replace(Vec<CartItem>),
}

/// The in-progress purchase selection for the current session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartState {
    pub items: Vec<CartItem>,
}

impl CartState {
    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of price x quantity across all lines, recomputed on every call.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// True when the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pure transition function from (state, action) to the next state.
#[must_use]
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::AddItem(product) => {
            if let Some(item) = state.items.iter_mut().find(|item| item.id == product.id) {
                item.quantity += 1;
            } else {
                state.items.push(CartItem::from_product(&product));
            }
            state
        }
        CartAction::RemoveItem(id) => {
            state.items.retain(|item| item.id != id);
            state
        }
        CartAction::UpdateQuantity { id, quantity } => {
            if quantity == 0 {
                state.items.retain(|item| item.id != id);
            } else if let Some(item) = state.items.iter_mut().find(|item| item.id == id) {
                item.quantity = quantity;
            }
            state
        }
        CartAction::Clear => CartState::default(),
        CartAction::Replace(items) => CartState { items },
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::{ProductTag, Slug};

    fn product(name: &str, price: &str) -> Product {
        Product {
            id: ProductId::generate(),
            slug: Slug::from_name(name),
            name: name.to_owned(),
            description: String::new(),
            price: Price::parse(price).expect("valid price"),
            image_url: format!("https://img.example/{name}.jpg"),
            image_hint: "singing bowl".to_owned(),
            audio_url: String::new(),
            tag: ProductTag::SingingBowl,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_item_appends_with_quantity_one() {
        let bowl = product("Zen Harmony Bowl", "99.99");
        let state = reduce(CartState::default(), CartAction::AddItem(bowl.clone()));

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, bowl.id);
        assert_eq!(state.items[0].quantity, 1);
        assert_eq!(state.items[0].price, bowl.price);
    }

    #[test]
    fn test_add_same_product_twice_merges_into_one_line() {
        let bowl = product("Zen Harmony Bowl", "99.99");
        let mut state = reduce(CartState::default(), CartAction::AddItem(bowl.clone()));
        state = reduce(state, CartAction::AddItem(bowl));

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].quantity, 2);
    }

    #[test]
    fn test_no_two_lines_share_an_id_and_quantities_stay_positive() {
        let a = product("Bowl A", "10.00");
        let b = product("Bowl B", "20.00");

        let mut state = CartState::default();
        for action in [
            CartAction::AddItem(a.clone()),
            CartAction::AddItem(b.clone()),
            CartAction::AddItem(a.clone()),
            CartAction::UpdateQuantity { id: b.id, quantity: 5 },
            CartAction::AddItem(b.clone()),
            CartAction::RemoveItem(a.id),
            CartAction::AddItem(a.clone()),
        ] {
            state = reduce(state, action);

            let mut seen = std::collections::HashSet::new();
            for item in &state.items {
                assert!(seen.insert(item.id), "duplicate id in cart");
                assert!(item.quantity >= 1, "zero-quantity line retained");
            }
        }
    }

    #[test]
    fn test_update_quantity_zero_removes_and_later_update_is_noop() {
        let bowl = product("Zen Harmony Bowl", "99.99");
        let mut state = reduce(CartState::default(), CartAction::AddItem(bowl.clone()));

        state = reduce(state, CartAction::UpdateQuantity { id: bowl.id, quantity: 0 });
        assert!(state.is_empty());

        // Entry stays absent without an intervening AddItem.
        state = reduce(state, CartAction::UpdateQuantity { id: bowl.id, quantity: 3 });
        assert!(state.is_empty());
    }

    #[test]
    fn test_update_quantity_is_absolute_not_delta() {
        let bowl = product("Zen Harmony Bowl", "99.99");
        let mut state = reduce(CartState::default(), CartAction::AddItem(bowl.clone()));
        state = reduce(state, CartAction::AddItem(bowl.clone()));

        state = reduce(state, CartAction::UpdateQuantity { id: bowl.id, quantity: 7 });
        assert_eq!(state.items[0].quantity, 7);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let bowl = product("Zen Harmony Bowl", "99.99");
        let state = reduce(CartState::default(), CartAction::AddItem(bowl));
        let before = state.clone();

        let state = reduce(state, CartAction::RemoveItem(ProductId::generate()));
        assert_eq!(state, before);
    }

    #[test]
    fn test_total_price_recomputes_from_lines() {
        let a = product("Bowl A", "19.99");
        let b = product("Bowl B", "59.99");

        let mut state = CartState::default();
        state = reduce(state, CartAction::AddItem(a.clone()));
        state = reduce(state, CartAction::AddItem(a.clone()));
        state = reduce(state, CartAction::AddItem(b));

        // 2 x 19.99 + 1 x 59.99
        assert_eq!(state.total_price(), Decimal::new(9997, 2));

        state = reduce(state, CartAction::UpdateQuantity { id: a.id, quantity: 1 });
        assert_eq!(state.total_price(), Decimal::new(7998, 2));
    }

    #[test]
    fn test_price_is_snapshotted_at_add_time() {
        let bowl = product("Zen Harmony Bowl", "99.99");
        let state = reduce(CartState::default(), CartAction::AddItem(bowl.clone()));

        // A later catalog change does not reach into the cart.
        let mut repriced = bowl;
        repriced.price = Price::parse("149.99").expect("valid price");
        assert_ne!(state.items[0].price, repriced.price);
        assert_eq!(state.items[0].price, Price::parse("99.99").expect("valid price"));
    }

    #[test]
    fn test_add_two_products_then_remove_one() {
        let a = product("Bowl A", "10.00");
        let b = product("Bowl B", "20.00");

        let mut state = CartState::default();
        state = reduce(state, CartAction::AddItem(a.clone()));
        state = reduce(state, CartAction::AddItem(b.clone()));
        state = reduce(state, CartAction::AddItem(b.clone()));
        state = reduce(state, CartAction::RemoveItem(a.id));

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.total_items(), state.items[0].quantity);
        assert_eq!(state.items[0].id, b.id);
    }

    #[test]
    fn test_clear_empties_the_cart() {
        let a = product("Bowl A", "10.00");
        let mut state = reduce(CartState::default(), CartAction::AddItem(a));
        state = reduce(state, CartAction::Clear);
        assert!(state.is_empty());
        assert_eq!(state.total_items(), 0);
        assert_eq!(state.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_replace_restores_a_snapshot() {
        let a = product("Bowl A", "10.00");
        let snapshot = vec![CartItem {
            quantity: 4,
            ..CartItem::from_product(&a)
        }];

        let state = reduce(CartState::default(), CartAction::Replace(snapshot.clone()));
        assert_eq!(state.items, snapshot);
        assert_eq!(state.total_items(), 4);
    }
}
