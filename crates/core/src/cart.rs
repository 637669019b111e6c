//! Cart and favorites state.
//!
//! [`CartState`] is a plain value with reducer-style methods. It performs no
//! I/O; the storefront's cart manager wraps it, notifies subscribers and
//! persists the slice each method reports as touched.
//!
//! # Invariants
//!
//! - At most one [`CartLine`] per [`FoodItemId`].
//! - Every line has `quantity >= 1`. Operations that would drop a quantity to
//!   zero or below remove the line instead.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::FoodItem;
use crate::types::{FoodItemId, Price};

/// One of the two independently persisted pieces of [`CartState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Cart,
    Favorites,
}

impl Slice {
    /// Storage key for this slice.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Cart => "cart-state",
            Self::Favorites => "favorites-state",
        }
    }
}

/// One entry in the cart.
///
/// Display fields are copied from the catalog item when the line is first
/// created and are not refreshed by later adds of the same item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item_id: FoodItemId,
    pub quantity: u32,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price: Price,
    pub image: String,
    pub restaurant: String,
    #[serde(default)]
    pub cook_time: String,
}

impl CartLine {
    /// Snapshot `item` into a new line. A zero quantity is raised to one.
    #[must_use]
    pub fn from_item(item: &FoodItem, quantity: u32) -> Self {
        Self {
            item_id: item.id,
            quantity: quantity.max(1),
            name: item.name.clone(),
            category: item.category.clone(),
            price: item.price,
            image: item.image.clone(),
            restaurant: item.restaurant.clone(),
            cook_time: item.cook_time.clone(),
        }
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Set of favorite item IDs.
pub type FavoriteSet = BTreeSet<FoodItemId>;

/// The cart and favorites, held together as the unit of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    cart: Vec<CartLine>,
    favorites: FavoriteSet,
}

impl CartState {
    /// An empty cart with no favorites.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.cart
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// The line for `item_id`, if any.
    #[must_use]
    pub fn line(&self, item_id: FoodItemId) -> Option<&CartLine> {
        self.cart.iter().find(|line| line.item_id == item_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` of `item` (zero counts as one).
    ///
    /// An existing line for the same item has its quantity increased; its
    /// display fields are left as they were.
    pub fn add(&mut self, item: &FoodItem, quantity: u32) -> Slice {
        let quantity = quantity.max(1);
        match self.cart.iter_mut().find(|line| line.item_id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.cart.push(CartLine::from_item(item, quantity)),
        }
        Slice::Cart
    }

    /// Remove the line for `item_id`. Absent IDs are ignored.
    pub fn remove(&mut self, item_id: FoodItemId) -> Slice {
        self.cart.retain(|line| line.item_id != item_id);
        Slice::Cart
    }

    /// Set the quantity of the line for `item_id`.
    ///
    /// A quantity of zero or below removes the line. Absent IDs are ignored.
    pub fn update_quantity(&mut self, item_id: FoodItemId, quantity: i64) -> Slice {
        if quantity <= 0 {
            return self.remove(item_id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.cart.iter_mut().find(|line| line.item_id == item_id) {
            line.quantity = quantity;
        }
        Slice::Cart
    }

    /// Remove every line.
    pub fn clear(&mut self) -> Slice {
        self.cart.clear();
        Slice::Cart
    }

    /// Add `item_id` to favorites if absent, remove it if present.
    pub fn toggle_favorite(&mut self, item_id: FoodItemId) -> Slice {
        if !self.favorites.remove(&item_id) {
            self.favorites.insert(item_id);
        }
        Slice::Favorites
    }

    /// Replace the cart with persisted lines.
    ///
    /// Persisted data is not trusted to uphold the invariants: duplicate IDs
    /// are merged into the first occurrence and zero-quantity lines dropped.
    pub fn replace_cart(&mut self, lines: Vec<CartLine>) -> Slice {
        let mut cart: Vec<CartLine> = Vec::with_capacity(lines.len());
        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            match cart.iter_mut().find(|existing| existing.item_id == line.item_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.push(line),
            }
        }
        self.cart = cart;
        Slice::Cart
    }

    /// Replace favorites with persisted IDs.
    pub fn replace_favorites(&mut self, ids: impl IntoIterator<Item = FoodItemId>) -> Slice {
        self.favorites = ids.into_iter().collect();
        Slice::Favorites
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities (not the number of lines).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.iter().map(|line| u64::from(line.quantity)).sum()
    }

    #[must_use]
    pub fn is_favorite(&self, item_id: FoodItemId) -> bool {
        self.favorites.contains(&item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn item(id: i32) -> FoodItem {
        Catalog::builtin()
            .item(FoodItemId::new(id))
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_add_merges_duplicates() {
        let mut state = CartState::new();
        let pizza = item(1);
        state.add(&pizza, 1);
        state.add(&pizza, 2);
        state.add(&pizza, 4);

        assert_eq!(state.lines().len(), 1);
        assert_eq!(state.line(pizza.id).unwrap().quantity, 7);
    }

    #[test]
    fn test_add_keeps_first_snapshot() {
        let mut state = CartState::new();
        let pizza = item(1);
        state.add(&pizza, 1);

        let mut repriced = pizza.clone();
        repriced.price = Price::from_cents(2500);
        repriced.name = "Renamed".to_string();
        state.add(&repriced, 1);

        let line = state.line(pizza.id).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, Price::from_cents(1899));
        assert_eq!(line.name, "Margherita Pizza");
    }

    #[test]
    fn test_add_appends_in_insertion_order() {
        let mut state = CartState::new();
        state.add(&item(3), 1);
        state.add(&item(1), 1);
        state.add(&item(3), 1);

        let ids: Vec<_> = state.lines().iter().map(|l| l.item_id.as_i32()).collect();
        assert_eq!(ids, [3, 1]);
    }

    #[test]
    fn test_add_zero_quantity_counts_as_one() {
        let mut state = CartState::new();
        state.add(&item(2), 0);
        assert_eq!(state.item_count(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut state = CartState::new();
        state.add(&item(1), 1);
        state.add(&item(2), 1);

        state.remove(FoodItemId::new(1));
        let after_first = state.clone();
        state.remove(FoodItemId::new(1));

        assert_eq!(state, after_first);
        assert_eq!(state.lines().len(), 1);
    }

    #[test]
    fn test_update_quantity() {
        let mut state = CartState::new();
        state.add(&item(1), 1);

        state.update_quantity(FoodItemId::new(1), 5);
        assert_eq!(state.item_count(), 5);

        state.update_quantity(FoodItemId::new(1), 0);
        assert!(state.is_empty());
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let mut state = CartState::new();
        state.add(&item(4), 2);
        state.update_quantity(FoodItemId::new(4), -3);
        assert!(state.line(FoodItemId::new(4)).is_none());
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut state = CartState::new();
        state.add(&item(1), 2);
        let before = state.clone();

        state.update_quantity(FoodItemId::new(42), 9);
        state.update_quantity(FoodItemId::new(42), 0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_update_quantity_saturates() {
        let mut state = CartState::new();
        state.add(&item(1), 1);
        state.update_quantity(FoodItemId::new(1), i64::MAX);
        assert_eq!(state.line(FoodItemId::new(1)).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_clear() {
        let mut state = CartState::new();
        state.add(&item(1), 1);
        state.toggle_favorite(FoodItemId::new(1));
        assert_eq!(state.clear(), Slice::Cart);
        assert!(state.is_empty());
        assert!(state.is_favorite(FoodItemId::new(1)));
    }

    #[test]
    fn test_total_and_count() {
        let mut state = CartState::new();
        assert_eq!(state.total(), Price::ZERO);
        assert_eq!(state.item_count(), 0);

        state.add(&item(1), 2); // 2 x 18.99
        state.add(&item(8), 1); // 1 x 6.99
        assert_eq!(state.total(), Price::from_cents(4497));
        assert_eq!(state.item_count(), 3);
    }

    #[test]
    fn test_add_then_zero_scenario() {
        let mut state = CartState::new();
        let pizza = item(1);

        state.add(&pizza, 1);
        assert_eq!(state.total(), Price::from_cents(1899));
        assert_eq!(state.item_count(), 1);

        state.add(&pizza, 2);
        assert_eq!(state.lines().len(), 1);
        assert_eq!(state.line(pizza.id).unwrap().quantity, 3);
        assert_eq!(state.total(), Price::from_cents(5697));

        state.update_quantity(pizza.id, 0);
        assert!(state.is_empty());
        assert_eq!(state.total(), Price::ZERO);
    }

    #[test]
    fn test_toggle_favorite_is_involution() {
        let mut state = CartState::new();
        let id = FoodItemId::new(5);

        assert_eq!(state.toggle_favorite(id), Slice::Favorites);
        assert!(state.is_favorite(id));
        state.toggle_favorite(id);
        assert!(!state.is_favorite(id));
        assert!(state.favorites().is_empty());
    }

    #[test]
    fn test_replace_cart_restores_invariants() {
        let pizza = CartLine::from_item(&item(1), 2);
        let mut dup = CartLine::from_item(&item(1), 3);
        dup.name = "Stale".to_string();
        let mut zero = CartLine::from_item(&item(2), 1);
        zero.quantity = 0;

        let mut state = CartState::new();
        state.replace_cart(vec![pizza, zero, dup]);

        assert_eq!(state.lines().len(), 1);
        let line = state.line(FoodItemId::new(1)).unwrap();
        assert_eq!(line.quantity, 5);
        assert_eq!(line.name, "Margherita Pizza");
    }

    #[test]
    fn test_replace_favorites_dedupes() {
        let mut state = CartState::new();
        state.replace_favorites([1, 2, 2, 1].map(FoodItemId::new));
        assert_eq!(state.favorites().len(), 2);
    }

    #[test]
    fn test_cart_line_wire_format() {
        let line = CartLine::from_item(&item(1), 2);
        let value = serde_json::to_value(&line).unwrap();

        assert_eq!(value["itemId"], 1);
        assert_eq!(value["quantity"], 2);
        assert_eq!(value["price"], 18.99);
        assert_eq!(value["restaurant"], "Tony's Pizzeria");
        assert_eq!(value["cookTime"], "25-30 min");
    }

    #[test]
    fn test_cart_line_accepts_minimal_fields() {
        let json = r#"{"itemId":4,"quantity":1,"name":"Beef Tacos","price":12.99,
            "image":"https://example.com/t.jpg","restaurant":"Casa de Tacos"}"#;
        let line: CartLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.item_id, FoodItemId::new(4));
        assert!(line.category.is_empty());
    }

    #[test]
    fn test_slice_keys() {
        assert_eq!(Slice::Cart.storage_key(), "cart-state");
        assert_eq!(Slice::Favorites.storage_key(), "favorites-state");
    }
}
