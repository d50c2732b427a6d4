//! Cart Snapshot
//!
//! The cart as it stood when the user entered checkout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::money::ChargeableAmount;

/// One line in the cart
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Cart entry ID
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name of the dish
    pub name: String,

    /// Menu item this entry was added from
    pub menu_item_id: String,

    /// Price of this entry
    #[serde(rename = "price", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

impl CartItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        menu_item_id: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            menu_item_id: menu_item_id.into(),
            unit_price,
        }
    }
}

/// Immutable, ordered view of the cart for one checkout attempt
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartSnapshot {
    items: Vec<CartItem>,
}

impl CartSnapshot {
    pub const fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Parse the cart array returned by the backend
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entries in the cart
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all unit prices
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(|item| item.unit_price).sum()
    }

    /// Total as an authorizable amount, `None` when below the minimum
    pub fn chargeable_total(&self) -> Option<ChargeableAmount> {
        ChargeableAmount::new(self.total_price())
    }

    pub fn item_names(&self) -> Vec<String> {
        self.items.iter().map(|item| item.name.clone()).collect()
    }

    pub fn cart_item_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    pub fn menu_item_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.menu_item_id.clone()).collect()
    }
}

impl FromIterator<CartItem> for CartSnapshot {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> CartSnapshot {
        CartSnapshot::new(vec![
            CartItem::new("c1", "Soup", "m1", dec!(12.50)),
            CartItem::new("c2", "Salad", "m2", dec!(8.25)),
            CartItem::new("c3", "Soup", "m1", dec!(12.50)),
        ])
    }

    #[test]
    fn test_totals() {
        let cart = sample();
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total_price(), dec!(33.25));
        assert!(cart.chargeable_total().is_some());
    }

    #[test]
    fn test_derived_lists_keep_order() {
        let cart = sample();
        assert_eq!(cart.item_names(), vec!["Soup", "Salad", "Soup"]);
        assert_eq!(cart.cart_item_ids(), vec!["c1", "c2", "c3"]);
        assert_eq!(cart.menu_item_ids(), vec!["m1", "m2", "m1"]);
    }

    #[test]
    fn test_empty_cart_is_not_chargeable() {
        let cart = CartSnapshot::default();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
        assert!(cart.chargeable_total().is_none());
    }

    #[test]
    fn test_parse_backend_cart() {
        let json = r#"[
            {"_id": "a", "name": "Soup", "menuItemId": "m1", "price": 45, "email": "x@y.z"}
        ]"#;
        let cart = CartSnapshot::from_json(json).unwrap();
        assert_eq!(cart.items()[0].menu_item_id, "m1");
        assert_eq!(cart.total_price(), dec!(45));
    }
}
