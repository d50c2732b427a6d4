//! Order Records
//!
//! What the backend stores once a payment has been confirmed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartSnapshot;

/// Order lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Paid, waiting for the kitchen to accept it
    #[default]
    #[serde(rename = "order-pending", alias = "order pending")]
    Pending,

    /// Accepted by an administrator
    #[serde(rename = "confirmed")]
    Confirmed,
}

impl OrderStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "order-pending",
            Self::Confirmed => "confirmed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A paid order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Backend-assigned ID (absent until persisted)
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Buyer email
    pub email: String,

    /// Payment provider transaction ID
    #[serde(rename = "transactionId", alias = "transitionId")]
    pub transaction_id: String,

    /// Amount charged
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Number of cart entries paid for
    pub quantity: usize,

    pub status: OrderStatus,

    #[serde(rename = "itemName", default)]
    pub item_names: Vec<String>,

    #[serde(rename = "cartItems", default)]
    pub cart_item_ids: Vec<String>,

    #[serde(rename = "menuItems", default)]
    pub menu_item_ids: Vec<String>,

    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Build the record for a confirmed payment of `cart`
    pub fn pending(
        email: impl Into<String>,
        transaction_id: impl Into<String>,
        cart: &CartSnapshot,
    ) -> Self {
        Self {
            id: None,
            email: email.into(),
            transaction_id: transaction_id.into(),
            price: cart.total_price(),
            quantity: cart.item_count(),
            status: OrderStatus::Pending,
            item_names: cart.item_names(),
            cart_item_ids: cart.cart_item_ids(),
            menu_item_ids: cart.menu_item_ids(),
            created_at: Utc::now(),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == OrderStatus::Confirmed
    }

    /// Mark as accepted by an administrator
    pub fn confirm(&mut self) {
        self.status = OrderStatus::Confirmed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pending_from_cart() {
        let cart = CartSnapshot::new(vec![CartItem::new("a", "Soup", "m1", dec!(45))]);
        let order = OrderRecord::pending("buyer@example.com", "pi_99", &cart);

        assert_eq!(order.price, dec!(45));
        assert_eq!(order.quantity, 1);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.item_names, vec!["Soup"]);
        assert_eq!(order.cart_item_ids, vec!["a"]);
        assert_eq!(order.menu_item_ids, vec!["m1"]);
        assert!(order.id.is_none());
    }

    #[test]
    fn test_wire_format() {
        let cart = CartSnapshot::new(vec![CartItem::new("a", "Soup", "m1", dec!(45))]);
        let order = OrderRecord::pending("buyer@example.com", "pi_99", &cart);
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["transactionId"], "pi_99");
        assert_eq!(json["status"], "order-pending");
        assert_eq!(json["itemName"][0], "Soup");
        assert_eq!(json["price"].as_f64(), Some(45.0));
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn test_reads_legacy_fields() {
        let json = r#"{
            "_id": "o1",
            "email": "buyer@example.com",
            "transitionId": "pi_1",
            "price": 20.5,
            "quantity": 2,
            "status": "order pending"
        }"#;
        let mut order: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(order.id.as_deref(), Some("o1"));
        assert_eq!(order.transaction_id, "pi_1");
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.item_names.is_empty());

        order.confirm();
        assert!(order.is_confirmed());
        assert_eq!(order.status.to_string(), "confirmed");
    }
}
