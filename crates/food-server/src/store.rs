//! Order Storage

use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use food_core::{OrderRecord, OrderStatus};

/// Order storage trait
pub trait OrderStore: Send + Sync {
    /// Store a new order; assigns its ID and resets its status
    fn insert(&self, order: OrderRecord) -> OrderRecord;

    /// Orders placed by `email`, oldest first
    fn by_email(&self, email: &str) -> Vec<OrderRecord>;

    /// Every order, oldest first
    fn all(&self) -> Vec<OrderRecord>;

    /// Mark an order confirmed; `None` if it does not exist
    fn confirm(&self, id: &str) -> Option<OrderRecord>;
}

/// In-memory order store (for development)
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: RwLock<Vec<OrderRecord>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for MemoryOrderStore {
    fn insert(&self, mut order: OrderRecord) -> OrderRecord {
        order.id = Some(Uuid::new_v4().to_string());
        order.status = OrderStatus::Pending;

        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        orders.push(order.clone());
        order
    }

    fn by_email(&self, email: &str) -> Vec<OrderRecord> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        orders.iter().filter(|order| order.email == email).cloned().collect()
    }

    fn all(&self) -> Vec<OrderRecord> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn confirm(&self, id: &str) -> Option<OrderRecord> {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        let order = orders
            .iter_mut()
            .find(|order| order.id.as_deref() == Some(id))?;
        order.confirm();
        Some(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use food_core::{CartItem, CartSnapshot};
    use rust_decimal_macros::dec;

    fn order(email: &str) -> OrderRecord {
        let cart = CartSnapshot::new(vec![CartItem::new("a", "Soup", "m1", dec!(45))]);
        OrderRecord::pending(email, "pi_1", &cart)
    }

    #[test]
    fn test_insert_assigns_id_and_pending_status() {
        let store = MemoryOrderStore::new();
        let mut submitted = order("a@example.com");
        submitted.status = OrderStatus::Confirmed;

        let saved = store.insert(submitted);
        assert!(saved.id.is_some());
        assert_eq!(saved.status, OrderStatus::Pending);
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn test_filter_and_confirm() {
        let store = MemoryOrderStore::new();
        let first = store.insert(order("a@example.com"));
        store.insert(order("b@example.com"));

        assert_eq!(store.by_email("a@example.com").len(), 1);
        assert!(store.by_email("c@example.com").is_empty());

        let confirmed = store.confirm(first.id.as_deref().unwrap()).unwrap();
        assert!(confirmed.is_confirmed());
        assert!(store.all()[0].is_confirmed());
        assert!(store.confirm("missing").is_none());
    }
}
