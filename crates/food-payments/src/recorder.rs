//! Order Recording
//!
//! Persists the order for a confirmed payment and moves the user on to their
//! order list.

use std::sync::Arc;

use food_core::{AuthSession, CartSnapshot, OrderRecord};

use crate::backend::PaymentBackend;
use crate::error::Result;

/// Views the checkout can send the user to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// The buyer's order list
    Orders,
}

impl Route {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Orders => "/order",
        }
    }
}

/// Router of the hosting UI
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

pub struct OrderRecorder {
    backend: Arc<dyn PaymentBackend>,
    navigator: Arc<dyn Navigator>,
}

impl OrderRecorder {
    pub fn new(backend: Arc<dyn PaymentBackend>, navigator: Arc<dyn Navigator>) -> Self {
        Self { backend, navigator }
    }

    /// Order for `cart`, paid by the session's user under `transaction_id`
    pub fn build(session: &AuthSession, transaction_id: &str, cart: &CartSnapshot) -> OrderRecord {
        OrderRecord::pending(session.user.billing_email(), transaction_id, cart)
    }

    /// Persist `order`; navigates to the order list only on success
    pub async fn record(&self, session: &AuthSession, order: &OrderRecord) -> Result<OrderRecord> {
        let saved = self.backend.record_payment(&session.token, order).await?;

        tracing::info!(
            order_id = ?saved.id,
            transaction_id = %saved.transaction_id,
            price = %saved.price,
            quantity = saved.quantity,
            "Recorded order"
        );

        self.navigator.navigate(Route::Orders);
        Ok(saved)
    }
}
