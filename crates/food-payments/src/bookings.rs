//! Booking Confirmation
//!
//! Admin view over all orders. Confirming a booking never changes the local
//! copy unless the backend accepted the change.

use std::sync::Arc;

use food_core::{BearerToken, OrderRecord, OrderStatus};

use crate::backend::PaymentBackend;
use crate::error::Result;

/// Transient notification for the admin
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Error(String),
}

pub struct BookingDesk {
    backend: Arc<dyn PaymentBackend>,
    token: BearerToken,
    bookings: Vec<OrderRecord>,
}

impl BookingDesk {
    pub fn new(backend: Arc<dyn PaymentBackend>, token: BearerToken) -> Self {
        Self {
            backend,
            token,
            bookings: Vec::new(),
        }
    }

    /// Reload every booking; returns how many there are
    pub async fn refresh(&mut self) -> Result<usize> {
        self.bookings = self.backend.all_orders(&self.token).await?;
        Ok(self.bookings.len())
    }

    pub fn bookings(&self) -> &[OrderRecord] {
        &self.bookings
    }

    pub fn pending_count(&self) -> usize {
        self.bookings
            .iter()
            .filter(|booking| booking.status == OrderStatus::Pending)
            .count()
    }

    /// Confirm the booking with backend ID `id`
    pub async fn confirm(&mut self, id: &str) -> Notice {
        let Some(index) = self
            .bookings
            .iter()
            .position(|booking| booking.id.as_deref() == Some(id))
        else {
            return Notice::Error(format!("Booking {id} not found"));
        };

        if self.bookings[index].is_confirmed() {
            return Notice::Info("Booking already confirmed".into());
        }

        match self.backend.confirm_order(&self.token, id).await {
            Ok(updated) => {
                tracing::info!(order_id = id, status = %updated.status, "Booking confirmed");
                self.bookings[index] = updated;
                Notice::Success("Payment Confirmed".into())
            }
            Err(err) => {
                tracing::warn!(order_id = id, error = %err, "Booking confirmation failed");
                Notice::Error(err.user_message())
            }
        }
    }
}
