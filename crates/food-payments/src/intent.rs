//! Payment Authorization
//!
//! Requests a client secret whenever the chargeable amount changes. Requests
//! may overlap when the amount changes quickly; only the most recently issued
//! one is allowed to fill the intent slot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;

use food_core::ChargeableAmount;

use crate::backend::PaymentBackend;
use crate::provider::ClientSecret;

/// Lifecycle of a payment intent as seen by the client
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentStatus {
    /// Issued, waiting for a payment method
    Pending,
}

/// Server-side authorization for one amount
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentIntent {
    pub amount: ChargeableAmount,
    pub client_secret: ClientSecret,
    pub status: IntentStatus,
}

/// What an [`AuthorizationRequester::observe`] call did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntentUpdate {
    /// Amount missing or below the minimum; nothing changed
    NotChargeable,

    /// Same amount as the last request; nothing changed
    Unchanged,

    /// New intent stored in the slot
    Ready(PaymentIntent),

    /// Response arrived after a newer request was issued and was dropped
    Stale,

    /// Request failed; the slot stays empty
    Failed,
}

/// Ticket for an issued request
#[derive(Clone, Copy, Debug)]
struct IntentRequest {
    seq: u64,
    amount: ChargeableAmount,
}

#[derive(Debug, Default)]
struct Slot {
    issued_seq: u64,
    last_amount: Option<ChargeableAmount>,
    current: Option<PaymentIntent>,
}

/// Keeps the current payment intent in sync with the amount being charged
pub struct AuthorizationRequester {
    backend: Arc<dyn PaymentBackend>,
    slot: Mutex<Slot>,
}

impl AuthorizationRequester {
    pub fn new(backend: Arc<dyn PaymentBackend>) -> Self {
        Self {
            backend,
            slot: Mutex::new(Slot::default()),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// React to the observed amount; `None` stands for a non-numeric value
    pub async fn observe(&self, amount: Option<Decimal>) -> IntentUpdate {
        self.observe_with(amount, || {}).await
    }

    /// Same as [`observe`](Self::observe), calling `on_issue` once a request
    /// has actually been issued and the slot cleared
    pub(crate) async fn observe_with(
        &self,
        amount: Option<Decimal>,
        on_issue: impl FnOnce() + Send,
    ) -> IntentUpdate {
        let Some(amount) = amount.and_then(ChargeableAmount::new) else {
            return IntentUpdate::NotChargeable;
        };
        let Some(request) = self.begin(amount) else {
            return IntentUpdate::Unchanged;
        };
        on_issue();
        self.finish(request).await
    }

    /// Drop the current intent and forget the last amount; responses to
    /// requests already in flight become stale
    pub(crate) fn reset(&self) {
        let mut slot = self.slot();
        slot.issued_seq += 1;
        slot.last_amount = None;
        slot.current = None;
    }

    /// Claim a sequence number and clear the slot, unless `amount` was
    /// already requested last
    fn begin(&self, amount: ChargeableAmount) -> Option<IntentRequest> {
        let mut slot = self.slot();
        if slot.last_amount == Some(amount) {
            return None;
        }

        slot.issued_seq += 1;
        slot.last_amount = Some(amount);
        // A secret is only valid for the amount it was issued for.
        slot.current = None;

        Some(IntentRequest {
            seq: slot.issued_seq,
            amount,
        })
    }

    /// Perform the request and store the result if it is still the latest
    async fn finish(&self, request: IntentRequest) -> IntentUpdate {
        tracing::debug!(amount = %request.amount, seq = request.seq, "Requesting payment intent");
        let result = self.backend.create_payment_intent(request.amount).await;

        let mut slot = self.slot();
        if slot.issued_seq != request.seq {
            tracing::debug!(seq = request.seq, latest = slot.issued_seq, "Dropping stale payment intent");
            return IntentUpdate::Stale;
        }

        match result {
            Ok(client_secret) => {
                let intent = PaymentIntent {
                    amount: request.amount,
                    client_secret,
                    status: IntentStatus::Pending,
                };
                slot.current = Some(intent.clone());
                tracing::info!(amount = %request.amount, "Payment intent ready");
                IntentUpdate::Ready(intent)
            }
            Err(err) => {
                // Forget the amount so observing it again retries.
                slot.last_amount = None;
                tracing::warn!(amount = %request.amount, error = %err, "Payment intent request failed");
                IntentUpdate::Failed
            }
        }
    }

    /// Latest resolved intent
    pub fn current(&self) -> Option<PaymentIntent> {
        self.slot().current.clone()
    }

    pub fn client_secret(&self) -> Option<ClientSecret> {
        self.slot().current.as_ref().map(|intent| intent.client_secret.clone())
    }

    pub fn is_ready(&self) -> bool {
        self.slot().current.is_some()
    }
}
