//! Checkout Flow
//!
//! Drives one checkout attempt through
//! `Idle -> AwaitingIntent -> Ready -> Submitting -> {Succeeded, Failed}`.
//!
//! ```text
//!  cart total ──▶ AuthorizationRequester ──▶ client secret slot
//!                                                  │ (read at confirm time)
//!  submit ──▶ create_payment_method ──▶ confirm_card_payment ──▶ OrderRecorder
//!                 │ error                   │ error / failed         │ error
//!                 └────────────── Failed (one inline message) ◀──────┘
//! ```
//!
//! Nothing here returns an error to the caller: every failure ends up in the
//! [`CheckoutView`] the UI watches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use food_core::{AuthSession, CartSnapshot, OrderRecord};

use crate::backend::PaymentBackend;
use crate::intent::{AuthorizationRequester, IntentUpdate};
use crate::provider::{BillingDetails, CardElement, CardProvider, ConfirmationResult};
use crate::recorder::{Navigator, OrderRecorder};

/// Shown when additional card authentication is needed
pub const REQUIRES_ACTION_MESSAGE: &str =
    "Your bank needs you to authenticate this payment. Please try again.";

/// Shown when the amount changed while the card was being checked
pub const INTENT_MISSING_MESSAGE: &str =
    "Your total changed while paying. Please review your order and try again.";

/// Checkout attempt state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Nothing chargeable yet
    #[default]
    Idle,

    /// Waiting for a client secret
    AwaitingIntent,

    /// Client secret available
    Ready,

    /// Payment in flight
    Submitting,

    /// Order recorded; terminal
    Succeeded,

    /// Last attempt failed; may retry
    Failed,
}

impl CheckoutPhase {
    const fn accepts_submit(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

/// What the presentation layer renders
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckoutView {
    pub phase: CheckoutPhase,

    /// Single inline error; empty when there is nothing to show
    pub error: String,

    /// Whether the pay button is enabled
    pub submit_enabled: bool,

    /// Set once the payment has been recorded
    pub transaction_id: Option<String>,
}

/// Result of one [`Checkout::submit`] call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not ready (widget missing, no secret, attempt in flight); nothing happened
    Skipped,

    /// Attempt failed; `message` is what the user sees
    Failed { message: String },

    /// Card needs extra authentication
    RequiresAction,

    /// Payment confirmed and order stored
    Recorded(OrderRecord),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One checkout attempt for one cart
pub struct Checkout {
    session: AuthSession,
    cart: Mutex<CartSnapshot>,
    intents: AuthorizationRequester,
    recorder: OrderRecorder,
    provider: Mutex<Option<Arc<dyn CardProvider>>>,
    in_flight: AtomicBool,
    /// Paid for but not stored yet
    pending: Mutex<Option<OrderRecord>>,
    view: watch::Sender<CheckoutView>,
}

impl Checkout {
    pub fn new(
        session: AuthSession,
        cart: CartSnapshot,
        backend: Arc<dyn PaymentBackend>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (view, _) = watch::channel(CheckoutView::default());
        Self {
            session,
            cart: Mutex::new(cart),
            intents: AuthorizationRequester::new(backend.clone()),
            recorder: OrderRecorder::new(backend, navigator),
            provider: Mutex::new(None),
            in_flight: AtomicBool::new(false),
            pending: Mutex::new(None),
            view,
        }
    }

    /// Watch the view state
    pub fn subscribe(&self) -> watch::Receiver<CheckoutView> {
        self.view.subscribe()
    }

    /// Current view state
    pub fn view(&self) -> CheckoutView {
        self.view.borrow().clone()
    }

    pub fn cart(&self) -> CartSnapshot {
        lock(&self.cart).clone()
    }

    pub const fn intents(&self) -> &AuthorizationRequester {
        &self.intents
    }

    /// The card widget finished mounting
    pub fn attach_provider(&self, provider: Arc<dyn CardProvider>) {
        tracing::debug!(provider = provider.name(), "Card provider attached");
        *lock(&self.provider) = Some(provider);
        self.publish(|_| {});
    }

    fn provider(&self) -> Option<Arc<dyn CardProvider>> {
        lock(&self.provider).clone()
    }

    /// Request authorization for the current cart total
    pub async fn start(&self) -> IntentUpdate {
        self.authorize_cart().await
    }

    /// Swap in a new cart snapshot; a changed total re-requests authorization
    pub async fn replace_cart(&self, cart: CartSnapshot) -> IntentUpdate {
        if self.view.borrow().phase == CheckoutPhase::Succeeded {
            return IntentUpdate::Unchanged;
        }
        if let Some(order) = lock(&self.pending).as_ref() {
            tracing::warn!(
                transaction_id = %order.transaction_id,
                "Cart change ignored: paid order not recorded yet"
            );
            return IntentUpdate::Unchanged;
        }
        *lock(&self.cart) = cart;
        self.authorize_cart().await
    }

    async fn authorize_cart(&self) -> IntentUpdate {
        let Some(amount) = self.cart().chargeable_total() else {
            // Nothing to pay for; an older secret must not be confirmed.
            self.intents.reset();
            self.publish(|view| {
                if !matches!(view.phase, CheckoutPhase::Submitting | CheckoutPhase::Succeeded) {
                    view.phase = CheckoutPhase::Idle;
                }
            });
            return IntentUpdate::NotChargeable;
        };

        let update = self
            .intents
            .observe_with(Some(amount.price()), || {
                self.publish(|view| {
                    if !matches!(view.phase, CheckoutPhase::Submitting | CheckoutPhase::Succeeded) {
                        view.phase = CheckoutPhase::AwaitingIntent;
                    }
                });
            })
            .await;

        let next = match update {
            IntentUpdate::Ready(_) => CheckoutPhase::Ready,
            IntentUpdate::Failed => CheckoutPhase::Idle,
            _ => return update,
        };
        self.publish(|view| {
            if view.phase == CheckoutPhase::AwaitingIntent {
                view.phase = next;
            }
        });
        update
    }

    /// An intent to confirm, or a paid order to store
    fn can_pay(&self) -> bool {
        self.intents.is_ready() || lock(&self.pending).is_some()
    }

    /// Pay for the cart with the card currently entered in `card`
    pub async fn submit(&self, card: Option<&CardElement>) -> SubmitOutcome {
        let (Some(provider), Some(card)) = (self.provider(), card) else {
            tracing::debug!("Submit ignored: card widget not ready");
            return SubmitOutcome::Skipped;
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return SubmitOutcome::Skipped;
        }

        if !self.view.borrow().phase.accepts_submit() || !self.can_pay() {
            self.in_flight.store(false, Ordering::Release);
            return SubmitOutcome::Skipped;
        }

        self.publish(|view| view.phase = CheckoutPhase::Submitting);
        let outcome = self.attempt(provider.as_ref(), card).await;
        self.in_flight.store(false, Ordering::Release);

        self.publish(|view| match &outcome {
            SubmitOutcome::Skipped => {}
            SubmitOutcome::Failed { message } => {
                view.phase = CheckoutPhase::Failed;
                view.error.clone_from(message);
            }
            SubmitOutcome::RequiresAction => {
                view.phase = CheckoutPhase::Failed;
                view.error = REQUIRES_ACTION_MESSAGE.into();
            }
            SubmitOutcome::Recorded(order) => {
                view.phase = CheckoutPhase::Succeeded;
                view.error.clear();
                view.transaction_id = Some(order.transaction_id.clone());
            }
        });
        outcome
    }

    async fn attempt(&self, provider: &dyn CardProvider, card: &CardElement) -> SubmitOutcome {
        // Already charged; only the order still needs storing.
        let pending = lock(&self.pending).clone();
        if let Some(order) = pending {
            tracing::info!(transaction_id = %order.transaction_id, "Retrying order persist");
            return self.record(order).await;
        }

        let method = match provider.create_payment_method(card).await {
            Ok(method) => method,
            Err(err) => {
                tracing::warn!(code = ?err.code, "Card rejected by provider");
                return SubmitOutcome::Failed {
                    message: err.message,
                };
            }
        };
        self.publish(|view| view.error.clear());

        // The order must describe exactly what the intent charges.
        let cart = self.cart();
        let Some(intent) = self
            .intents
            .current()
            .filter(|intent| cart.chargeable_total() == Some(intent.amount))
        else {
            return SubmitOutcome::Failed {
                message: INTENT_MISSING_MESSAGE.into(),
            };
        };
        let billing = BillingDetails::for_user(&self.session.user);

        let result = match provider
            .confirm_card_payment(&intent.client_secret, &method, &billing)
            .await
        {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(code = ?err.code, "Payment confirmation rejected");
                return SubmitOutcome::Failed {
                    message: err.message,
                };
            }
        };

        match result {
            ConfirmationResult::Succeeded { transaction_id } => {
                tracing::info!(transaction_id = %transaction_id, amount = %intent.amount, "Payment confirmed");
                let order = OrderRecorder::build(&self.session, &transaction_id, &cart);
                *lock(&self.pending) = Some(order.clone());
                self.record(order).await
            }
            ConfirmationResult::RequiresAction => {
                tracing::info!("Payment requires additional authentication");
                SubmitOutcome::RequiresAction
            }
            ConfirmationResult::Failed { reason } => {
                tracing::warn!(reason = %reason, "Payment failed");
                SubmitOutcome::Failed { message: reason }
            }
        }
    }

    async fn record(&self, order: OrderRecord) -> SubmitOutcome {
        match self.recorder.record(&self.session, &order).await {
            Ok(saved) => {
                *lock(&self.pending) = None;
                SubmitOutcome::Recorded(saved)
            }
            Err(err) => {
                tracing::error!(
                    transaction_id = %order.transaction_id,
                    error = %err,
                    retryable = err.is_retryable(),
                    "Payment confirmed but order was not recorded"
                );
                SubmitOutcome::Failed {
                    message: err.user_message(),
                }
            }
        }
    }

    fn publish(&self, update: impl FnOnce(&mut CheckoutView)) {
        let can_submit = self.provider().is_some()
            && self.can_pay()
            && !self.in_flight.load(Ordering::Acquire);

        self.view.send_modify(|view| {
            update(view);
            view.submit_enabled = can_submit && view.phase.accepts_submit();
        });
    }
}
