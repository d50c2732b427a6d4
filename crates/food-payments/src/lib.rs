//! # food-payments
//!
//! Client-side checkout for the food-ordering app: payment authorization,
//! card confirmation through an embedded card widget, and order recording.
//!
//! ## Flow
//!
//! ```text
//! ┌────────────┐  POST /create-payment-intent  ┌─────────────┐
//! │  Checkout  │──────────────────────────────▶│   Backend   │
//! │            │◀──────── client secret ───────│             │
//! │            │                               │             │
//! │            │  create method / confirm      ┌─────────────┐
//! │            │──────────────────────────────▶│ Card widget │
//! │            │◀─────── transaction id ───────│  (iframe)   │
//! │            │                               └─────────────┘
//! │            │  POST /payments               ┌─────────────┐
//! │            │──────────────────────────────▶│   Backend   │
//! └────────────┘                               └─────────────┘
//! ```
//!
//! The widget is reached only through [`CardProvider`], so card numbers never
//! touch this crate; the backend through [`PaymentBackend`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use food_payments::{CardElement, Checkout, RestClient};
//!
//! let backend = Arc::new(RestClient::from_env()?);
//! let checkout = Checkout::new(session, cart, backend, navigator);
//!
//! checkout.attach_provider(card_widget);
//! checkout.start().await;
//!
//! // On form submit
//! checkout.submit(Some(&CardElement::new("card-element"))).await;
//! ```

mod backend;
mod bookings;
mod checkout;
mod config;
mod error;
mod intent;
mod mock;
mod provider;
mod recorder;

#[cfg(test)]
mod testing;

pub use backend::{PaymentBackend, RestClient};
pub use bookings::{BookingDesk, Notice};
pub use checkout::{
    Checkout, CheckoutPhase, CheckoutView, INTENT_MISSING_MESSAGE, REQUIRES_ACTION_MESSAGE,
    SubmitOutcome,
};
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use error::{CheckoutError, Result};
pub use intent::{AuthorizationRequester, IntentStatus, IntentUpdate, PaymentIntent};
pub use mock::MockCardProvider;
pub use provider::{
    BillingDetails, CardElement, CardMetadata, CardProvider, ClientSecret, ConfirmationResult,
    ConfirmationStatus, PaymentMethodToken, ProviderError,
};
pub use recorder::{Navigator, OrderRecorder, Route};
