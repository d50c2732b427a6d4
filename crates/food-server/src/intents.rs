//! Payment Intent Issuing
//!
//! Creates the server-side payment intent whose client secret the checkout
//! confirms against.

use async_trait::async_trait;
use stripe::{Client, CreatePaymentIntent, Currency, PaymentIntent};

use food_core::ChargeableAmount;

use crate::error::{ApiError, Result};

/// Payment intent backend (Strategy pattern)
#[async_trait]
pub trait IntentIssuer: Send + Sync {
    /// Create an intent for `amount` and return its client secret
    async fn issue(&self, amount: ChargeableAmount) -> Result<String>;

    /// Issuer name
    fn name(&self) -> &str;
}

/// Stripe client wrapper
pub struct StripeIntentIssuer {
    client: Client,
}

impl StripeIntentIssuer {
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(secret_key),
        }
    }
}

#[async_trait]
impl IntentIssuer for StripeIntentIssuer {
    async fn issue(&self, amount: ChargeableAmount) -> Result<String> {
        let cents = amount
            .to_minor_units()
            .ok_or_else(|| ApiError::BadRequest(format!("amount out of range: {amount}")))?;

        let mut params = CreatePaymentIntent::new(cents, Currency::USD);
        params.payment_method_types = Some(vec!["card".to_string()]);

        let intent = PaymentIntent::create(&self.client, params)
            .await
            .map_err(|e| ApiError::Stripe(e.to_string()))?;

        tracing::info!(intent_id = %intent.id, cents, "Created payment intent");

        intent
            .client_secret
            .ok_or_else(|| ApiError::Stripe("No client secret returned".into()))
    }

    fn name(&self) -> &str {
        "Stripe"
    }
}

/// Issues predictable secrets without calling Stripe
#[cfg(test)]
pub(crate) struct FixedIssuer;

#[cfg(test)]
#[async_trait]
impl IntentIssuer for FixedIssuer {
    async fn issue(&self, amount: ChargeableAmount) -> Result<String> {
        Ok(format!("pi_test_secret_{}", amount.to_minor_units().unwrap_or_default()))
    }

    fn name(&self) -> &str {
        "Fixed"
    }
}
