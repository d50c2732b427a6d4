//! Card Payment Provider
//!
//! The hosted card widget is opaque: the application only ever sees a handle
//! to the mounted element, the payment-method token it produces, and the
//! confirmation result. Raw card numbers never pass through this crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use food_core::SessionUser;

/// Handle to a mounted card input element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardElement {
    id: String,
}

impl CardElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Authorization token for one payment intent
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClientSecret(..)")
    }
}

/// Non-sensitive card details returned with a payment method
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMetadata {
    pub brand: String,
    pub last4: String,
}

/// Single-use reference to verified card details
#[derive(Clone, PartialEq, Eq)]
pub struct PaymentMethodToken {
    id: String,
    card: Option<CardMetadata>,
}

impl PaymentMethodToken {
    pub fn new(id: impl Into<String>, card: Option<CardMetadata>) -> Self {
        Self { id: id.into(), card }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn card(&self) -> Option<&CardMetadata> {
        self.card.as_ref()
    }
}

// Tokens must stay out of logs; only the card metadata is shown.
impl std::fmt::Debug for PaymentMethodToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentMethodToken")
            .field("card", &self.card)
            .finish_non_exhaustive()
    }
}

/// Billing details attached to a confirmation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    pub name: String,
    pub email: String,
}

impl BillingDetails {
    /// Billing details for the signed-in user, with placeholder fallbacks
    pub fn for_user(user: &SessionUser) -> Self {
        Self {
            name: user.billing_name().to_string(),
            email: user.billing_email().to_string(),
        }
    }
}

/// Status of a confirmation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationStatus {
    Succeeded,
    RequiresAction,
    Failed,
}

/// Outcome of applying a payment method to a client secret
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmationResult {
    /// Charge went through
    Succeeded { transaction_id: String },

    /// Card needs an extra authentication step
    RequiresAction,

    /// Charge refused
    Failed { reason: String },
}

impl ConfirmationResult {
    pub fn succeeded(transaction_id: impl Into<String>) -> Self {
        Self::Succeeded {
            transaction_id: transaction_id.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub const fn status(&self) -> ConfirmationStatus {
        match self {
            Self::Succeeded { .. } => ConfirmationStatus::Succeeded,
            Self::RequiresAction => ConfirmationStatus::RequiresAction,
            Self::Failed { .. } => ConfirmationStatus::Failed,
        }
    }

    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            Self::Succeeded { transaction_id } => Some(transaction_id),
            _ => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Error reported by the payment provider
///
/// `message` is human readable and shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    /// Provider error code (`card_declined`, `incomplete_number`, ...)
    pub code: Option<String>,
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Card widget capability (Strategy pattern)
///
/// Implement this over the real provider SDK; tests and demos use
/// [`MockCardProvider`](crate::MockCardProvider).
#[async_trait]
pub trait CardProvider: Send + Sync {
    /// Turn the widget's current input into a payment-method token
    async fn create_payment_method(
        &self,
        card: &CardElement,
    ) -> Result<PaymentMethodToken, ProviderError>;

    /// Apply `method` to the intent identified by `client_secret`
    async fn confirm_card_payment(
        &self,
        client_secret: &ClientSecret,
        method: &PaymentMethodToken,
        billing: &BillingDetails,
    ) -> Result<ConfirmationResult, ProviderError>;

    /// Provider name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_fields_follow_status() {
        let ok = ConfirmationResult::succeeded("pi_1");
        assert_eq!(ok.status(), ConfirmationStatus::Succeeded);
        assert_eq!(ok.transaction_id(), Some("pi_1"));
        assert_eq!(ok.failure_reason(), None);

        let failed = ConfirmationResult::failed("insufficient funds");
        assert_eq!(failed.transaction_id(), None);
        assert_eq!(failed.failure_reason(), Some("insufficient funds"));

        assert_eq!(
            ConfirmationResult::RequiresAction.status(),
            ConfirmationStatus::RequiresAction
        );
    }

    #[test]
    fn test_secrets_are_not_printed() {
        let token = PaymentMethodToken::new(
            "pm_live_abc",
            Some(CardMetadata {
                brand: "visa".into(),
                last4: "4242".into(),
            }),
        );
        let printed = format!("{token:?} {:?}", ClientSecret::new("pi_1_secret_2"));
        assert!(!printed.contains("pm_live_abc"));
        assert!(!printed.contains("secret_2"));
        assert!(printed.contains("4242"));
    }

    #[test]
    fn test_billing_fallbacks() {
        let billing = BillingDetails::for_user(&SessionUser::new("u1"));
        assert_eq!(billing.name, "anonymous");
        assert_eq!(billing.email, "unknown");
    }
}
