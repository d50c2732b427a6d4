//! Mock Card Provider
//!
//! For testing and demo purposes. Scripted results are consumed in order;
//! once the script runs out every card is accepted and every charge succeeds.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::provider::{
    BillingDetails, CardElement, CardMetadata, CardProvider, ClientSecret, ConfirmationResult,
    PaymentMethodToken, ProviderError,
};

type MethodResult = Result<PaymentMethodToken, ProviderError>;
type ConfirmResult = Result<ConfirmationResult, ProviderError>;

/// Card provider with scripted responses
#[derive(Default)]
pub struct MockCardProvider {
    methods: Mutex<VecDeque<MethodResult>>,
    confirmations: Mutex<VecDeque<ConfirmResult>>,
    method_calls: AtomicUsize,
    confirm_calls: AtomicUsize,
    last_billing: Mutex<Option<BillingDetails>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockCardProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next payment-method result
    #[must_use]
    pub fn then_method(self, result: MethodResult) -> Self {
        lock(&self.methods).push_back(result);
        self
    }

    /// Queue the next confirmation result
    #[must_use]
    pub fn then_confirm(self, result: ConfirmResult) -> Self {
        lock(&self.confirmations).push_back(result);
        self
    }

    /// Reject the next card input with `message`
    #[must_use]
    pub fn decline_card(self, message: &str) -> Self {
        self.then_method(Err(ProviderError::with_code("card_declined", message)))
    }

    pub fn method_calls(&self) -> usize {
        self.method_calls.load(Ordering::SeqCst)
    }

    pub fn confirm_calls(&self) -> usize {
        self.confirm_calls.load(Ordering::SeqCst)
    }

    /// Billing details sent with the latest confirmation
    pub fn last_billing(&self) -> Option<BillingDetails> {
        lock(&self.last_billing).clone()
    }
}

#[async_trait]
impl CardProvider for MockCardProvider {
    async fn create_payment_method(&self, card: &CardElement) -> MethodResult {
        let call = self.method_calls.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(element = card.id(), "Mock payment method requested");

        lock(&self.methods).pop_front().unwrap_or_else(|| {
            Ok(PaymentMethodToken::new(
                format!("pm_mock_{call}"),
                Some(CardMetadata {
                    brand: "visa".into(),
                    last4: "4242".into(),
                }),
            ))
        })
    }

    async fn confirm_card_payment(
        &self,
        _client_secret: &ClientSecret,
        _method: &PaymentMethodToken,
        billing: &BillingDetails,
    ) -> ConfirmResult {
        let call = self.confirm_calls.fetch_add(1, Ordering::SeqCst) + 1;
        *lock(&self.last_billing) = Some(billing.clone());

        lock(&self.confirmations)
            .pop_front()
            .unwrap_or_else(|| Ok(ConfirmationResult::succeeded(format!("pi_mock_{call}"))))
    }

    fn name(&self) -> &str {
        "MockCardProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_then_defaults() {
        let provider = MockCardProvider::new().decline_card("Your card was declined.");
        let card = CardElement::new("card-element");

        let err = provider.create_payment_method(&card).await.unwrap_err();
        assert_eq!(err.message, "Your card was declined.");
        assert_eq!(err.code.as_deref(), Some("card_declined"));

        let token = provider.create_payment_method(&card).await.unwrap();
        assert_eq!(token.id(), "pm_mock_2");
        assert_eq!(provider.method_calls(), 2);
    }

    #[tokio::test]
    async fn test_confirm_records_billing() {
        let provider = MockCardProvider::new();
        let token = PaymentMethodToken::new("pm_1", None);
        let billing = BillingDetails {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        };

        let result = provider
            .confirm_card_payment(&ClientSecret::new("s"), &token, &billing)
            .await
            .unwrap();

        assert_eq!(result.transaction_id(), Some("pi_mock_1"));
        assert_eq!(provider.last_billing(), Some(billing));
        assert_eq!(provider.confirm_calls(), 1);
    }
}
