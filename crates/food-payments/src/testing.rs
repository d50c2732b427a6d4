//! Test doubles for the backend and router

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::Notify;

use food_core::{
    AdminStats, AuthSession, BearerToken, CategoryRevenue, ChargeableAmount, OrderRecord,
    SessionUser,
};

use crate::backend::PaymentBackend;
use crate::error::{CheckoutError, Result};
use crate::mock::MockCardProvider;
use crate::provider::{
    BillingDetails, CardElement, CardProvider, ClientSecret, ConfirmationResult,
    PaymentMethodToken, ProviderError,
};
use crate::recorder::{Navigator, Route};

pub fn session() -> AuthSession {
    AuthSession::new(
        SessionUser::new("u1")
            .with_email("buyer@example.com")
            .with_display_name("Ada"),
        BearerToken::new("token-1"),
    )
}

fn unavailable() -> CheckoutError {
    CheckoutError::Backend {
        status: 503,
        message: "unavailable".into(),
    }
}

/// In-memory backend that records every call
#[derive(Default)]
pub struct FakeBackend {
    intent_requests: Mutex<Vec<Decimal>>,
    intent_delays: Mutex<HashMap<Decimal, Duration>>,
    fail_intents: AtomicBool,
    persisted: Mutex<Vec<OrderRecord>>,
    persist_attempts: AtomicUsize,
    persist_failures: AtomicUsize,
    orders: Mutex<Vec<OrderRecord>>,
    fail_confirms: AtomicBool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: Vec<OrderRecord>) -> Self {
        let backend = Self::new();
        *backend.orders.lock().unwrap() = orders;
        backend
    }

    pub fn intent_requests(&self) -> Vec<Decimal> {
        self.intent_requests.lock().unwrap().clone()
    }

    pub fn delay_intent(&self, price: Decimal, delay: Duration) {
        self.intent_delays.lock().unwrap().insert(price, delay);
    }

    pub fn fail_intents(&self, fail: bool) {
        self.fail_intents.store(fail, Ordering::SeqCst);
    }

    pub fn persisted(&self) -> Vec<OrderRecord> {
        self.persisted.lock().unwrap().clone()
    }

    pub fn persist_attempts(&self) -> usize {
        self.persist_attempts.load(Ordering::SeqCst)
    }

    pub fn fail_next_persists(&self, count: usize) {
        self.persist_failures.store(count, Ordering::SeqCst);
    }

    pub fn fail_confirms(&self, fail: bool) {
        self.fail_confirms.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PaymentBackend for FakeBackend {
    async fn create_payment_intent(&self, amount: ChargeableAmount) -> Result<ClientSecret> {
        self.intent_requests.lock().unwrap().push(amount.price());
        let delay = self.intent_delays.lock().unwrap().get(&amount.price()).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_intents.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(ClientSecret::new(format!("secret_{}", amount.price())))
    }

    async fn record_payment(
        &self,
        _token: &BearerToken,
        order: &OrderRecord,
    ) -> Result<OrderRecord> {
        self.persist_attempts.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .persist_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(unavailable());
        }

        let mut persisted = self.persisted.lock().unwrap();
        let mut saved = order.clone();
        saved.id = Some(format!("order_{}", persisted.len() + 1));
        persisted.push(saved.clone());
        Ok(saved)
    }

    async fn orders_for(&self, _token: &BearerToken, email: &str) -> Result<Vec<OrderRecord>> {
        let orders = self.orders.lock().unwrap();
        Ok(orders.iter().filter(|o| o.email == email).cloned().collect())
    }

    async fn all_orders(&self, _token: &BearerToken) -> Result<Vec<OrderRecord>> {
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn confirm_order(&self, _token: &BearerToken, id: &str) -> Result<OrderRecord> {
        if self.fail_confirms.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id.as_deref() == Some(id))
            .ok_or_else(|| CheckoutError::Backend {
                status: 404,
                message: "not found".into(),
            })?;
        order.confirm();
        Ok(order.clone())
    }

    async fn admin_stats(&self, _token: &BearerToken) -> Result<AdminStats> {
        Ok(AdminStats::default())
    }

    async fn order_stats(&self, _token: &BearerToken) -> Result<Vec<CategoryRevenue>> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// Which provider call waits for [`GatedProvider::release`]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Method,
    Confirm,
}

/// Card provider that parks one call until the test lets it through
pub struct GatedProvider {
    pub inner: MockCardProvider,
    gate: Gate,
    entered: Notify,
    released: Notify,
    confirmed_secrets: Mutex<Vec<ClientSecret>>,
}

impl GatedProvider {
    pub fn new(gate: Gate) -> Self {
        Self {
            inner: MockCardProvider::new(),
            gate,
            entered: Notify::new(),
            released: Notify::new(),
            confirmed_secrets: Mutex::new(Vec::new()),
        }
    }

    /// Resolves once the gated call has started
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.released.notify_one();
    }

    pub fn confirmed_secrets(&self) -> Vec<ClientSecret> {
        self.confirmed_secrets.lock().unwrap().clone()
    }

    async fn pass(&self, gate: Gate) {
        if self.gate == gate {
            self.entered.notify_one();
            self.released.notified().await;
        }
    }
}

#[async_trait]
impl CardProvider for GatedProvider {
    async fn create_payment_method(
        &self,
        card: &CardElement,
    ) -> std::result::Result<PaymentMethodToken, ProviderError> {
        self.pass(Gate::Method).await;
        self.inner.create_payment_method(card).await
    }

    async fn confirm_card_payment(
        &self,
        client_secret: &ClientSecret,
        method: &PaymentMethodToken,
        billing: &BillingDetails,
    ) -> std::result::Result<ConfirmationResult, ProviderError> {
        self.confirmed_secrets.lock().unwrap().push(client_secret.clone());
        self.pass(Gate::Confirm).await;
        self.inner
            .confirm_card_payment(client_secret, method, billing)
            .await
    }

    fn name(&self) -> &str {
        "Gated"
    }
}
