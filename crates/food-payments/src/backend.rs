//! Backend REST API
//!
//! The endpoints the checkout and dashboard talk to, behind a trait so the
//! flow can run against a fake in tests.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use food_core::{
    AdminStats, BearerToken, CategoryRevenue, ChargeableAmount, CreateIntentRequest,
    CreateIntentResponse, OrderRecord,
};

use crate::config::ClientConfig;
use crate::error::{CheckoutError, Result};
use crate::provider::ClientSecret;

/// Backend operations used by the checkout flow and the dashboard
#[async_trait]
pub trait PaymentBackend: Send + Sync {
    /// `POST /create-payment-intent`
    async fn create_payment_intent(&self, amount: ChargeableAmount) -> Result<ClientSecret>;

    /// `POST /payments`
    async fn record_payment(&self, token: &BearerToken, order: &OrderRecord)
    -> Result<OrderRecord>;

    /// `GET /payments?email=`
    async fn orders_for(&self, token: &BearerToken, email: &str) -> Result<Vec<OrderRecord>>;

    /// `GET /payments/all`
    async fn all_orders(&self, token: &BearerToken) -> Result<Vec<OrderRecord>>;

    /// `PATCH /payments/{id}`
    async fn confirm_order(&self, token: &BearerToken, id: &str) -> Result<OrderRecord>;

    /// `GET /adminStats`
    async fn admin_stats(&self, token: &BearerToken) -> Result<AdminStats>;

    /// `GET /orderStats`
    async fn order_stats(&self, token: &BearerToken) -> Result<Vec<CategoryRevenue>>;
}

/// HTTP implementation of [`PaymentBackend`]
#[derive(Clone, Debug)]
pub struct RestClient {
    http: Client,
    config: ClientConfig,
}

impl RestClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CheckoutError::Config(format!("HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn authorized(&self, builder: RequestBuilder, token: &BearerToken) -> RequestBuilder {
        builder.bearer_auth(token.as_str())
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body: serde_json::Value = response.json().await.unwrap_or_default();
    let message = body["error"]
        .as_str()
        .or_else(|| body["message"].as_str())
        .unwrap_or("Request failed")
        .to_string();

    tracing::warn!(status = status.as_u16(), error = %message, "Backend request failed");
    Err(CheckoutError::Backend {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl PaymentBackend for RestClient {
    async fn create_payment_intent(&self, amount: ChargeableAmount) -> Result<ClientSecret> {
        let body = CreateIntentRequest {
            price: amount.price(),
        };
        let response: CreateIntentResponse = self
            .send(
                self.http
                    .post(self.config.endpoint("/create-payment-intent"))
                    .json(&body),
            )
            .await?;

        Ok(ClientSecret::new(response.client_secret))
    }

    async fn record_payment(
        &self,
        token: &BearerToken,
        order: &OrderRecord,
    ) -> Result<OrderRecord> {
        let request = self.http.post(self.config.endpoint("/payments")).json(order);
        self.send(self.authorized(request, token)).await
    }

    async fn orders_for(&self, token: &BearerToken, email: &str) -> Result<Vec<OrderRecord>> {
        let request = self
            .http
            .get(self.config.endpoint("/payments"))
            .query(&[("email", email)]);
        self.send(self.authorized(request, token)).await
    }

    async fn all_orders(&self, token: &BearerToken) -> Result<Vec<OrderRecord>> {
        let request = self.http.get(self.config.endpoint("/payments/all"));
        self.send(self.authorized(request, token)).await
    }

    async fn confirm_order(&self, token: &BearerToken, id: &str) -> Result<OrderRecord> {
        let request = self
            .http
            .patch(self.config.endpoint(&format!("/payments/{id}")));
        self.send(self.authorized(request, token)).await
    }

    async fn admin_stats(&self, token: &BearerToken) -> Result<AdminStats> {
        let request = self.http.get(self.config.endpoint("/adminStats"));
        self.send(self.authorized(request, token)).await
    }

    async fn order_stats(&self, token: &BearerToken) -> Result<Vec<CategoryRevenue>> {
        let request = self.http.get(self.config.endpoint("/orderStats"));
        self.send(self.authorized(request, token)).await
    }
}
