//! # food-server
//!
//! Reference REST backend for the food-ordering checkout.
//!
//! ```text
//! POST  /create-payment-intent   {price}      -> {clientSecret}
//! POST  /payments                (bearer)     -> created order
//! GET   /payments?email=         (bearer)     -> buyer's orders
//! GET   /payments/all            (admin)      -> every order
//! PATCH /payments/{id}           (admin)      -> order, status confirmed
//! GET   /adminStats              (admin)      -> {revenue, users, menuItems, orders}
//! GET   /orderStats              (admin)      -> [{category, quantity, revenue}]
//! ```

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod intents;
pub mod state;
pub mod stats;
pub mod store;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::TokenSigner;
use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::handlers::{
    admin_stats, all_payments, confirm_payment, create_payment_intent, health_check,
    list_payments, order_stats, record_payment,
};
use crate::intents::{IntentIssuer, StripeIntentIssuer};
use crate::state::AppState;
use crate::store::MemoryOrderStore;

pub use crate::error::{ApiError, Result};

/// Build application state from configuration
pub fn build_state(config: &ServerConfig) -> Result<AppState> {
    let catalog = match &config.menu_file {
        Some(path) => Catalog::load(path)?,
        None => Catalog::default(),
    };

    let intents = config
        .stripe_secret_key
        .as_deref()
        .map(|key| Arc::new(StripeIntentIssuer::new(key)) as Arc<dyn IntentIssuer>);

    Ok(AppState {
        orders: Arc::new(MemoryOrderStore::new()),
        catalog: Arc::new(catalog),
        tokens: Arc::new(TokenSigner::new(&config.access_token_secret)),
        intents,
    })
}

/// Build the router; `cors_origin` restricts CORS to one origin
pub fn router(state: AppState, cors_origin: Option<&str>) -> Router {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let cors = match cors_origin.and_then(|origin| origin.parse::<HeaderValue>().ok()) {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(Any),
    };

    Router::new()
        // Health
        .route("/health", get(health_check))

        // Checkout
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payments", post(record_payment).get(list_payments))

        // Admin
        .route("/payments/all", get(all_payments))
        .route("/payments/{id}", patch(confirm_payment))
        .route("/adminStats", get(admin_stats))
        .route("/orderStats", get(order_stats))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
