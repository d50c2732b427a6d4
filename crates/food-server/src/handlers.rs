//! HTTP Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use food_core::{
    AdminStats, CategoryRevenue, ChargeableAmount, CreateIntentRequest, CreateIntentResponse,
    OrderRecord,
};

use crate::auth::{Admin, Authenticated};
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::stats;
use crate::store::OrderStore;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stripe_configured: bool,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        stripe_configured: state.intents.is_some(),
    })
}

/// Create a payment intent for the cart total
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(payload): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>> {
    let amount = ChargeableAmount::try_from(payload.price)
        .map_err(|e| ApiError::BadRequest(e.user_message()))?;
    let issuer = state.intents.as_ref().ok_or(ApiError::PaymentsUnavailable)?;

    let client_secret = issuer.issue(amount).await?;
    Ok(Json(CreateIntentResponse { client_secret }))
}

/// Record a paid order
pub async fn record_payment(
    State(state): State<AppState>,
    Authenticated(claims): Authenticated,
    Json(order): Json<OrderRecord>,
) -> Result<(StatusCode, Json<OrderRecord>)> {
    if order.email != claims.email && !claims.is_admin() {
        return Err(ApiError::Forbidden("cannot record orders for another user".into()));
    }
    if order.transaction_id.is_empty() {
        return Err(ApiError::BadRequest("transactionId is required".into()));
    }

    let saved = state.orders.insert(order);
    tracing::info!(
        order_id = ?saved.id,
        email = %saved.email,
        transaction_id = %saved.transaction_id,
        price = %saved.price,
        "Recorded order"
    );

    Ok((StatusCode::CREATED, Json(saved)))
}

/// Orders for one buyer
pub async fn list_payments(
    State(state): State<AppState>,
    Authenticated(claims): Authenticated,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<OrderRecord>>> {
    if query.email != claims.email {
        return Err(ApiError::Forbidden("forbidden access".into()));
    }
    Ok(Json(state.orders.by_email(&query.email)))
}

/// Every order (admin)
pub async fn all_payments(
    State(state): State<AppState>,
    Admin(_): Admin,
) -> Json<Vec<OrderRecord>> {
    Json(state.orders.all())
}

/// Confirm a booking (admin)
pub async fn confirm_payment(
    State(state): State<AppState>,
    Admin(admin): Admin,
    Path(id): Path<String>,
) -> Result<Json<OrderRecord>> {
    let order = state
        .orders
        .confirm(&id)
        .ok_or_else(|| ApiError::NotFound(format!("order {id}")))?;

    tracing::info!(order_id = %id, admin = %admin.email, "Confirmed order");
    Ok(Json(order))
}

/// Dashboard totals (admin)
pub async fn admin_stats(State(state): State<AppState>, Admin(_): Admin) -> Json<AdminStats> {
    Json(stats::admin_stats(&state.orders.all(), &state.catalog))
}

/// Revenue per category (admin)
pub async fn order_stats(
    State(state): State<AppState>,
    Admin(_): Admin,
) -> Json<Vec<CategoryRevenue>> {
    Json(stats::order_stats(&state.orders.all(), &state.catalog))
}
