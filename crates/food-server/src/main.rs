//! food-server HTTP Server
//!
//! Axum-based REST backend for the food-ordering checkout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use food_server::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let state = food_server::build_state(&config)?;

    if let Some(issuer) = &state.intents {
        tracing::info!(issuer = issuer.name(), "Payment intents enabled");
    } else {
        tracing::warn!("Stripe not configured - payment intents disabled");
        tracing::warn!("  Set STRIPE_SECRET_KEY in .env");
    }
    tracing::info!(menu_items = state.catalog.len(), "Menu catalog loaded");

    let app = food_server::router(state, config.cors_origin.as_deref());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("food-server running on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
