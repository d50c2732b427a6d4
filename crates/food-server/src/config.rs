//! Server Configuration

use crate::error::{ApiError, Result};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,

    /// Allowed CORS origin; any origin when unset
    pub cors_origin: Option<String>,

    /// JSON file with the menu catalog
    pub menu_file: Option<String>,

    /// Stripe secret key; payment intents are disabled without it
    pub stripe_secret_key: Option<String>,

    /// HMAC key for access tokens
    pub access_token_secret: String,
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let access_token_secret = std::env::var("ACCESS_TOKEN_SECRET")
            .map_err(|_| ApiError::Config("ACCESS_TOKEN_SECRET not set".into()))?;

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into()),
            cors_origin: std::env::var("CORS_ORIGIN").ok(),
            menu_file: std::env::var("MENU_FILE").ok(),
            stripe_secret_key: std::env::var("STRIPE_SECRET_KEY").ok(),
            access_token_secret,
        })
    }
}
