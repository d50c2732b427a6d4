//! Client Configuration
//!
//! Resolved once at startup and shared read-only afterwards.

use std::time::Duration;

use crate::error::{CheckoutError, Result};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub api_base_url: String,

    /// Publishable key for mounting the card widget
    pub publishable_key: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>, publishable_key: impl Into<String>) -> Self {
        let api_base_url: String = api_base_url.into();
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            publishable_key: publishable_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("FOOD_API_URL")
            .map_err(|_| CheckoutError::Config("FOOD_API_URL not set".into()))?;
        let publishable_key = std::env::var("STRIPE_PUBLISHABLE_KEY")
            .map_err(|_| CheckoutError::Config("STRIPE_PUBLISHABLE_KEY not set".into()))?;

        let mut config = Self::new(api_base_url, publishable_key);
        if let Ok(secs) = std::env::var("FOOD_API_TIMEOUT_SECS") {
            let secs = secs.parse().map_err(|_| {
                CheckoutError::Config(format!("FOOD_API_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Absolute URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}
