//! Checkout Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Checkout-related errors
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Request never got a response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CheckoutError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Backend { status, .. } => *status >= 500 || *status == 429,
            Self::Config(_) => false,
        }
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) | Self::Backend { .. } => {
                "Something went wrong while saving your order. Please try again.".into()
            }
            Self::Config(_) => "Service configuration error.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_errors_are_generic() {
        let err = CheckoutError::Backend {
            status: 503,
            message: "mongo down".into(),
        };
        assert!(err.is_retryable());
        assert!(!err.user_message().contains("mongo"));

        let err = CheckoutError::Backend {
            status: 403,
            message: "forbidden access".into(),
        };
        assert!(!err.is_retryable());
        assert!(!CheckoutError::Config("FOOD_API_URL not set".into()).is_retryable());
    }
}
