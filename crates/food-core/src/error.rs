//! Error Types

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, OrderError>;

/// Domain error types
#[derive(Error, Debug)]
pub enum OrderError {
    /// Amount is below the minimum chargeable total
    #[error("Amount not chargeable: {0}")]
    NotChargeable(Decimal),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OrderError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::NotChargeable(_) => "Add something to your cart before paying.".into(),
            Self::Json(_) => "The order data could not be read.".into(),
        }
    }
}
