//! # food-core
//!
//! Domain model shared by the checkout client and the reference backend.
//!
//! ```text
//! ┌──────────────┐  total_price   ┌──────────────────┐
//! │ CartSnapshot │───────────────▶│ ChargeableAmount │──▶ payment intent
//! └──────────────┘                └──────────────────┘
//!        │ items                            
//!        ▼                                  
//! ┌──────────────┐  admin confirm ┌──────────────────┐
//! │ OrderRecord  │───────────────▶│  status=confirmed│
//! │ order-pending│                └──────────────────┘
//! └──────────────┘
//! ```
//!
//! Prices are `rust_decimal::Decimal` everywhere and travel over the wire as
//! plain JSON numbers, matching the REST API.

pub mod cart;
pub mod error;
pub mod intent;
pub mod money;
pub mod order;
pub mod session;
pub mod stats;

pub use cart::{CartItem, CartSnapshot};
pub use error::{OrderError, Result};
pub use intent::{CreateIntentRequest, CreateIntentResponse};
pub use money::ChargeableAmount;
pub use order::{OrderRecord, OrderStatus};
pub use session::{AuthSession, BearerToken, SessionUser};
pub use stats::{AdminStats, CategoryRevenue};
