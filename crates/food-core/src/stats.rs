//! Dashboard Statistics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals shown on the admin dashboard
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    pub users: usize,
    pub menu_items: usize,
    pub orders: usize,
}

/// Revenue for one menu category
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRevenue {
    pub category: String,

    /// Menu items sold in this category
    #[serde(default)]
    pub quantity: usize,

    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}
