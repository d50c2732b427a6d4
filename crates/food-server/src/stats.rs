//! Dashboard Aggregates

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;

use food_core::{AdminStats, CategoryRevenue, OrderRecord};

use crate::catalog::Catalog;

/// Revenue and counts across all orders
pub fn admin_stats(orders: &[OrderRecord], catalog: &Catalog) -> AdminStats {
    let revenue: Decimal = orders.iter().map(|order| order.price).sum();
    let users: HashSet<&str> = orders.iter().map(|order| order.email.as_str()).collect();

    AdminStats {
        revenue: revenue.round_dp(2),
        users: users.len(),
        menu_items: catalog.len(),
        orders: orders.len(),
    }
}

/// Items sold and revenue per menu category, by category name.
///
/// Menu IDs missing from the catalog are skipped.
pub fn order_stats(orders: &[OrderRecord], catalog: &Catalog) -> Vec<CategoryRevenue> {
    let mut totals: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();

    for menu_id in orders.iter().flat_map(|order| &order.menu_item_ids) {
        if let Some(item) = catalog.get(menu_id) {
            let entry = totals.entry(item.category.as_str()).or_default();
            entry.0 += 1;
            entry.1 += item.price;
        }
    }

    totals
        .into_iter()
        .map(|(category, (quantity, revenue))| CategoryRevenue {
            category: category.to_string(),
            quantity,
            revenue: revenue.round_dp(2),
        })
        .collect()
}
