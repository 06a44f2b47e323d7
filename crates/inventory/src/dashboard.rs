//! Dashboard summary counts.

use serde::{Deserialize, Serialize};

use stockroom_catalog::{Category, Product};

use crate::stock::StockRecord;

/// Number of products shown in the "latest products" strip.
pub const LATEST_PRODUCTS_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub product_count: usize,
    pub category_count: usize,
    /// Number of stock records, not units.
    pub stock_count: usize,
    pub total_units: u64,
    /// First products in API order.
    pub latest_products: Vec<Product>,
}

pub fn summarize(
    products: &[Product],
    categories: &[Category],
    stocks: &[StockRecord],
) -> DashboardSummary {
    DashboardSummary {
        product_count: products.len(),
        category_count: categories.len(),
        stock_count: stocks.len(),
        total_units: stocks.iter().fold(0u64, |acc, s| acc.saturating_add(s.quantity)),
        latest_products: products.iter().take(LATEST_PRODUCTS_LIMIT).cloned().collect(),
    }
}
