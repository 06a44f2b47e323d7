//! Inventory domain module.
//!
//! Stock records, the stock-in reconciliation rules, and the read-side views
//! built from product and stock snapshots. Pure, deterministic logic (no IO,
//! no HTTP, no storage).

pub mod dashboard;
pub mod reconciler;
pub mod stock;
pub mod view;

pub use dashboard::{DashboardSummary, LATEST_PRODUCTS_LIMIT, summarize};
pub use reconciler::{
    ProductWithStock, StockIntent, apply_stock_delta, apply_stock_in, can_delete_product,
    ensure_deletable, ensure_single_stock_per_product, find_stock_for, merge_products_with_stock,
};
pub use stock::{StockDelta, StockRecord};
pub use view::{StockLine, StockRowDetails, stock_lines};
