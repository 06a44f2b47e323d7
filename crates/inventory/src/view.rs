//! Stock listing: stock rows decorated with product details.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use stockroom_catalog::Product;
use stockroom_core::ProductId;

use crate::stock::StockRecord;

/// Product details the stock endpoint joins onto each row server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRowDetails {
    pub product_name: Option<String>,
    pub product_code: Option<String>,
}

/// One line of the stock list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLine {
    pub stock: StockRecord,
    pub product_name: String,
    pub product_code: String,
    pub photo_url: Option<String>,
}

/// Build stock lines in stock order.
///
/// Name and code prefer the product snapshot and fall back to the details the
/// stock endpoint returned; the photo only comes from the product snapshot.
pub fn stock_lines(
    stocks: &[(StockRecord, StockRowDetails)],
    products: &[Product],
) -> Vec<StockLine> {
    let by_id: HashMap<ProductId, &Product> = products.iter().map(|p| (p.id, p)).collect();

    stocks
        .iter()
        .map(|(stock, details)| {
            let product = by_id.get(&stock.product_id);
            StockLine {
                product_name: product
                    .map(|p| p.name.clone())
                    .or_else(|| details.product_name.clone())
                    .unwrap_or_default(),
                product_code: product
                    .map(|p| p.code.clone())
                    .or_else(|| details.product_code.clone())
                    .unwrap_or_default(),
                photo_url: product.and_then(|p| p.photo_url.clone()),
                stock: stock.clone(),
            }
        })
        .collect()
}
