//! Stock reconciliation: joining products with stock, deciding stock-in
//! writes, and guarding product deletion.
//!
//! Every function here is pure. Callers fetch fresh product/stock snapshots,
//! pass them in, and perform whatever write the result describes.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};

use stockroom_catalog::Product;
use stockroom_core::{DomainError, DomainResult, ProductId, StockId};

use crate::stock::{StockDelta, StockRecord};

/// A product annotated with its current on-hand quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWithStock {
    pub product: Product,
    pub quantity: u64,
}

/// The single write a stock-in must perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum StockIntent {
    /// `PUT /stok/{id}` with the accumulated quantity.
    Update {
        id: StockId,
        product_id: ProductId,
        new_quantity: u64,
    },
    /// `POST /stok` creating the product's first record.
    Create { product_id: ProductId, quantity: u64 },
}

impl StockIntent {
    pub fn product_id(&self) -> ProductId {
        match self {
            StockIntent::Update { product_id, .. } | StockIntent::Create { product_id, .. } => {
                *product_id
            }
        }
    }

    /// Quantity the product's record holds once the write lands.
    pub fn resulting_quantity(&self) -> u64 {
        match self {
            StockIntent::Update { new_quantity, .. } => *new_quantity,
            StockIntent::Create { quantity, .. } => *quantity,
        }
    }
}

/// First stock record belonging to `product_id`, if any.
pub fn find_stock_for(stocks: &[StockRecord], product_id: ProductId) -> Option<&StockRecord> {
    stocks.iter().find(|s| s.product_id == product_id)
}

/// Annotate each product with its stock quantity (0 when it has no record).
///
/// Output order and length follow `products`. If a snapshot holds several
/// records for one product, the first in `stocks` order is used.
pub fn merge_products_with_stock(
    products: &[Product],
    stocks: &[StockRecord],
) -> Vec<ProductWithStock> {
    let mut by_product: HashMap<ProductId, u64> = HashMap::with_capacity(stocks.len());
    for stock in stocks {
        by_product.entry(stock.product_id).or_insert(stock.quantity);
    }

    products
        .iter()
        .map(|product| ProductWithStock {
            quantity: by_product.get(&product.id).copied().unwrap_or(0),
            product: product.clone(),
        })
        .collect()
}

/// Decide how a stock-in of `delta` units for `product_id` is written.
pub fn apply_stock_in(
    existing: Option<&StockRecord>,
    product_id: ProductId,
    delta: i64,
) -> DomainResult<StockIntent> {
    let delta = StockDelta::new(delta)?;
    apply_stock_delta(existing, product_id, delta)
}

/// Same as [`apply_stock_in`] for an already validated delta.
pub fn apply_stock_delta(
    existing: Option<&StockRecord>,
    product_id: ProductId,
    delta: StockDelta,
) -> DomainResult<StockIntent> {
    match existing {
        Some(record) => {
            if record.product_id != product_id {
                return Err(DomainError::invariant(format!(
                    "stock record {} belongs to product {}, not {}",
                    record.id, record.product_id, product_id
                )));
            }
            let new_quantity = record.quantity.checked_add(delta.get()).ok_or_else(|| {
                DomainError::invariant(format!("stock quantity overflow for product {product_id}"))
            })?;
            Ok(StockIntent::Update {
                id: record.id,
                product_id,
                new_quantity,
            })
        }
        None => Ok(StockIntent::Create {
            product_id,
            quantity: delta.get(),
        }),
    }
}

/// A product may only be deleted once its stock is gone.
pub fn can_delete_product(product: &ProductWithStock) -> bool {
    product.quantity == 0
}

pub fn ensure_deletable(product: &ProductWithStock) -> DomainResult<()> {
    if can_delete_product(product) {
        Ok(())
    } else {
        Err(DomainError::invariant(format!(
            "product {} still has {} units in stock",
            product.product.id, product.quantity
        )))
    }
}

/// Check a fetched snapshot for more than one record per product.
pub fn ensure_single_stock_per_product(stocks: &[StockRecord]) -> DomainResult<()> {
    let mut seen: HashMap<ProductId, StockId> = HashMap::with_capacity(stocks.len());
    for stock in stocks {
        match seen.entry(stock.product_id) {
            Entry::Occupied(first) => {
                return Err(DomainError::invariant(format!(
                    "product {} has multiple stock records ({} and {})",
                    stock.product_id,
                    first.get(),
                    stock.id
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(stock.id);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::CategoryId;

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category_id: CategoryId::new(1),
            category_name: None,
            code: format!("P-{id}"),
            photo_url: None,
            created_at: None,
        }
    }

    fn stock(id: i64, product_id: i64, quantity: u64) -> StockRecord {
        StockRecord {
            id: StockId::new(id),
            product_id: ProductId::new(product_id),
            quantity,
        }
    }

    #[test]
    fn stock_in_without_record_creates_one() {
        let intent = apply_stock_in(None, ProductId::new(7), 5).unwrap();
        assert_eq!(
            intent,
            StockIntent::Create {
                product_id: ProductId::new(7),
                quantity: 5
            }
        );
    }

    #[test]
    fn stock_in_with_record_accumulates() {
        let existing = stock(3, 7, 10);
        let intent = apply_stock_in(Some(&existing), ProductId::new(7), 5).unwrap();
        assert_eq!(
            intent,
            StockIntent::Update {
                id: StockId::new(3),
                product_id: ProductId::new(7),
                new_quantity: 15
            }
        );
        assert_eq!(intent.resulting_quantity(), 15);
    }

    #[test]
    fn non_positive_delta_is_rejected() {
        let existing = stock(3, 7, 10);
        for delta in [0, -1] {
            assert!(matches!(
                apply_stock_in(None, ProductId::new(7), delta),
                Err(DomainError::InvalidDelta(_))
            ));
            assert!(matches!(
                apply_stock_in(Some(&existing), ProductId::new(7), delta),
                Err(DomainError::InvalidDelta(_))
            ));
        }
    }

    #[test]
    fn record_for_another_product_is_a_caller_error() {
        let existing = stock(3, 8, 10);
        assert!(matches!(
            apply_stock_in(Some(&existing), ProductId::new(7), 1),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn overflow_is_reported() {
        let existing = stock(1, 1, u64::MAX);
        assert!(matches!(
            apply_stock_in(Some(&existing), ProductId::new(1), 1),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn merge_defaults_to_zero_and_keeps_order() {
        let products = vec![product(3), product(1), product(2)];
        let stocks = vec![stock(10, 2, 4), stock(11, 3, 9)];

        let merged = merge_products_with_stock(&products, &stocks);
        let view: Vec<(i64, u64)> = merged.iter().map(|p| (p.product.id.get(), p.quantity)).collect();
        assert_eq!(view, vec![(3, 9), (1, 0), (2, 4)]);
    }

    #[test]
    fn merge_uses_first_record_on_duplicates() {
        let products = vec![product(1)];
        let stocks = vec![stock(10, 1, 4), stock(11, 1, 9)];
        assert_eq!(merge_products_with_stock(&products, &stocks)[0].quantity, 4);
        assert_eq!(find_stock_for(&stocks, ProductId::new(1)).unwrap().id, StockId::new(10));
        assert!(ensure_single_stock_per_product(&stocks).is_err());
        assert!(ensure_single_stock_per_product(&stocks[..1]).is_ok());
    }

    #[test]
    fn delete_guard() {
        let mut p = ProductWithStock {
            product: product(1),
            quantity: 0,
        };
        assert!(can_delete_product(&p));
        assert!(ensure_deletable(&p).is_ok());

        p.quantity = 1;
        assert!(!can_delete_product(&p));
        assert!(matches!(ensure_deletable(&p), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn intent_serializes_with_action_tag() {
        let intent = StockIntent::Update {
            id: StockId::new(3),
            product_id: ProductId::new(7),
            new_quantity: 15,
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"action": "update", "id": 3, "product_id": 7, "new_quantity": 15})
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn products_strategy() -> impl Strategy<Value = Vec<Product>> {
            prop::collection::vec(0i64..50, 0..30).prop_map(|ids| ids.into_iter().map(product).collect())
        }

        /// Stock lists respecting the one-record-per-product invariant.
        fn stocks_strategy() -> impl Strategy<Value = Vec<StockRecord>> {
            prop::collection::btree_map(0i64..50, 0u64..10_000, 0..30).prop_map(|m| {
                m.into_iter()
                    .enumerate()
                    .map(|(i, (pid, qty))| stock(i as i64 + 100, pid, qty))
                    .collect()
            })
        }

        proptest! {
            /// Property: output has one entry per product, in input order.
            #[test]
            fn merge_preserves_length_and_order(products in products_strategy(), stocks in stocks_strategy()) {
                let merged = merge_products_with_stock(&products, &stocks);
                prop_assert_eq!(merged.len(), products.len());
                for (m, p) in merged.iter().zip(products.iter()) {
                    prop_assert_eq!(&m.product, p);
                }
            }

            /// Property: quantity equals the matching record's, or zero.
            #[test]
            fn merge_quantity_matches_record(products in products_strategy(), stocks in stocks_strategy()) {
                for m in merge_products_with_stock(&products, &stocks) {
                    match stocks.iter().find(|s| s.product_id == m.product.id) {
                        Some(s) => prop_assert_eq!(m.quantity, s.quantity),
                        None => prop_assert_eq!(m.quantity, 0),
                    }
                }
            }

            /// Property: merge is deterministic.
            #[test]
            fn merge_is_deterministic(products in products_strategy(), stocks in stocks_strategy()) {
                prop_assert_eq!(
                    merge_products_with_stock(&products, &stocks),
                    merge_products_with_stock(&products, &stocks)
                );
            }

            /// Property: stock-in adds exactly the delta.
            #[test]
            fn stock_in_adds_delta(existing in proptest::option::of(0u64..1_000_000), delta in 1i64..1_000_000) {
                let record = existing.map(|q| stock(1, 5, q));
                let intent = apply_stock_in(record.as_ref(), ProductId::new(5), delta).unwrap();
                prop_assert_eq!(intent.resulting_quantity(), existing.unwrap_or(0) + delta as u64);
                prop_assert_eq!(intent.product_id(), ProductId::new(5));
            }
        }
    }
}
