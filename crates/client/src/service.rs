//! Stock workflows: fetch fresh snapshots, run the reconciler, write once.
//!
//! Two stock-ins for the same product issued concurrently can both observe
//! the same snapshot; the later write wins.

use stockroom_core::{DomainError, ProductId};
use stockroom_inventory::{
    DashboardSummary, ProductWithStock, StockDelta, StockIntent, StockLine, apply_stock_delta,
    ensure_deletable, find_stock_for, merge_products_with_stock, stock_lines, summarize,
};

use crate::api::InventoryApi;
use crate::error::ClientResult;

pub struct StockService<A> {
    api: A,
}

impl<A: InventoryApi> StockService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Every product with its current quantity.
    pub async fn products_with_stock(&self) -> ClientResult<Vec<ProductWithStock>> {
        let (products, stock) = tokio::try_join!(self.api.list_products(), self.api.list_stock())?;
        let records: Vec<_> = stock.into_iter().map(|(record, _)| record).collect();
        Ok(merge_products_with_stock(&products, &records))
    }

    /// Add `delta` units to a product, creating its stock record if needed.
    ///
    /// Performs exactly one write (PUT or POST) on success.
    pub async fn stock_in(&self, product_id: ProductId, delta: i64) -> ClientResult<StockIntent> {
        let delta = StockDelta::new(delta)?;
        self.stock_in_delta(product_id, delta).await
    }

    /// Like [`Self::stock_in`], parsing the quantity from raw user input.
    pub async fn stock_in_raw(&self, product_id: ProductId, input: &str) -> ClientResult<StockIntent> {
        let delta = StockDelta::parse(input)?;
        self.stock_in_delta(product_id, delta).await
    }

    async fn stock_in_delta(
        &self,
        product_id: ProductId,
        delta: StockDelta,
    ) -> ClientResult<StockIntent> {
        let (products, stock) = tokio::try_join!(self.api.list_products(), self.api.list_stock())?;

        if !products.iter().any(|p| p.id == product_id) {
            return Err(DomainError::not_found(format!("product {product_id}")).into());
        }

        let records: Vec<_> = stock.into_iter().map(|(record, _)| record).collect();
        let intent = apply_stock_delta(find_stock_for(&records, product_id), product_id, delta)?;

        match &intent {
            StockIntent::Update {
                id,
                product_id,
                new_quantity,
            } => {
                self.api.update_stock(*id, *product_id, *new_quantity).await?;
            }
            StockIntent::Create {
                product_id,
                quantity,
            } => {
                self.api.create_stock(*product_id, *quantity).await?;
            }
        }

        tracing::info!(
            product_id = %product_id,
            delta = delta.get(),
            quantity = intent.resulting_quantity(),
            "stock-in applied"
        );
        Ok(intent)
    }

    /// Delete a product, refusing while it still has stock.
    pub async fn delete_product(&self, product_id: ProductId) -> ClientResult<()> {
        let merged = self.products_with_stock().await?;
        let target = merged
            .iter()
            .find(|p| p.product.id == product_id)
            .ok_or_else(|| DomainError::not_found(format!("product {product_id}")))?;

        if let Err(e) = ensure_deletable(target) {
            tracing::warn!(product_id = %product_id, quantity = target.quantity, "refusing to delete stocked product");
            return Err(e.into());
        }

        self.api.delete_product(product_id).await
    }

    /// Stock list decorated with product names, codes and photos.
    pub async fn stock_lines(&self) -> ClientResult<Vec<StockLine>> {
        let (stock, products) = tokio::try_join!(self.api.list_stock(), self.api.list_products())?;
        Ok(stock_lines(&stock, &products))
    }

    pub async fn dashboard(&self) -> ClientResult<DashboardSummary> {
        let (products, categories, stock) = tokio::try_join!(
            self.api.list_products(),
            self.api.list_categories(),
            self.api.list_stock()
        )?;
        let records: Vec<_> = stock.into_iter().map(|(record, _)| record).collect();
        Ok(summarize(&products, &categories, &records))
    }
}
