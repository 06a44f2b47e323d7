//! The remote-API seam the stock workflows depend on.

use async_trait::async_trait;

use stockroom_catalog::{Category, Product};
use stockroom_core::{ProductId, StockId};
use stockroom_inventory::{StockRecord, StockRowDetails};

use crate::error::ClientResult;

/// A stock row as listed by `GET /stok`.
pub type StockEntry = (StockRecord, StockRowDetails);

/// Inventory operations needed by [`crate::StockService`].
///
/// Implementations return validated domain values and surface any non-2xx
/// response as [`crate::ClientError::Api`].
#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn list_products(&self) -> ClientResult<Vec<Product>>;

    async fn list_categories(&self) -> ClientResult<Vec<Category>>;

    async fn list_stock(&self) -> ClientResult<Vec<StockEntry>>;

    /// `POST /stok`.
    async fn create_stock(&self, product_id: ProductId, quantity: u64) -> ClientResult<()>;

    /// `PUT /stok/{id}`; replaces the record's quantity.
    async fn update_stock(
        &self,
        id: StockId,
        product_id: ProductId,
        quantity: u64,
    ) -> ClientResult<()>;

    async fn delete_product(&self, id: ProductId) -> ClientResult<()>;
}
