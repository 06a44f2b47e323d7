//! HTTP client for the inventory REST API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use stockroom_catalog::{Category, CategoryDraft, Product, ProductDraft, ValidProductDraft};
use stockroom_core::{CategoryId, DomainError, ProductId, StockId};

use crate::api::{InventoryApi, StockEntry};
use crate::auth::{Credentials, Session};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::wire::{
    CategoryBody, CategoryRow, ErrorBody, LoginRequest, LoginResponse, ProductRow, StockBody,
    StockRow, convert_all,
};

/// Client for the inventory API.
///
/// Cloning is cheap; clones share the connection pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<RwLock<Option<Session>>>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: Arc::new(RwLock::new(config.token.map(Session::from_token))),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ==================== Session ====================

    /// Log in and keep the returned token for subsequent requests.
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<Session> {
        credentials.validate()?;

        let resp = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginRequest {
                email: &credentials.email,
                password: &credentials.password,
            })
            .send()
            .await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(email = %credentials.email, "login rejected");
            return Err(ClientError::InvalidCredentials);
        }

        let body: LoginResponse = decode(ensure_success(resp).await?).await?;
        let session = Session {
            token: body.token,
            user: body.user.map(Into::into),
        };

        *self.session.write().await = Some(session.clone());
        tracing::info!(email = %credentials.email, "logged in");
        Ok(session)
    }

    /// Drop the in-memory session.
    pub async fn logout(&self) {
        if self.session.write().await.take().is_some() {
            tracing::info!("logged out");
        }
    }

    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    // ==================== Products ====================

    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        let rows: Vec<ProductRow> = self.get_json("/produk").await?;
        Ok(convert_all(rows)?)
    }

    pub async fn get_product(&self, id: ProductId) -> ClientResult<Product> {
        let row: ProductRow = self.get_json(&format!("/produk/{id}")).await?;
        Ok(Product::try_from(row)?)
    }

    /// `POST /produk` as multipart form data.
    pub async fn create_product(&self, draft: &ProductDraft) -> ClientResult<()> {
        let form = product_form(&draft.validate()?)?;
        self.execute(self.http.post(self.url("/produk")).multipart(form))
            .await?;
        tracing::info!(name = %draft.name, "product created");
        Ok(())
    }

    /// `PUT /produk/{id}`; a photo already stored remotely is not re-sent.
    pub async fn update_product(&self, id: ProductId, draft: &ProductDraft) -> ClientResult<()> {
        let form = product_form(&draft.validate()?)?;
        self.execute(self.http.put(self.url(&format!("/produk/{id}"))).multipart(form))
            .await?;
        tracing::info!(product_id = %id, "product updated");
        Ok(())
    }

    /// Unguarded `DELETE /produk/{id}`; see [`crate::StockService::delete_product`].
    pub async fn delete_product(&self, id: ProductId) -> ClientResult<()> {
        self.execute(self.http.delete(self.url(&format!("/produk/{id}"))))
            .await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    // ==================== Categories ====================

    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        let rows: Vec<CategoryRow> = self.get_json("/kategori").await?;
        Ok(convert_all(rows)?)
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> ClientResult<()> {
        draft.validate()?;
        let body = CategoryBody {
            nama_kategori: &draft.name,
        };
        self.execute(self.http.post(self.url("/kategori")).json(&body))
            .await?;
        tracing::info!(name = %draft.name, "category created");
        Ok(())
    }

    pub async fn update_category(&self, id: CategoryId, draft: &CategoryDraft) -> ClientResult<()> {
        draft.validate()?;
        let body = CategoryBody {
            nama_kategori: &draft.name,
        };
        self.execute(self.http.put(self.url(&format!("/kategori/{id}"))).json(&body))
            .await?;
        tracing::info!(category_id = %id, "category updated");
        Ok(())
    }

    pub async fn delete_category(&self, id: CategoryId) -> ClientResult<()> {
        self.execute(self.http.delete(self.url(&format!("/kategori/{id}"))))
            .await?;
        tracing::info!(category_id = %id, "category deleted");
        Ok(())
    }

    // ==================== Stock ====================

    pub async fn list_stock(&self) -> ClientResult<Vec<StockEntry>> {
        let rows: Vec<StockRow> = self.get_json("/stok").await?;
        Ok(convert_all(rows)?)
    }

    pub async fn create_stock(&self, product_id: ProductId, quantity: u64) -> ClientResult<()> {
        let body = StockBody {
            id_produk: product_id,
            jumlah_barang: quantity,
        };
        self.execute(self.http.post(self.url("/stok")).json(&body))
            .await?;
        tracing::info!(product_id = %product_id, quantity, "stock record created");
        Ok(())
    }

    pub async fn update_stock(
        &self,
        id: StockId,
        product_id: ProductId,
        quantity: u64,
    ) -> ClientResult<()> {
        let body = StockBody {
            id_produk: product_id,
            jumlah_barang: quantity,
        };
        self.execute(self.http.put(self.url(&format!("/stok/{id}"))).json(&body))
            .await?;
        tracing::info!(stock_id = %id, product_id = %product_id, quantity, "stock record updated");
        Ok(())
    }

    /// Delete a stock record (explicit user action from the stock list).
    pub async fn delete_stock(&self, id: StockId) -> ClientResult<()> {
        self.execute(self.http.delete(self.url(&format!("/stok/{id}"))))
            .await?;
        tracing::info!(stock_id = %id, "stock record deleted");
        Ok(())
    }

    // ==================== Plumbing ====================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        let resp = self.execute(self.http.get(self.url(path))).await?;
        decode(resp).await
    }

    /// Attach the bearer token, send, and map non-2xx statuses to errors.
    async fn execute(&self, req: RequestBuilder) -> ClientResult<Response> {
        let req = match self.session.read().await.as_ref() {
            Some(session) => req.bearer_auth(&session.token),
            None => req,
        };
        let resp = req.send().await?;
        ensure_success(resp).await
    }
}

async fn ensure_success(resp: Response) -> ClientResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.message)
        .or_else(|| (!text.trim().is_empty()).then(|| text.trim().to_string()));

    tracing::warn!(status = status.as_u16(), message = ?message, "API request failed");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> ClientResult<T> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))
}

fn product_form(draft: &ValidProductDraft) -> ClientResult<Form> {
    let mut form = Form::new()
        .text("nama_produk", draft.name.clone())
        .text("id_kategori", draft.category_id.to_string())
        .text("kode_produk", draft.code.clone());

    if let Some(upload) = draft.upload() {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)
            .map_err(|_| {
                DomainError::validation(format!("invalid photo MIME type `{}`", upload.mime_type))
            })?;
        form = form.part("foto_produk", part);
    }

    Ok(form)
}

#[async_trait]
impl InventoryApi for ApiClient {
    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        ApiClient::list_products(self).await
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        ApiClient::list_categories(self).await
    }

    async fn list_stock(&self) -> ClientResult<Vec<StockEntry>> {
        ApiClient::list_stock(self).await
    }

    async fn create_stock(&self, product_id: ProductId, quantity: u64) -> ClientResult<()> {
        ApiClient::create_stock(self, product_id, quantity).await
    }

    async fn update_stock(
        &self,
        id: StockId,
        product_id: ProductId,
        quantity: u64,
    ) -> ClientResult<()> {
        ApiClient::update_stock(self, id, product_id, quantity).await
    }

    async fn delete_product(&self, id: ProductId) -> ClientResult<()> {
        ApiClient::delete_product(self, id).await
    }
}
