//! `stockroom-client`
//!
//! **Responsibility:** typed access to the inventory REST API.
//!
//! This crate provides:
//! - `ApiClient`: authenticated HTTP calls for products, categories and stock
//! - Schema validation of response bodies into domain types
//! - `StockService`: stock-in, guarded delete, and read-side views
//!
//! The remote API stays the authority; nothing is cached or queued locally.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod service;
pub mod wire;

pub use api::{InventoryApi, StockEntry};
pub use auth::{Credentials, Session, User};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use service::StockService;
