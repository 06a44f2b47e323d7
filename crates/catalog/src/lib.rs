//! Catalog domain module: products and categories.
//!
//! This crate contains the catalog records as the remote API exposes them,
//! plus the validated drafts used to create or edit them. Pure domain logic
//! (no IO, no HTTP).

pub mod category;
pub mod date;
pub mod photo;
pub mod product;

pub use category::{Category, CategoryDraft};
pub use date::format_date_id;
pub use photo::{Photo, PhotoUpload};
pub use product::{Product, ProductDraft, ValidProductDraft};
