use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, DomainError, DomainResult, Entity, ProductId};

use crate::photo::Photo;

/// Product as returned by the inventory API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
    /// Category name joined server-side, when the endpoint provides it.
    pub category_name: Option<String>,
    pub code: String,
    pub photo_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Label used in product pickers: `CODE - Name`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }

    /// Category name for display, `-` when the server did not join one.
    pub fn category_label(&self) -> &str {
        self.category_name.as_deref().unwrap_or("-")
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Create/edit payload for a product.
///
/// `category_id` stays optional so a half-filled form can be represented;
/// `validate` rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductDraft {
    pub name: String,
    pub category_id: Option<CategoryId>,
    pub code: String,
    pub photo: Option<Photo>,
}

/// A draft that passed validation; only this can be sent to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProductDraft {
    pub name: String,
    pub category_id: CategoryId,
    pub code: String,
    pub photo: Option<Photo>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, category_id: CategoryId, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category_id: Some(category_id),
            code: code.into(),
            photo: None,
        }
    }

    pub fn with_photo(mut self, photo: Photo) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Prefill an edit form from an existing product. Only HTTP(S) photo
    /// references are kept; anything else cannot be re-sent and is dropped,
    /// which leaves the stored photo untouched on update.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category_id: Some(product.category_id),
            code: product.code.clone(),
            photo: product
                .photo_url
                .as_deref()
                .filter(|url| Photo::is_remote_reference(url))
                .map(|url| Photo::from_reference(url.to_string())),
        }
    }

    pub fn validate(&self) -> DomainResult<ValidProductDraft> {
        let category_id = match self.category_id {
            Some(id) if !self.name.trim().is_empty() => id,
            _ => return Err(DomainError::validation("product name and category are required")),
        };

        Ok(ValidProductDraft {
            name: self.name.clone(),
            category_id,
            code: self.code.clone(),
            photo: self.photo.clone(),
        })
    }
}

impl ValidProductDraft {
    /// Photo that still has to be uploaded; remote photos are left untouched.
    pub fn upload(&self) -> Option<&crate::photo::PhotoUpload> {
        match &self.photo {
            Some(Photo::Upload(upload)) => Some(upload),
            _ => None,
        }
    }
}
