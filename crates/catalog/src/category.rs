use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, DomainError, DomainResult, Entity};

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Create/edit payload for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn from_category(category: &Category) -> Self {
        Self::new(category.name.clone())
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("category name is required"));
        }
        Ok(())
    }
}
