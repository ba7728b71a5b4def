//! Item entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_name, InventoryValidationError};

/// A physical stock item such as a chicken wing or a drink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl Item {
    /// Create a new item; the name is trimmed
    pub fn new(name: &str) -> Result<Self, InventoryValidationError> {
        let name = validate_name(name)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
