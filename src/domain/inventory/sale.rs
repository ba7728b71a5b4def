//! Sale entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_quantity, InventoryValidationError};

/// A number of meal sets sold on a given day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    id: Uuid,
    meal_set_id: Uuid,
    quantity: i64,
    sale_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl Sale {
    pub fn new(
        meal_set_id: Uuid,
        quantity: i64,
        sale_date: NaiveDate,
    ) -> Result<Self, InventoryValidationError> {
        validate_quantity(quantity)?;

        Ok(Self {
            id: Uuid::new_v4(),
            meal_set_id,
            quantity,
            sale_date,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn meal_set_id(&self) -> Uuid {
        self.meal_set_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn sale_date(&self) -> NaiveDate {
        self.sale_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
