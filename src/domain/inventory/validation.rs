//! Inventory validation

use std::collections::HashSet;

use thiserror::Error;
use uuid::Uuid;

use super::meal_set::ComponentSpec;

/// Errors that can occur during inventory validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InventoryValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Meal set must contain at least one item")]
    NoComponents,

    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    #[error("Item '{0}' appears more than once in the meal set")]
    DuplicateComponent(Uuid),
}

pub const MAX_NAME_LENGTH: usize = 100;

/// Validate and normalize a display name
///
/// Returns the trimmed name.
pub fn validate_name(name: &str) -> Result<String, InventoryValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(InventoryValidationError::EmptyName);
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(InventoryValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(trimmed.to_string())
}

/// Validate a quantity
pub fn validate_quantity(quantity: i64) -> Result<(), InventoryValidationError> {
    if quantity < 1 {
        return Err(InventoryValidationError::InvalidQuantity(quantity));
    }

    Ok(())
}

/// Validate a meal set component list
pub fn validate_components(components: &[ComponentSpec]) -> Result<(), InventoryValidationError> {
    if components.is_empty() {
        return Err(InventoryValidationError::NoComponents);
    }

    let mut seen = HashSet::with_capacity(components.len());

    for component in components {
        validate_quantity(component.quantity)?;

        if !seen.insert(component.item_id) {
            return Err(InventoryValidationError::DuplicateComponent(component.item_id));
        }
    }

    Ok(())
}
