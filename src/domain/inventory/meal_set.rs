//! Meal set entity
//!
//! A meal set is a sellable bundle of items with fixed per-meal quantities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_components, validate_name, InventoryValidationError};

/// Requested component of a meal set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub item_id: Uuid,
    pub quantity: i64,
}

impl ComponentSpec {
    pub fn new(item_id: Uuid, quantity: i64) -> Self {
        Self { item_id, quantity }
    }
}

/// One item line of a meal set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealComponent {
    pub id: Uuid,
    pub meal_set_id: Uuid,
    pub item_id: Uuid,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

/// Meal set entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSet {
    id: Uuid,
    name: String,
    is_active: bool,
    components: Vec<MealComponent>,
    created_at: DateTime<Utc>,
}

impl MealSet {
    /// Create a new active meal set
    pub fn new(name: &str, components: &[ComponentSpec]) -> Result<Self, InventoryValidationError> {
        let name = validate_name(name)?;
        validate_components(components)?;

        let id = Uuid::new_v4();
        let now = Utc::now();

        Ok(Self {
            id,
            name,
            is_active: true,
            components: build_components(id, components, now),
            created_at: now,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn components(&self) -> &[MealComponent] {
        &self.components
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check whether any component uses the item
    pub fn uses_item(&self, item_id: Uuid) -> bool {
        self.components.iter().any(|c| c.item_id == item_id)
    }

    // Mutators

    pub fn set_name(&mut self, name: &str) -> Result<(), InventoryValidationError> {
        self.name = validate_name(name)?;
        Ok(())
    }

    /// Replace the whole component list
    pub fn set_components(
        &mut self,
        components: &[ComponentSpec],
    ) -> Result<(), InventoryValidationError> {
        validate_components(components)?;
        self.components = build_components(self.id, components, Utc::now());
        Ok(())
    }

    /// Withdraw the meal set from sale; history keeps referencing it
    pub fn archive(&mut self) {
        self.is_active = false;
    }
}

fn build_components(
    meal_set_id: Uuid,
    specs: &[ComponentSpec],
    created_at: DateTime<Utc>,
) -> Vec<MealComponent> {
    specs
        .iter()
        .map(|spec| MealComponent {
            id: Uuid::new_v4(),
            meal_set_id,
            item_id: spec.item_id,
            quantity: spec.quantity,
            created_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_meal_set() {
        let wing = Uuid::new_v4();
        let set = MealSet::new("Combo A", &[ComponentSpec::new(wing, 2)]).unwrap();

        assert!(set.is_active());
        assert_eq!(set.components().len(), 1);
        assert_eq!(set.components()[0].meal_set_id, set.id());
        assert!(set.uses_item(wing));
        assert!(!set.uses_item(Uuid::new_v4()));
    }

    #[test]
    fn test_meal_set_requires_components() {
        assert_eq!(
            MealSet::new("Combo A", &[]),
            Err(InventoryValidationError::NoComponents)
        );
    }

    #[test]
    fn test_set_components_replaces() {
        let wing = Uuid::new_v4();
        let drink = Uuid::new_v4();
        let mut set = MealSet::new("Combo A", &[ComponentSpec::new(wing, 2)]).unwrap();

        set.set_components(&[ComponentSpec::new(drink, 1)]).unwrap();

        assert!(!set.uses_item(wing));
        assert!(set.uses_item(drink));
    }

    #[test]
    fn test_archive() {
        let mut set = MealSet::new("Combo A", &[ComponentSpec::new(Uuid::new_v4(), 1)]).unwrap();
        set.archive();
        assert!(!set.is_active());
    }
}
