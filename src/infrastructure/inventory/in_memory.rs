//! In-memory inventory repositories

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::inventory::{Item, ItemRepository, MealSet, MealSetRepository, Sale, SaleRepository};
use crate::domain::usage::DateRange;
use crate::domain::DomainError;

fn read_lock_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::internal(format!("Failed to acquire read lock: {}", e))
}

fn write_lock_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::internal(format!("Failed to acquire write lock: {}", e))
}

/// In-memory item repository
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    items: RwLock<HashMap<Uuid, Item>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Item>, DomainError> {
        let items = self.items.read().map_err(read_lock_error)?;
        Ok(items.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, DomainError> {
        let items = self.items.read().map_err(read_lock_error)?;
        Ok(items.values().find(|i| i.name() == name).cloned())
    }

    async fn create(&self, item: Item) -> Result<Item, DomainError> {
        let mut items = self.items.write().map_err(write_lock_error)?;

        if items.values().any(|i| i.name() == item.name()) {
            return Err(DomainError::conflict(format!(
                "Item '{}' already exists",
                item.name()
            )));
        }

        items.insert(item.id(), item.clone());
        Ok(item)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut items = self.items.write().map_err(write_lock_error)?;
        Ok(items.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Item>, DomainError> {
        let items = self.items.read().map_err(read_lock_error)?;
        let mut result: Vec<Item> = items.values().cloned().collect();
        result.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(result)
    }
}

/// In-memory meal set repository
#[derive(Debug, Default)]
pub struct InMemoryMealSetRepository {
    meal_sets: RwLock<HashMap<Uuid, MealSet>>,
}

impl InMemoryMealSetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(meal_sets: &HashMap<Uuid, MealSet>, candidate: &MealSet) -> bool {
    meal_sets
        .values()
        .any(|m| m.id() != candidate.id() && m.name() == candidate.name())
}

#[async_trait]
impl MealSetRepository for InMemoryMealSetRepository {
    async fn get(&self, id: Uuid) -> Result<Option<MealSet>, DomainError> {
        let meal_sets = self.meal_sets.read().map_err(read_lock_error)?;
        Ok(meal_sets.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<MealSet>, DomainError> {
        let meal_sets = self.meal_sets.read().map_err(read_lock_error)?;
        Ok(meal_sets.values().find(|m| m.name() == name).cloned())
    }

    async fn create(&self, meal_set: MealSet) -> Result<MealSet, DomainError> {
        let mut meal_sets = self.meal_sets.write().map_err(write_lock_error)?;

        if name_taken(&meal_sets, &meal_set) {
            return Err(DomainError::conflict(format!(
                "Meal set '{}' already exists",
                meal_set.name()
            )));
        }

        meal_sets.insert(meal_set.id(), meal_set.clone());
        Ok(meal_set)
    }

    async fn update(&self, meal_set: MealSet) -> Result<MealSet, DomainError> {
        let mut meal_sets = self.meal_sets.write().map_err(write_lock_error)?;

        if !meal_sets.contains_key(&meal_set.id()) {
            return Err(DomainError::not_found(format!(
                "Meal set '{}' not found",
                meal_set.id()
            )));
        }

        if name_taken(&meal_sets, &meal_set) {
            return Err(DomainError::conflict(format!(
                "Meal set '{}' already exists",
                meal_set.name()
            )));
        }

        meal_sets.insert(meal_set.id(), meal_set.clone());
        Ok(meal_set)
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<MealSet>, DomainError> {
        let meal_sets = self.meal_sets.read().map_err(read_lock_error)?;

        let mut result: Vec<MealSet> = meal_sets
            .values()
            .filter(|m| include_inactive || m.is_active())
            .cloned()
            .collect();

        result.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(result)
    }

    async fn uses_item(&self, item_id: Uuid) -> Result<bool, DomainError> {
        let meal_sets = self.meal_sets.read().map_err(read_lock_error)?;
        Ok(meal_sets.values().any(|m| m.uses_item(item_id)))
    }
}

/// In-memory sale repository
///
/// Sales are kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemorySaleRepository {
    sales: RwLock<Vec<Sale>>,
}

impl InMemorySaleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SaleRepository for InMemorySaleRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Sale>, DomainError> {
        let sales = self.sales.read().map_err(read_lock_error)?;
        Ok(sales.iter().find(|s| s.id() == id).cloned())
    }

    async fn create(&self, sale: Sale) -> Result<Sale, DomainError> {
        let mut sales = self.sales.write().map_err(write_lock_error)?;
        sales.push(sale.clone());
        Ok(sale)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut sales = self.sales.write().map_err(write_lock_error)?;
        let before = sales.len();
        sales.retain(|s| s.id() != id);
        Ok(sales.len() != before)
    }

    async fn list(&self, date: Option<NaiveDate>) -> Result<Vec<Sale>, DomainError> {
        let sales = self.sales.read().map_err(read_lock_error)?;

        // Reverse first so the stable sort keeps later insertions ahead
        let mut result: Vec<Sale> = sales
            .iter()
            .rev()
            .filter(|s| date.is_none_or(|d| s.sale_date() == d))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.sale_date().cmp(&a.sale_date()));
        Ok(result)
    }

    async fn list_between(&self, range: &DateRange) -> Result<Vec<Sale>, DomainError> {
        let sales = self.sales.read().map_err(read_lock_error)?;

        let mut result: Vec<Sale> = sales
            .iter()
            .filter(|s| range.contains(s.sale_date()))
            .cloned()
            .collect();

        result.sort_by_key(|s| s.sale_date());
        Ok(result)
    }
}
