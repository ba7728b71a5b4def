//! Inventory repository traits

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::{Item, MealSet, Sale};
use crate::domain::usage::DateRange;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for stock items
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync + std::fmt::Debug {
    async fn get(&self, id: Uuid) -> Result<Option<Item>, DomainError>;

    /// Exact, case-sensitive name lookup
    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, DomainError>;

    async fn create(&self, item: Item) -> Result<Item, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// All items ordered by name
    async fn list(&self) -> Result<Vec<Item>, DomainError>;
}

/// Repository for meal sets and their components
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MealSetRepository: Send + Sync + std::fmt::Debug {
    async fn get(&self, id: Uuid) -> Result<Option<MealSet>, DomainError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<MealSet>, DomainError>;

    async fn create(&self, meal_set: MealSet) -> Result<MealSet, DomainError>;

    async fn update(&self, meal_set: MealSet) -> Result<MealSet, DomainError>;

    /// Meal sets ordered by name, archived ones only when asked for
    async fn list(&self, include_inactive: bool) -> Result<Vec<MealSet>, DomainError>;

    /// Check whether any meal set, archived or not, uses the item
    async fn uses_item(&self, item_id: Uuid) -> Result<bool, DomainError>;
}

/// Repository for recorded sales
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SaleRepository: Send + Sync + std::fmt::Debug {
    async fn get(&self, id: Uuid) -> Result<Option<Sale>, DomainError>;

    async fn create(&self, sale: Sale) -> Result<Sale, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Sales newest first, optionally restricted to one day
    async fn list(&self, date: Option<NaiveDate>) -> Result<Vec<Sale>, DomainError>;

    /// Sales in the inclusive range, by sale date then insertion order
    async fn list_between(&self, range: &DateRange) -> Result<Vec<Sale>, DomainError>;
}
