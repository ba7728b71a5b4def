//! Inventory service for items, meal sets and sales

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::inventory::{
    ComponentSpec, Item, ItemRepository, MealSet, MealSetRepository, Sale, SaleRepository,
};
use crate::domain::DomainError;

/// Request for creating a meal set
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMealSetRequest {
    pub name: String,
    pub components: Vec<ComponentSpec>,
}

/// Request for updating a meal set
///
/// A provided component list replaces the existing one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMealSetRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub components: Option<Vec<ComponentSpec>>,
}

/// Request for recording a sale
#[derive(Debug, Clone, Deserialize)]
pub struct RecordSaleRequest {
    pub meal_set_id: Uuid,
    pub quantity: i64,
    /// Defaults to today (UTC)
    #[serde(default)]
    pub sale_date: Option<NaiveDate>,
}

/// Trait for inventory management
#[async_trait]
pub trait InventoryServiceTrait: Send + Sync + Debug {
    async fn list_items(&self) -> Result<Vec<Item>, DomainError>;
    async fn get_item(&self, id: Uuid) -> Result<Option<Item>, DomainError>;
    async fn create_item(&self, name: &str) -> Result<Item, DomainError>;
    async fn delete_item(&self, id: Uuid) -> Result<(), DomainError>;

    async fn list_meal_sets(&self, include_inactive: bool) -> Result<Vec<MealSet>, DomainError>;
    async fn get_meal_set(&self, id: Uuid) -> Result<Option<MealSet>, DomainError>;
    async fn create_meal_set(&self, request: CreateMealSetRequest) -> Result<MealSet, DomainError>;
    async fn update_meal_set(
        &self,
        id: Uuid,
        request: UpdateMealSetRequest,
    ) -> Result<MealSet, DomainError>;
    async fn archive_meal_set(&self, id: Uuid) -> Result<MealSet, DomainError>;

    async fn list_sales(&self, date: Option<NaiveDate>) -> Result<Vec<Sale>, DomainError>;
    async fn record_sale(&self, request: RecordSaleRequest) -> Result<Sale, DomainError>;
    async fn delete_sale(&self, id: Uuid) -> Result<(), DomainError>;
}

/// Inventory service
#[derive(Debug)]
pub struct InventoryService<I, M, S>
where
    I: ItemRepository,
    M: MealSetRepository,
    S: SaleRepository,
{
    items: Arc<I>,
    meal_sets: Arc<M>,
    sales: Arc<S>,
}

impl<I, M, S> InventoryService<I, M, S>
where
    I: ItemRepository,
    M: MealSetRepository,
    S: SaleRepository,
{
    pub fn new(items: Arc<I>, meal_sets: Arc<M>, sales: Arc<S>) -> Self {
        Self {
            items,
            meal_sets,
            sales,
        }
    }

    async fn ensure_items_exist(&self, components: &[ComponentSpec]) -> Result<(), DomainError> {
        for component in components {
            if self.items.get(component.item_id).await?.is_none() {
                return Err(DomainError::validation(format!(
                    "Item '{}' not found",
                    component.item_id
                )));
            }
        }

        Ok(())
    }

    async fn require_meal_set(&self, id: Uuid) -> Result<MealSet, DomainError> {
        self.meal_sets
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Meal set '{}' not found", id)))
    }
}

#[async_trait]
impl<I, M, S> InventoryServiceTrait for InventoryService<I, M, S>
where
    I: ItemRepository + 'static,
    M: MealSetRepository + 'static,
    S: SaleRepository + 'static,
{
    async fn list_items(&self) -> Result<Vec<Item>, DomainError> {
        self.items.list().await
    }

    async fn get_item(&self, id: Uuid) -> Result<Option<Item>, DomainError> {
        self.items.get(id).await
    }

    async fn create_item(&self, name: &str) -> Result<Item, DomainError> {
        let item = Item::new(name).map_err(|e| DomainError::validation(e.to_string()))?;
        info!(id = %item.id(), name = %item.name(), "Creating item");

        self.items.create(item).await
    }

    async fn delete_item(&self, id: Uuid) -> Result<(), DomainError> {
        info!(id = %id, "Deleting item");

        if self.items.get(id).await?.is_none() {
            return Err(DomainError::not_found(format!("Item '{}' not found", id)));
        }

        if self.meal_sets.uses_item(id).await? {
            return Err(DomainError::conflict(format!(
                "Item '{}' is used by a meal set",
                id
            )));
        }

        self.items.delete(id).await?;
        Ok(())
    }

    async fn list_meal_sets(&self, include_inactive: bool) -> Result<Vec<MealSet>, DomainError> {
        self.meal_sets.list(include_inactive).await
    }

    async fn get_meal_set(&self, id: Uuid) -> Result<Option<MealSet>, DomainError> {
        self.meal_sets.get(id).await
    }

    async fn create_meal_set(&self, request: CreateMealSetRequest) -> Result<MealSet, DomainError> {
        let meal_set = MealSet::new(&request.name, &request.components)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.ensure_items_exist(&request.components).await?;

        info!(
            id = %meal_set.id(),
            name = %meal_set.name(),
            components = meal_set.components().len(),
            "Creating meal set"
        );

        self.meal_sets.create(meal_set).await
    }

    async fn update_meal_set(
        &self,
        id: Uuid,
        request: UpdateMealSetRequest,
    ) -> Result<MealSet, DomainError> {
        info!(id = %id, "Updating meal set");

        let mut meal_set = self.require_meal_set(id).await?;

        if let Some(name) = request.name {
            meal_set
                .set_name(&name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(components) = request.components {
            meal_set
                .set_components(&components)
                .map_err(|e| DomainError::validation(e.to_string()))?;
            self.ensure_items_exist(&components).await?;
        }

        self.meal_sets.update(meal_set).await
    }

    async fn archive_meal_set(&self, id: Uuid) -> Result<MealSet, DomainError> {
        info!(id = %id, "Archiving meal set");

        let mut meal_set = self.require_meal_set(id).await?;

        if !meal_set.is_active() {
            debug!(id = %id, "Meal set already archived");
            return Ok(meal_set);
        }

        meal_set.archive();
        self.meal_sets.update(meal_set).await
    }

    async fn list_sales(&self, date: Option<NaiveDate>) -> Result<Vec<Sale>, DomainError> {
        self.sales.list(date).await
    }

    async fn record_sale(&self, request: RecordSaleRequest) -> Result<Sale, DomainError> {
        let meal_set = self.meal_sets.get(request.meal_set_id).await?.ok_or_else(|| {
            DomainError::validation(format!("Meal set '{}' not found", request.meal_set_id))
        })?;

        if !meal_set.is_active() {
            return Err(DomainError::validation(format!(
                "Meal set '{}' is archived",
                meal_set.name()
            )));
        }

        let sale_date = request
            .sale_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let sale = Sale::new(meal_set.id(), request.quantity, sale_date)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        info!(
            id = %sale.id(),
            meal_set = %meal_set.name(),
            quantity = sale.quantity(),
            sale_date = %sale.sale_date(),
            "Recording sale"
        );

        self.sales.create(sale).await
    }

    async fn delete_sale(&self, id: Uuid) -> Result<(), DomainError> {
        info!(id = %id, "Deleting sale");

        if !self.sales.delete(id).await? {
            return Err(DomainError::not_found(format!("Sale '{}' not found", id)));
        }

        Ok(())
    }
}
