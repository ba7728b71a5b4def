//! Usage rows derived from recorded sales

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::inventory::{Item, ItemRepository, MealSet, MealSetRepository, SaleRepository};
use crate::domain::usage::{DateRange, UsageRecord, UsageSource};
use crate::domain::DomainError;

/// Joins sales with meal set components to produce usage rows
///
/// Each sale yields one row per component of its meal set. Sales whose meal
/// set or component item no longer exists are skipped.
#[derive(Debug)]
pub struct UsageTrackingView<S, M, I>
where
    S: SaleRepository,
    M: MealSetRepository,
    I: ItemRepository,
{
    sales: Arc<S>,
    meal_sets: Arc<M>,
    items: Arc<I>,
}

impl<S, M, I> UsageTrackingView<S, M, I>
where
    S: SaleRepository,
    M: MealSetRepository,
    I: ItemRepository,
{
    pub fn new(sales: Arc<S>, meal_sets: Arc<M>, items: Arc<I>) -> Self {
        Self {
            sales,
            meal_sets,
            items,
        }
    }

    async fn meal_set(
        &self,
        cache: &mut HashMap<Uuid, Option<MealSet>>,
        id: Uuid,
    ) -> Result<Option<MealSet>, DomainError> {
        if let Some(cached) = cache.get(&id) {
            return Ok(cached.clone());
        }

        let meal_set = self.meal_sets.get(id).await?;
        cache.insert(id, meal_set.clone());
        Ok(meal_set)
    }

    async fn item(
        &self,
        cache: &mut HashMap<Uuid, Option<Item>>,
        id: Uuid,
    ) -> Result<Option<Item>, DomainError> {
        if let Some(cached) = cache.get(&id) {
            return Ok(cached.clone());
        }

        let item = self.items.get(id).await?;
        cache.insert(id, item.clone());
        Ok(item)
    }
}

#[async_trait]
impl<S, M, I> UsageSource for UsageTrackingView<S, M, I>
where
    S: SaleRepository + 'static,
    M: MealSetRepository + 'static,
    I: ItemRepository + 'static,
{
    async fn fetch_usage(&self, range: &DateRange) -> Result<Vec<UsageRecord>, DomainError> {
        let sales = self.sales.list_between(range).await?;

        let mut meal_sets = HashMap::new();
        let mut items = HashMap::new();
        let mut records = Vec::new();

        for sale in &sales {
            let Some(meal_set) = self.meal_set(&mut meal_sets, sale.meal_set_id()).await? else {
                warn!(sale_id = %sale.id(), meal_set_id = %sale.meal_set_id(), "Sale references unknown meal set");
                continue;
            };

            for component in meal_set.components() {
                let Some(item) = self.item(&mut items, component.item_id).await? else {
                    warn!(item_id = %component.item_id, meal_set = %meal_set.name(), "Meal set references unknown item");
                    continue;
                };

                records.push(UsageRecord::new(
                    sale.sale_date(),
                    item.name(),
                    meal_set.name(),
                    component.quantity,
                    sale.quantity(),
                ));
            }
        }

        debug!(range = %range, sales = sales.len(), rows = records.len(), "Fetched usage rows");

        Ok(records)
    }
}
