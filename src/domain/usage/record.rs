//! Usage record entities

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One (item, meal set, date) contribution to item usage.
///
/// `total_used` is expected to equal `items_per_meal * meals_sold`, but the
/// supplied value is trusted as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Day the meals were sold
    pub sale_date: NaiveDate,
    /// Name of the consumed item
    pub item_name: String,
    /// Name of the meal set the item was sold in
    pub meal_set_name: String,
    /// How many of the item go into one meal
    pub items_per_meal: i64,
    /// Number of meals sold
    pub meals_sold: i64,
    /// Items consumed by this contribution
    pub total_used: i64,
}

impl UsageRecord {
    /// Create a record with `total_used` derived from the per-meal quantity
    pub fn new(
        sale_date: NaiveDate,
        item_name: impl Into<String>,
        meal_set_name: impl Into<String>,
        items_per_meal: i64,
        meals_sold: i64,
    ) -> Self {
        Self {
            sale_date,
            item_name: item_name.into(),
            meal_set_name: meal_set_name.into(),
            items_per_meal,
            meals_sold,
            total_used: items_per_meal.saturating_mul(meals_sold),
        }
    }

    /// Override the reported total
    pub fn with_total_used(mut self, total_used: i64) -> Self {
        self.total_used = total_used;
        self
    }
}

/// Usage of one item through one meal set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageBreakdown {
    pub meal_set_name: String,
    pub meals_sold: i64,
    pub items_per_meal: i64,
    pub total: i64,
}

/// Per-item usage total with its meal set breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageItem {
    pub item_name: String,
    pub total_used: i64,
    pub breakdown: Vec<UsageBreakdown>,
}

/// Breakdown line of an itemized report, one per source record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedUsageBreakdown {
    pub meal_set_name: String,
    pub meals_sold: i64,
    pub items_per_meal: i64,
    pub total: i64,
    pub sale_date: NaiveDate,
}

/// Per-item usage keeping every dated contribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUsageDetail {
    pub item_name: String,
    pub total_used: i64,
    pub breakdown: Vec<DatedUsageBreakdown>,
}

/// Usage summary for a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUsageSummary {
    pub date: NaiveDate,
    pub total_items: i64,
    pub unique_items: usize,
    pub items: Vec<UsageItem>,
}

/// Usage summary for an inclusive date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_items: i64,
    pub unique_items: usize,
    pub items: Vec<UsageItem>,
}
