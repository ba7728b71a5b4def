//! Inventory API endpoints: items, meal sets and sales

pub mod items;
pub mod meal_sets;
pub mod sales;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use uuid::Uuid;

use super::state::AppState;
use super::types::ApiError;
use crate::domain::DomainError;

/// Create inventory router
pub fn create_inventory_router() -> Router<AppState> {
    Router::new()
        // Items
        .route("/items", get(items::list_items))
        .route("/items", post(items::create_item))
        .route("/items/{item_id}", get(items::get_item))
        .route("/items/{item_id}", delete(items::delete_item))
        // Meal sets
        .route("/meal-sets", get(meal_sets::list_meal_sets))
        .route("/meal-sets", post(meal_sets::create_meal_set))
        .route("/meal-sets/{meal_set_id}", get(meal_sets::get_meal_set))
        .route("/meal-sets/{meal_set_id}", put(meal_sets::update_meal_set))
        .route("/meal-sets/{meal_set_id}", delete(meal_sets::archive_meal_set))
        // Sales
        .route("/sales", get(sales::list_sales))
        .route("/sales", post(sales::record_sale))
        .route("/sales/{sale_id}", delete(sales::delete_sale))
}

pub(crate) fn parse_id(value: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value)
        .map_err(|_| DomainError::invalid_id(format!("Invalid ID '{}'", value)).into())
}
