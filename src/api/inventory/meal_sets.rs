//! Meal set endpoints

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::parse_id;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::inventory::{MealComponent, MealSet};
use crate::infrastructure::inventory::{CreateMealSetRequest, UpdateMealSetRequest};

/// Query parameters for listing meal sets
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMealSetsQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealComponentResponse {
    pub id: String,
    pub item_id: String,
    pub quantity: i64,
}

impl From<&MealComponent> for MealComponentResponse {
    fn from(component: &MealComponent) -> Self {
        Self {
            id: component.id.to_string(),
            item_id: component.item_id.to_string(),
            quantity: component.quantity,
        }
    }
}

/// Meal set response
#[derive(Debug, Clone, Serialize)]
pub struct MealSetResponse {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub components: Vec<MealComponentResponse>,
    pub created_at: String,
}

impl From<&MealSet> for MealSetResponse {
    fn from(meal_set: &MealSet) -> Self {
        Self {
            id: meal_set.id().to_string(),
            name: meal_set.name().to_string(),
            is_active: meal_set.is_active(),
            components: meal_set
                .components()
                .iter()
                .map(MealComponentResponse::from)
                .collect(),
            created_at: meal_set.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListMealSetsResponse {
    pub meal_sets: Vec<MealSetResponse>,
    pub total: usize,
}

/// GET /meal-sets
pub async fn list_meal_sets(
    State(state): State<AppState>,
    Query(query): Query<ListMealSetsQuery>,
) -> Result<Json<ListMealSetsResponse>, ApiError> {
    let meal_sets: Vec<MealSetResponse> = state
        .inventory_service
        .list_meal_sets(query.include_inactive)
        .await?
        .iter()
        .map(MealSetResponse::from)
        .collect();
    let total = meal_sets.len();

    Ok(Json(ListMealSetsResponse { meal_sets, total }))
}

/// POST /meal-sets
pub async fn create_meal_set(
    State(state): State<AppState>,
    Json(request): Json<CreateMealSetRequest>,
) -> Result<Json<MealSetResponse>, ApiError> {
    debug!(name = %request.name, components = request.components.len(), "Creating meal set");

    let meal_set = state.inventory_service.create_meal_set(request).await?;

    Ok(Json(MealSetResponse::from(&meal_set)))
}

/// GET /meal-sets/{meal_set_id}
pub async fn get_meal_set(
    State(state): State<AppState>,
    Path(meal_set_id): Path<String>,
) -> Result<Json<MealSetResponse>, ApiError> {
    let id = parse_id(&meal_set_id)?;

    let meal_set = state
        .inventory_service
        .get_meal_set(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Meal set '{}' not found", meal_set_id)))?;

    Ok(Json(MealSetResponse::from(&meal_set)))
}

/// PUT /meal-sets/{meal_set_id}
pub async fn update_meal_set(
    State(state): State<AppState>,
    Path(meal_set_id): Path<String>,
    Json(request): Json<UpdateMealSetRequest>,
) -> Result<Json<MealSetResponse>, ApiError> {
    debug!(meal_set_id = %meal_set_id, "Updating meal set");

    let id = parse_id(&meal_set_id)?;
    let meal_set = state.inventory_service.update_meal_set(id, request).await?;

    Ok(Json(MealSetResponse::from(&meal_set)))
}

/// DELETE /meal-sets/{meal_set_id}
///
/// Archives the meal set; recorded sales keep pointing at it.
pub async fn archive_meal_set(
    State(state): State<AppState>,
    Path(meal_set_id): Path<String>,
) -> Result<Json<MealSetResponse>, ApiError> {
    debug!(meal_set_id = %meal_set_id, "Archiving meal set");

    let id = parse_id(&meal_set_id)?;
    let meal_set = state.inventory_service.archive_meal_set(id).await?;

    Ok(Json(MealSetResponse::from(&meal_set)))
}
