//! Item endpoints

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::parse_id;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::inventory::Item;

/// Request to create an item
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemApiRequest {
    pub name: String,
}

/// Item response
#[derive(Debug, Clone, Serialize)]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id().to_string(),
            name: item.name().to_string(),
            created_at: item.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListItemsResponse {
    pub items: Vec<ItemResponse>,
    pub total: usize,
}

/// GET /items
pub async fn list_items(State(state): State<AppState>) -> Result<Json<ListItemsResponse>, ApiError> {
    let items: Vec<ItemResponse> = state
        .inventory_service
        .list_items()
        .await?
        .iter()
        .map(ItemResponse::from)
        .collect();
    let total = items.len();

    Ok(Json(ListItemsResponse { items, total }))
}

/// POST /items
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CreateItemApiRequest>,
) -> Result<Json<ItemResponse>, ApiError> {
    debug!(name = %request.name, "Creating item");

    let item = state.inventory_service.create_item(&request.name).await?;

    Ok(Json(ItemResponse::from(&item)))
}

/// GET /items/{item_id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let id = parse_id(&item_id)?;

    let item = state
        .inventory_service
        .get_item(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Item '{}' not found", item_id)))?;

    Ok(Json(ItemResponse::from(&item)))
}

/// DELETE /items/{item_id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(item_id = %item_id, "Deleting item");

    let id = parse_id(&item_id)?;
    state.inventory_service.delete_item(id).await?;

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": item_id
    })))
}
