//! Sale endpoints

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::parse_id;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::api::usage::parse_date_param;
use crate::domain::inventory::Sale;
use crate::domain::usage::DATE_FORMAT;
use crate::infrastructure::inventory::RecordSaleRequest;

/// Query parameters for listing sales
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSalesQuery {
    /// Restrict to one day, `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Request to record a sale
#[derive(Debug, Clone, Deserialize)]
pub struct RecordSaleApiRequest {
    pub meal_set_id: Uuid,
    pub quantity: i64,
    #[serde(default)]
    pub sale_date: Option<String>,
}

/// Sale response
#[derive(Debug, Clone, Serialize)]
pub struct SaleResponse {
    pub id: String,
    pub meal_set_id: String,
    pub quantity: i64,
    pub sale_date: String,
    pub created_at: String,
}

impl From<&Sale> for SaleResponse {
    fn from(sale: &Sale) -> Self {
        Self {
            id: sale.id().to_string(),
            meal_set_id: sale.meal_set_id().to_string(),
            quantity: sale.quantity(),
            sale_date: sale.sale_date().format(DATE_FORMAT).to_string(),
            created_at: sale.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListSalesResponse {
    pub sales: Vec<SaleResponse>,
    pub total: usize,
}

/// GET /sales
pub async fn list_sales(
    State(state): State<AppState>,
    Query(query): Query<ListSalesQuery>,
) -> Result<Json<ListSalesResponse>, ApiError> {
    let date = query
        .date
        .as_deref()
        .map(|value| parse_date_param("date", value))
        .transpose()?;

    let sales: Vec<SaleResponse> = state
        .inventory_service
        .list_sales(date)
        .await?
        .iter()
        .map(SaleResponse::from)
        .collect();
    let total = sales.len();

    Ok(Json(ListSalesResponse { sales, total }))
}

/// POST /sales
pub async fn record_sale(
    State(state): State<AppState>,
    Json(request): Json<RecordSaleApiRequest>,
) -> Result<Json<SaleResponse>, ApiError> {
    debug!(meal_set_id = %request.meal_set_id, quantity = request.quantity, "Recording sale");

    let sale_date = request
        .sale_date
        .as_deref()
        .map(|value| parse_date_param("sale_date", value))
        .transpose()?;

    let sale = state
        .inventory_service
        .record_sale(RecordSaleRequest {
            meal_set_id: request.meal_set_id,
            quantity: request.quantity,
            sale_date,
        })
        .await?;

    Ok(Json(SaleResponse::from(&sale)))
}

/// DELETE /sales/{sale_id}
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(sale_id = %sale_id, "Deleting sale");

    let id = parse_id(&sale_id)?;
    state.inventory_service.delete_sale(id).await?;

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": sale_id
    })))
}
