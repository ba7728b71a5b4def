use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::inventory;
use super::state::AppState;
use super::usage;

/// Create a minimal router without state
///
/// `/ready` needs the services and is not available here.
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Rate-limited login
        .nest("/auth", auth::create_auth_router())
        // Items, meal sets and sales
        .merge(inventory::create_inventory_router())
        // Usage reports
        .merge(usage::create_usage_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
