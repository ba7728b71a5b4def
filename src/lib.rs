//! Favorite Chicken
//!
//! Inventory, meal set and sales tracking for a fried chicken shop, with:
//! - Item usage reports aggregated from sales
//! - A per-key attempt rate limiter guarding logins

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::{
    inventory::{
        InMemoryItemRepository, InMemoryMealSetRepository, InMemorySaleRepository,
        InventoryService,
    },
    rate_limit::AttemptRateLimiter,
    usage::{UsageService, UsageTrackingView},
    user::{Argon2Hasher, CreateUserRequest, InMemoryUserRepository, LoginService, UserService},
};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let items = Arc::new(InMemoryItemRepository::new());
    let meal_sets = Arc::new(InMemoryMealSetRepository::new());
    let sales = Arc::new(InMemorySaleRepository::new());

    let inventory_service = Arc::new(InventoryService::new(
        items.clone(),
        meal_sets.clone(),
        sales.clone(),
    ));

    let usage_view = Arc::new(UsageTrackingView::new(sales, meal_sets, items));
    let usage_service = Arc::new(UsageService::new(usage_view));

    let users = Arc::new(InMemoryUserRepository::new());
    let hasher = Arc::new(Argon2Hasher::new());

    let seeds = config
        .auth
        .users
        .iter()
        .map(|seed| CreateUserRequest {
            username: seed.username.clone(),
            password: seed.password.clone(),
            role: seed.role,
        })
        .collect();
    let seeded = UserService::new(users.clone(), hasher.clone())
        .seed(seeds)
        .await?;
    info!(seeded, "Seeded users from configuration");

    let limiter = Arc::new(AttemptRateLimiter::new(config.rate_limit.clone()));
    info!(
        max_attempts = config.rate_limit.max_attempts,
        window_ms = config.rate_limit.window_ms,
        min_wait_ms = config.rate_limit.min_wait_ms,
        "Login rate limiter configured"
    );

    let login_service = Arc::new(LoginService::new(users, hasher, limiter));

    Ok(AppState::new(inventory_service, usage_service, login_service))
}
