//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::inventory::InventoryServiceTrait;
use crate::infrastructure::usage::UsageServiceTrait;
use crate::infrastructure::user::LoginServiceTrait;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone, Debug)]
pub struct AppState {
    pub inventory_service: Arc<dyn InventoryServiceTrait>,
    pub usage_service: Arc<dyn UsageServiceTrait>,
    pub login_service: Arc<dyn LoginServiceTrait>,
}

impl AppState {
    pub fn new(
        inventory_service: Arc<dyn InventoryServiceTrait>,
        usage_service: Arc<dyn UsageServiceTrait>,
        login_service: Arc<dyn LoginServiceTrait>,
    ) -> Self {
        Self {
            inventory_service,
            usage_service,
            login_service,
        }
    }
}
