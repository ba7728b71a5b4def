//! Inventory infrastructure implementations

mod in_memory;
mod service;

pub use in_memory::{InMemoryItemRepository, InMemoryMealSetRepository, InMemorySaleRepository};
pub use service::{
    CreateMealSetRequest, InventoryService, InventoryServiceTrait, RecordSaleRequest,
    UpdateMealSetRequest,
};
