//! API layer - HTTP endpoints

pub mod auth;
pub mod health;
pub mod inventory;
pub mod router;
pub mod state;
pub mod types;
pub mod usage;

pub use router::{create_router, create_router_with_state};
pub use state::AppState;
