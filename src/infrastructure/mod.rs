//! Infrastructure layer - in-memory stores, services and adapters

pub mod inventory;
pub mod logging;
pub mod rate_limit;
pub mod usage;
pub mod user;
