//! Domain layer - Core business logic and entities

pub mod error;
pub mod inventory;
pub mod rate_limit;
pub mod usage;
pub mod user;

pub use error::DomainError;
pub use rate_limit::{LimitReason, RateLimitConfig, RateLimitError};
pub use usage::{
    aggregate, summarize_day, DailyUsageSummary, DateRange, UsageBreakdown, UsageItem,
    UsagePeriod, UsageRecord, UsageReport,
};
