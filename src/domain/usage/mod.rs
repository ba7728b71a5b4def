//! Usage reporting domain
//!
//! Turns raw (item, meal set, date) usage rows into per-item totals with
//! per-meal-set breakdowns.

mod aggregate;
mod period;
mod record;
mod repository;

pub use aggregate::{aggregate, itemize, summarize_day, summarize_range, total_items, UsageAggregator};
pub use period::{parse_date, DateRange, UsagePeriod, DATE_FORMAT};
pub use record::{
    DailyUsageSummary, DatedUsageBreakdown, ItemUsageDetail, UsageBreakdown, UsageItem,
    UsageRecord, UsageReport,
};
pub use repository::UsageSource;

#[cfg(test)]
pub use repository::MockUsageSource;
