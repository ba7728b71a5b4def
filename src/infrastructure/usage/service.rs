//! Usage reporting service

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::usage::{
    itemize, summarize_day, summarize_range, DailyUsageSummary, DateRange, ItemUsageDetail,
    UsageRecord, UsageReport, UsageSource,
};

/// Trait for usage reporting
///
/// Reports never fail: an unavailable source yields an empty report.
#[async_trait]
pub trait UsageServiceTrait: Send + Sync + Debug {
    /// Aggregated usage over an inclusive range
    async fn report(&self, range: &DateRange) -> UsageReport;

    /// Aggregated usage for one day
    async fn daily(&self, date: NaiveDate) -> DailyUsageSummary;

    /// Per-item usage with one dated line per sale
    async fn details(&self, range: &DateRange) -> Vec<ItemUsageDetail>;
}

/// Usage reporting service over a usage source
#[derive(Debug)]
pub struct UsageService<U: UsageSource> {
    source: Arc<U>,
}

impl<U: UsageSource> UsageService<U> {
    pub fn new(source: Arc<U>) -> Self {
        Self { source }
    }

    async fn fetch(&self, range: &DateRange) -> Vec<UsageRecord> {
        match self.source.fetch_usage(range).await {
            Ok(records) => {
                debug!(range = %range, rows = records.len(), "Loaded usage rows");
                records
            }
            Err(e) => {
                warn!(range = %range, error = %e, "Failed to fetch usage, reporting empty result");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl<U: UsageSource + Debug + 'static> UsageServiceTrait for UsageService<U> {
    async fn report(&self, range: &DateRange) -> UsageReport {
        let records = self.fetch(range).await;
        summarize_range(range.start(), range.end(), &records)
    }

    async fn daily(&self, date: NaiveDate) -> DailyUsageSummary {
        let records = self.fetch(&DateRange::single_day(date)).await;
        summarize_day(date, &records)
    }

    async fn details(&self, range: &DateRange) -> Vec<ItemUsageDetail> {
        let records = self.fetch(range).await;
        itemize(&records)
    }
}
