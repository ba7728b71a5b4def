//! Usage data source trait

use async_trait::async_trait;

use super::{DateRange, UsageRecord};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Source of raw usage rows
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UsageSource: Send + Sync {
    /// Fetch the usage rows whose sale date lies in the inclusive range
    async fn fetch_usage(&self, range: &DateRange) -> Result<Vec<UsageRecord>, DomainError>;
}
