//! Usage report endpoints

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::usage::{
    parse_date, DailyUsageSummary, DateRange, ItemUsageDetail, UsagePeriod, UsageReport,
};

/// Create usage router
pub fn create_usage_router() -> Router<AppState> {
    Router::new()
        .route("/usage", get(usage_report))
        .route("/usage/daily", get(daily_usage))
        .route("/usage/details", get(usage_details))
}

/// Query parameters selecting a report range
///
/// An explicit `start_date`/`end_date` pair wins over `period`; with
/// neither, the report covers today.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageRangeQuery {
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl UsageRangeQuery {
    fn resolve(&self, today: NaiveDate) -> Result<DateRange, ApiError> {
        match (self.start_date.as_deref(), self.end_date.as_deref()) {
            (Some(start), Some(end)) => Ok(UsagePeriod::Custom(DateRange::new(
                parse_date_param("start_date", start)?,
                parse_date_param("end_date", end)?,
            ))
            .resolve(today)),
            (Some(_), None) => {
                Err(ApiError::bad_request("end_date is required with start_date").with_param("end_date"))
            }
            (None, Some(_)) => Err(
                ApiError::bad_request("start_date is required with end_date").with_param("start_date"),
            ),
            (None, None) => {
                let period = match self.period.as_deref() {
                    Some(value) => value
                        .parse::<UsagePeriod>()
                        .map_err(|e| ApiError::bad_request(e).with_param("period"))?,
                    None => UsagePeriod::Daily,
                };

                Ok(period.resolve(today))
            }
        }
    }
}

/// Query parameters for the daily summary
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyUsageQuery {
    /// Defaults to today
    pub date: Option<String>,
}

/// Itemized usage response
#[derive(Debug, Clone, Serialize)]
pub struct UsageDetailsResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub items: Vec<ItemUsageDetail>,
}

pub(crate) fn parse_date_param(name: &str, value: &str) -> Result<NaiveDate, ApiError> {
    parse_date(value).map_err(|_| {
        ApiError::bad_request(format!("Invalid {} '{}', expected YYYY-MM-DD", name, value))
            .with_param(name)
    })
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// GET /usage
pub async fn usage_report(
    State(state): State<AppState>,
    Query(query): Query<UsageRangeQuery>,
) -> Result<Json<UsageReport>, ApiError> {
    let range = query.resolve(today())?;
    debug!(range = %range, "Building usage report");

    Ok(Json(state.usage_service.report(&range).await))
}

/// GET /usage/daily
pub async fn daily_usage(
    State(state): State<AppState>,
    Query(query): Query<DailyUsageQuery>,
) -> Result<Json<DailyUsageSummary>, ApiError> {
    let date = match query.date.as_deref() {
        Some(value) => parse_date_param("date", value)?,
        None => today(),
    };

    Ok(Json(state.usage_service.daily(date).await))
}

/// GET /usage/details
pub async fn usage_details(
    State(state): State<AppState>,
    Query(query): Query<UsageRangeQuery>,
) -> Result<Json<UsageDetailsResponse>, ApiError> {
    let range = query.resolve(today())?;
    debug!(range = %range, "Building itemized usage");

    let items = state.usage_service.details(&range).await;

    Ok(Json(UsageDetailsResponse {
        start_date: range.start(),
        end_date: range.end(),
        items,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn query(period: Option<&str>, start: Option<&str>, end: Option<&str>) -> UsageRangeQuery {
        UsageRangeQuery {
            period: period.map(String::from),
            start_date: start.map(String::from),
            end_date: end.map(String::from),
        }
    }

    #[test]
    fn test_defaults_to_today() {
        let today = date(2024, 5, 15);
        let range = query(None, None, None).resolve(today).unwrap();

        assert_eq!(range, DateRange::single_day(today));
    }

    #[test]
    fn test_period_resolves() {
        // 2024-05-15 is a Wednesday
        let range = query(Some("weekly"), None, None)
            .resolve(date(2024, 5, 15))
            .unwrap();

        assert_eq!(range.start(), date(2024, 5, 13));
        assert_eq!(range.end(), date(2024, 5, 19));
    }

    #[test]
    fn test_explicit_range_wins_and_swaps() {
        let range = query(Some("monthly"), Some("2024-05-10"), Some("2024-05-01"))
            .resolve(date(2024, 5, 15))
            .unwrap();

        assert_eq!(range.start(), date(2024, 5, 1));
        assert_eq!(range.end(), date(2024, 5, 10));
    }

    #[test]
    fn test_half_open_range_rejected() {
        let err = query(None, Some("2024-05-01"), None)
            .resolve(date(2024, 5, 15))
            .unwrap_err();

        assert_eq!(err.response.error.param.as_deref(), Some("end_date"));
    }

    #[test]
    fn test_custom_period_needs_dates() {
        let err = query(Some("custom"), None, None)
            .resolve(date(2024, 5, 15))
            .unwrap_err();

        assert_eq!(err.response.error.param.as_deref(), Some("period"));
    }

    #[test]
    fn test_bad_inputs_rejected() {
        assert!(query(Some("yearly"), None, None).resolve(date(2024, 5, 15)).is_err());
        assert!(query(None, Some("05/01/2024"), Some("2024-05-02"))
            .resolve(date(2024, 5, 15))
            .is_err());
    }
}
