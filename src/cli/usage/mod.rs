//! Usage command - offline report over exported usage records

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Args;

use crate::api::usage::UsageDetailsResponse;
use crate::domain::usage::{itemize, summarize_day, summarize_range, DateRange, UsageRecord};

/// Arguments for the usage command
#[derive(Args, Clone, Debug)]
pub struct UsageArgs {
    /// JSON file holding an array of usage records
    #[arg(long)]
    pub file: PathBuf,

    /// First day of the report (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Last day of the report (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,

    /// Summarize a single day instead of a range
    #[arg(long, conflicts_with_all = ["start", "end", "details"])]
    pub daily: Option<NaiveDate>,

    /// Keep one dated line per record instead of merging by meal set
    #[arg(long)]
    pub details: bool,
}

/// Run the usage command
pub async fn run(args: UsageArgs) -> anyhow::Result<()> {
    let records = load_records(&args.file).await?;
    let report = build_report(&args, &records)?;

    println!("{}", report);

    Ok(())
}

async fn load_records(path: &Path) -> anyhow::Result<Vec<UsageRecord>> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_slice(&raw)
        .with_context(|| format!("{} is not a JSON array of usage records", path.display()))
}

fn build_report(args: &UsageArgs, records: &[UsageRecord]) -> anyhow::Result<String> {
    if let Some(date) = args.daily {
        let day = records.iter().filter(|r| r.sale_date == date);
        return Ok(serde_json::to_string_pretty(&summarize_day(date, day))?);
    }

    let range = match (args.start, args.end) {
        (Some(start), Some(end)) => DateRange::new(start, end),
        _ => span(records),
    };

    let in_range = records.iter().filter(|r| range.contains(r.sale_date));

    let output = if args.details {
        serde_json::to_string_pretty(&UsageDetailsResponse {
            start_date: range.start(),
            end_date: range.end(),
            items: itemize(in_range),
        })?
    } else {
        serde_json::to_string_pretty(&summarize_range(range.start(), range.end(), in_range))?
    };

    Ok(output)
}

/// Range covering every record, or today when there are none
fn span(records: &[UsageRecord]) -> DateRange {
    let dates = records.iter().map(|r| r.sale_date);

    match (dates.clone().min(), dates.max()) {
        (Some(start), Some(end)) => DateRange::new(start, end),
        _ => DateRange::single_day(Utc::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn args() -> UsageArgs {
        UsageArgs {
            file: PathBuf::from("usage.json"),
            start: None,
            end: None,
            daily: None,
            details: false,
        }
    }

    fn records() -> Vec<UsageRecord> {
        vec![
            UsageRecord::new(date(1), "Wing", "Combo A", 2, 3),
            UsageRecord::new(date(3), "Wing", "Combo A", 2, 1),
            UsageRecord::new(date(3), "Drink", "Combo A", 1, 1),
        ]
    }

    #[test]
    fn test_report_spans_all_records() {
        let output = build_report(&args(), &records()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["start_date"], "2024-05-01");
        assert_eq!(value["end_date"], "2024-05-03");
        assert_eq!(value["total_items"], 9);
        assert_eq!(value["unique_items"], 2);
    }

    #[test]
    fn test_report_filters_range() {
        let mut args = args();
        args.start = Some(date(2));
        args.end = Some(date(5));

        let output = build_report(&args, &records()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["total_items"], 3);
    }

    #[test]
    fn test_daily_report() {
        let mut args = args();
        args.daily = Some(date(1));

        let output = build_report(&args, &records()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["date"], "2024-05-01");
        assert_eq!(value["total_items"], 6);
    }

    #[test]
    fn test_details_report() {
        let mut args = args();
        args.details = true;

        let output = build_report(&args, &records()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["items"][0]["item_name"], "Wing");
        assert_eq!(value["items"][0]["breakdown"][1]["sale_date"], "2024-05-03");
    }

    #[test]
    fn test_empty_input_covers_today() {
        let range = span(&[]);
        assert_eq!(range.start(), range.end());
    }
}
