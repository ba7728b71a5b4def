//! Usage aggregation by item and meal set

use chrono::NaiveDate;
use indexmap::IndexMap;

use super::record::{
    DailyUsageSummary, DatedUsageBreakdown, ItemUsageDetail, UsageBreakdown, UsageItem,
    UsageRecord, UsageReport,
};

#[derive(Debug, Default)]
struct ItemAccumulator {
    total_used: i64,
    breakdown: IndexMap<String, BreakdownAccumulator>,
}

#[derive(Debug, Default)]
struct BreakdownAccumulator {
    meals_sold: i64,
    items_per_meal: i64,
    total: i64,
}

/// Incremental usage aggregation
///
/// Items come out in the order their names were first seen, and each item's
/// breakdown in the order its meal sets were first seen. When several
/// records share an (item, meal set) pair, the last `items_per_meal` wins.
#[derive(Debug, Default)]
pub struct UsageAggregator {
    items: IndexMap<String, ItemAccumulator>,
}

impl UsageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the running totals
    pub fn add(&mut self, record: &UsageRecord) {
        let item = self.items.entry(record.item_name.clone()).or_default();
        item.total_used = item.total_used.saturating_add(record.total_used);

        let breakdown = item
            .breakdown
            .entry(record.meal_set_name.clone())
            .or_default();
        breakdown.meals_sold = breakdown.meals_sold.saturating_add(record.meals_sold);
        breakdown.total = breakdown.total.saturating_add(record.total_used);
        breakdown.items_per_meal = record.items_per_meal;
    }

    /// Number of distinct items seen so far
    pub fn unique_items(&self) -> usize {
        self.items.len()
    }

    pub fn finish(self) -> Vec<UsageItem> {
        self.items
            .into_iter()
            .map(|(item_name, item)| UsageItem {
                item_name,
                total_used: item.total_used,
                breakdown: item
                    .breakdown
                    .into_iter()
                    .map(|(meal_set_name, b)| UsageBreakdown {
                        meal_set_name,
                        meals_sold: b.meals_sold,
                        items_per_meal: b.items_per_meal,
                        total: b.total,
                    })
                    .collect(),
            })
            .collect()
    }
}

impl<'a> Extend<&'a UsageRecord> for UsageAggregator {
    fn extend<T: IntoIterator<Item = &'a UsageRecord>>(&mut self, records: T) {
        for record in records {
            self.add(record);
        }
    }
}

/// Group records into per-item totals with per-meal-set breakdowns
pub fn aggregate<'a, I>(records: I) -> Vec<UsageItem>
where
    I: IntoIterator<Item = &'a UsageRecord>,
{
    let mut aggregator = UsageAggregator::new();
    aggregator.extend(records);
    aggregator.finish()
}

/// Sum of `total_used` over aggregated items
pub fn total_items(items: &[UsageItem]) -> i64 {
    items
        .iter()
        .fold(0i64, |sum, item| sum.saturating_add(item.total_used))
}

/// Summarize the records of a single day
pub fn summarize_day<'a, I>(date: NaiveDate, records: I) -> DailyUsageSummary
where
    I: IntoIterator<Item = &'a UsageRecord>,
{
    let items = aggregate(records);

    DailyUsageSummary {
        date,
        total_items: total_items(&items),
        unique_items: items.len(),
        items,
    }
}

/// Summarize the records of an inclusive date range
pub fn summarize_range<'a, I>(start_date: NaiveDate, end_date: NaiveDate, records: I) -> UsageReport
where
    I: IntoIterator<Item = &'a UsageRecord>,
{
    let items = aggregate(records);

    UsageReport {
        start_date,
        end_date,
        total_items: total_items(&items),
        unique_items: items.len(),
        items,
    }
}

/// Group records by item, keeping one dated breakdown line per record
pub fn itemize<'a, I>(records: I) -> Vec<ItemUsageDetail>
where
    I: IntoIterator<Item = &'a UsageRecord>,
{
    let mut groups: IndexMap<String, (i64, Vec<DatedUsageBreakdown>)> = IndexMap::new();

    for record in records {
        let (total, lines) = groups.entry(record.item_name.clone()).or_default();
        *total = total.saturating_add(record.total_used);
        lines.push(DatedUsageBreakdown {
            meal_set_name: record.meal_set_name.clone(),
            meals_sold: record.meals_sold,
            items_per_meal: record.items_per_meal,
            total: record.total_used,
            sale_date: record.sale_date,
        });
    }

    groups
        .into_iter()
        .map(|(item_name, (total_used, breakdown))| ItemUsageDetail {
            item_name,
            total_used,
            breakdown,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn record(item: &str, set: &str, per_meal: i64, sold: i64) -> UsageRecord {
        UsageRecord::new(day(1), item, set, per_meal, sold)
    }

    #[test]
    fn test_aggregate_wing_example() {
        let records = vec![
            record("Wing", "Combo A", 2, 3),
            record("Wing", "Combo B", 1, 4),
        ];

        let items = aggregate(&records);

        assert_eq!(
            items,
            vec![UsageItem {
                item_name: "Wing".to_string(),
                total_used: 10,
                breakdown: vec![
                    UsageBreakdown {
                        meal_set_name: "Combo A".to_string(),
                        meals_sold: 3,
                        items_per_meal: 2,
                        total: 6,
                    },
                    UsageBreakdown {
                        meal_set_name: "Combo B".to_string(),
                        meals_sold: 4,
                        items_per_meal: 1,
                        total: 4,
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_aggregate_empty() {
        let items = aggregate(&Vec::<UsageRecord>::new());
        assert!(items.is_empty());

        let summary = summarize_day(day(1), &Vec::<UsageRecord>::new());
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.unique_items, 0);
        assert!(summary.items.is_empty());
    }

    #[test]
    fn test_aggregate_preserves_first_seen_order() {
        let records = vec![
            record("Thigh", "Combo A", 1, 1),
            record("Coleslaw", "Combo A", 1, 1),
            record("Biscuit", "Combo B", 1, 1),
            record("Coleslaw", "Combo B", 1, 1),
        ];

        let names: Vec<String> = aggregate(&records)
            .into_iter()
            .map(|i| i.item_name)
            .collect();

        assert_eq!(names, vec!["Thigh", "Coleslaw", "Biscuit"]);
    }

    #[test]
    fn test_aggregate_merges_same_meal_set_across_days() {
        let records = vec![
            UsageRecord::new(day(1), "Wing", "Combo A", 2, 3),
            UsageRecord::new(day(2), "Wing", "Combo B", 1, 1),
            UsageRecord::new(day(3), "Wing", "Combo A", 2, 5),
        ];

        let items = aggregate(&records);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].total_used, 17);
        assert_eq!(items[0].breakdown.len(), 2);
        assert_eq!(items[0].breakdown[0].meal_set_name, "Combo A");
        assert_eq!(items[0].breakdown[0].meals_sold, 8);
        assert_eq!(items[0].breakdown[0].total, 16);
    }

    #[test]
    fn test_breakdown_keeps_first_seen_meal_set_order() {
        let records = vec![
            record("Wing", "Family Bucket", 8, 1),
            record("Wing", "Combo A", 2, 1),
            record("Wing", "Family Bucket", 8, 2),
        ];

        let sets: Vec<String> = aggregate(&records)[0]
            .breakdown
            .iter()
            .map(|b| b.meal_set_name.clone())
            .collect();

        assert_eq!(sets, vec!["Family Bucket", "Combo A"]);
    }

    #[test]
    fn test_aggregate_last_items_per_meal_wins() {
        let records = vec![
            record("Wing", "Combo A", 2, 1),
            record("Wing", "Combo A", 3, 1),
        ];

        let items = aggregate(&records);
        assert_eq!(items[0].breakdown[0].items_per_meal, 3);
        assert_eq!(items[0].breakdown[0].total, 5);
    }

    #[test]
    fn test_aggregate_conserves_totals() {
        let records = vec![
            record("Wing", "Combo A", 2, 3),
            record("Thigh", "Combo A", 1, 3),
            record("Wing", "Bucket", 8, 2),
            record("wing", "Bucket", 8, 1),
            record("Thigh", "Bucket", 4, 2).with_total_used(9),
            record("Biscuit", "Combo C", 1, 0),
        ];

        let items = aggregate(&records);
        let input_total: i64 = records.iter().map(|r| r.total_used).sum();
        let output_total: i64 = items.iter().map(|i| i.total_used).sum();

        assert_eq!(input_total, output_total);
        assert_eq!(items.len(), 4);

        for item in &items {
            let breakdown_total: i64 = item.breakdown.iter().map(|b| b.total).sum();
            assert_eq!(item.total_used, breakdown_total);
        }
    }

    #[test]
    fn test_aggregate_accepts_negative_values() {
        let records = vec![
            record("Wing", "Combo A", 2, 3),
            record("Wing", "Combo A", 2, -1),
        ];

        let items = aggregate(&records);
        assert_eq!(items[0].total_used, 4);
        assert_eq!(items[0].breakdown[0].meals_sold, 2);
    }

    #[test]
    fn test_summarize_day() {
        let records = vec![
            record("Wing", "Combo A", 2, 3),
            record("Thigh", "Combo A", 1, 3),
            record("Wing", "Combo B", 1, 4),
        ];

        let summary = summarize_day(day(1), &records);

        assert_eq!(summary.date, day(1));
        assert_eq!(summary.total_items, 13);
        assert_eq!(summary.unique_items, 2);
    }

    #[test]
    fn test_summarize_range() {
        let records = vec![
            UsageRecord::new(day(1), "Wing", "Combo A", 2, 3),
            UsageRecord::new(day(4), "Thigh", "Combo A", 1, 3),
        ];

        let report = summarize_range(day(1), day(7), &records);

        assert_eq!(report.start_date, day(1));
        assert_eq!(report.end_date, day(7));
        assert_eq!(report.total_items, 9);
        assert_eq!(report.unique_items, 2);
    }

    #[test]
    fn test_itemize_keeps_dated_lines() {
        let records = vec![
            UsageRecord::new(day(1), "Wing", "Combo A", 2, 3),
            UsageRecord::new(day(2), "Thigh", "Combo A", 1, 1),
            UsageRecord::new(day(2), "Wing", "Combo A", 2, 1),
        ];

        let details = itemize(&records);

        assert_eq!(details.len(), 2);
        assert_eq!(details[0].item_name, "Wing");
        assert_eq!(details[0].total_used, 8);
        assert_eq!(details[0].breakdown.len(), 2);
        assert_eq!(details[0].breakdown[0].sale_date, day(1));
        assert_eq!(details[0].breakdown[1].sale_date, day(2));
    }

    #[test]
    fn test_aggregator_streams_records() {
        let mut aggregator = UsageAggregator::new();
        aggregator.add(&record("Wing", "Combo A", 2, 3));
        aggregator.add(&record("Thigh", "Combo A", 1, 3));

        assert_eq!(aggregator.unique_items(), 2);
        assert_eq!(total_items(&aggregator.finish()), 9);
    }
}
