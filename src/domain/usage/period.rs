//! Report date ranges

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Format used for report dates on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive range of sale dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range; a reversed pair is swapped
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}..={}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

/// Preset report periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsagePeriod {
    /// Today only
    Daily,
    /// Monday through Sunday of the current week
    Weekly,
    /// First through last day of the current month
    Monthly,
    /// An explicit inclusive range
    Custom(DateRange),
}

impl UsagePeriod {
    /// Resolve the period against `today`
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match self {
            Self::Daily => DateRange::single_day(today),
            Self::Weekly => {
                let offset = u64::from(today.weekday().num_days_from_monday());
                let start = today - Days::new(offset);
                let end = start + Days::new(6);
                DateRange::new(start, end)
            }
            Self::Monthly => {
                let start = today.with_day(1).unwrap_or(today);
                let end = (start + Months::new(1))
                    .pred_opt()
                    .unwrap_or(today);
                DateRange::new(start, end)
            }
            Self::Custom(range) => *range,
        }
    }
}

impl std::fmt::Display for UsagePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Custom(range) => write!(f, "custom {}", range),
        }
    }
}

impl std::str::FromStr for UsagePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "today" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "custom" => Err("A custom period needs start_date and end_date".to_string()),
            other => Err(format!("Unknown usage period '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_swaps_reversed_bounds() {
        let range = DateRange::new(date(2024, 3, 10), date(2024, 3, 1));

        assert_eq!(range.start(), date(2024, 3, 1));
        assert_eq!(range.end(), date(2024, 3, 10));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let range = DateRange::new(
            parse_date("2024-03-01").unwrap(),
            parse_date("2024-03-07").unwrap(),
        );

        assert!(range.contains(date(2024, 3, 1)));
        assert!(range.contains(date(2024, 3, 7)));
        assert!(!range.contains(date(2024, 3, 8)));
        assert!(!range.contains(date(2024, 2, 29)));
    }

    #[test]
    fn test_parse_rejects_bad_dates() {
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("03/01/2024").is_err());
    }

    #[test]
    fn test_weekly_starts_on_monday() {
        // 2024-03-14 is a Thursday
        let range = UsagePeriod::Weekly.resolve(date(2024, 3, 14));

        assert_eq!(range.start(), date(2024, 3, 11));
        assert_eq!(range.end(), date(2024, 3, 17));
    }

    #[test]
    fn test_weekly_on_sunday() {
        let range = UsagePeriod::Weekly.resolve(date(2024, 3, 17));

        assert_eq!(range.start(), date(2024, 3, 11));
        assert_eq!(range.end(), date(2024, 3, 17));
    }

    #[test]
    fn test_monthly_covers_whole_month() {
        let range = UsagePeriod::Monthly.resolve(date(2024, 2, 14));

        assert_eq!(range.start(), date(2024, 2, 1));
        assert_eq!(range.end(), date(2024, 2, 29));
    }

    #[test]
    fn test_daily_is_single_day() {
        let range = UsagePeriod::Daily.resolve(date(2024, 2, 14));
        assert_eq!(range, DateRange::single_day(date(2024, 2, 14)));
    }

    #[test]
    fn test_custom_resolves_to_its_range() {
        let range = DateRange::new(date(2024, 1, 5), date(2024, 1, 20));
        let period = UsagePeriod::Custom(range);

        assert_eq!(period.resolve(date(2024, 6, 1)), range);
        assert_eq!(period.to_string(), "custom 2024-01-05..=2024-01-20");
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("weekly".parse::<UsagePeriod>(), Ok(UsagePeriod::Weekly));
        assert_eq!("Month".parse::<UsagePeriod>(), Ok(UsagePeriod::Monthly));
        assert!("yearly".parse::<UsagePeriod>().is_err());
        assert!("custom".parse::<UsagePeriod>().is_err());
    }

    #[test]
    fn test_display() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 7));
        assert_eq!(range.to_string(), "2024-03-01..=2024-03-07");
    }
}
