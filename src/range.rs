use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::Serialize;

use crate::date_util::{end_of_day, last_day_of_month};
use crate::error::{Error, Result};

static RE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})\.\.(\d{4}-\d{2}-\d{2})$").unwrap());
static RE_MONTH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").unwrap());
static RE_ROLLING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{1,4})[dD]$").unwrap());

/// A record with a reporting timestamp. Implementations try their candidate
/// date fields in priority order and return `None` when none parsed.
pub trait Timestamped {
    fn timestamp(&self) -> Option<NaiveDateTime>;
}

impl<T: Timestamped> Timestamped for &T {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        (**self).timestamp()
    }
}

/// An inclusive `[from, to]` calendar-day window. The upper bound covers the
/// whole day, so a same-day range captures everything up to 23:59:59.999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(Error::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Parse a range argument.
    ///
    /// Supported formats:
    /// - `2024-03-01..2024-03-31` — explicit window
    /// - `2024-03-01` — a single day
    /// - `2024-03` — a whole month
    /// - `30d` — the last N days, ending today
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some(caps) = RE_SPAN.captures(s) {
            let from = parse_day(&caps[1])?;
            let to = parse_day(&caps[2])?;
            return Self::new(from, to);
        }

        if let Some(caps) = RE_MONTH.captures(s) {
            let year: i32 = caps[1].parse().unwrap();
            let month: u32 = caps[2].parse().unwrap();
            if (1..=12).contains(&month) {
                let from = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
                return Self::new(from, last_day_of_month(year, month));
            }
            return Err(Error::RangeParse(format!("invalid month: {s}")));
        }

        if let Some(caps) = RE_ROLLING.captures(s) {
            let days: i64 = caps[1].parse().unwrap();
            if days >= 1 {
                let today = chrono::Local::now().date_naive();
                return Self::new(today - Duration::days(days - 1), today);
            }
            return Err(Error::RangeParse(format!("rolling window must be at least 1 day: {s}")));
        }

        if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Self::new(day, day);
        }

        Err(Error::RangeParse(format!("unrecognized range: {s}")))
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.from.and_time(NaiveTime::MIN) && ts <= end_of_day(self.to)
    }

    pub fn label(&self) -> String {
        format!("{}..{}", self.from, self.to)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| Error::RangeParse(format!("invalid date: {s}")))
}

/// Select the records whose timestamp falls inside the window. Records with
/// no parseable date are excluded, by policy, not included by default. Input
/// order is preserved and nothing is mutated.
pub fn filter_by_range<'a, T: Timestamped>(records: &'a [T], range: &DateRange) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| record.timestamp().is_some_and(|ts| range.contains(ts)))
        .collect()
}
