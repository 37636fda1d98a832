//! The single-pass aggregation core: counts, sums, averages, durations,
//! multi-key grouping, calendar-day and hour-of-day buckets, Top-N rankings,
//! and guarded rate computation.

pub mod types;

pub use types::*;

use std::collections::{BTreeMap, HashMap};

use chrono::Timelike;

use crate::range::Timestamped;
use crate::report::Cell;

/// Count, sum, and average a collection in one pass. The extractor may
/// decline a record (`None`), in which case it still counts but contributes
/// nothing to the sum.
pub fn aggregate<T>(records: &[&T], extract: impl Fn(&T) -> Option<f64>) -> Aggregate {
    let count = records.len() as u64;
    let mut sum = 0.0;
    for &record in records {
        if let Some(value) = extract(record) {
            sum += value;
        }
    }
    let average = if count == 0 { 0.0 } else { sum / count as f64 };
    Aggregate { count, sum, average }
}

/// Duration aggregation: a record with 0 derived minutes counts for
/// attendance but is excluded from the minute totals and the average.
pub fn duration_aggregate<T>(records: &[&T], minutes: impl Fn(&T) -> i64) -> DurationAggregate {
    let mut agg = DurationAggregate {
        count: records.len() as u64,
        ..Default::default()
    };
    for &record in records {
        let m = minutes(record);
        if m > 0 {
            agg.timed_count += 1;
            agg.total_minutes += m;
        }
    }
    agg.total_hours = round1(agg.total_minutes as f64 / 60.0);
    agg.average_minutes = if agg.timed_count == 0 {
        0.0
    } else {
        round1(agg.total_minutes as f64 / agg.timed_count as f64)
    };
    agg
}

/// Partition records by a derived key and aggregate each partition. Groups
/// come back in first-occurrence order.
pub fn aggregate_by<T>(
    records: &[&T],
    key_fn: impl Fn(&T) -> String,
    extract: impl Fn(&T) -> Option<f64>,
) -> Vec<GroupAggregate> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (u64, f64)> = HashMap::new();
    for &record in records {
        let key = key_fn(record);
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        let entry = groups.entry(key).or_insert((0, 0.0));
        entry.0 += 1;
        if let Some(value) = extract(record) {
            entry.1 += value;
        }
    }
    order
        .into_iter()
        .map(|key| {
            let (count, sum) = groups[&key];
            GroupAggregate {
                key,
                count,
                sum,
                average: if count == 0 { 0.0 } else { sum / count as f64 },
            }
        })
        .collect()
}

/// Bucket by the date portion only, so two timestamps on the same day merge.
/// Days come back oldest first.
pub fn group_by_day<T: Timestamped>(
    records: &[&T],
    extract: impl Fn(&T) -> Option<f64>,
) -> Vec<GroupAggregate> {
    let mut days: BTreeMap<chrono::NaiveDate, (u64, f64)> = BTreeMap::new();
    for &record in records {
        let Some(ts) = record.timestamp() else {
            continue;
        };
        let entry = days.entry(ts.date()).or_insert((0, 0.0));
        entry.0 += 1;
        if let Some(value) = extract(record) {
            entry.1 += value;
        }
    }
    days.into_iter()
        .map(|(day, (count, sum))| GroupAggregate {
            key: day.format("%Y-%m-%d").to_string(),
            count,
            sum,
            average: if count == 0 { 0.0 } else { sum / count as f64 },
        })
        .collect()
}

/// Day-independent activity histogram: 24 bins keyed by the hour component
/// alone. Unlike Top-N lists, hour buckets are always chronological — the
/// result is indexed 0-23 regardless of first-occurrence order.
pub fn group_by_hour<T: Timestamped>(records: &[&T]) -> [u64; 24] {
    let mut bins = [0u64; 24];
    for &record in records {
        if let Some(ts) = record.timestamp() {
            bins[ts.hour() as usize] += 1;
        }
    }
    bins
}

/// Tally records by an optional derived key, in first-occurrence order.
/// Records whose key cannot be derived are skipped.
pub fn count_by<T>(records: &[&T], key_fn: impl Fn(&T) -> Option<String>) -> Vec<(String, u64)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();
    for &record in records {
        let Some(key) = key_fn(record) else {
            continue;
        };
        if !counts.contains_key(&key) {
            order.push(key.clone());
        }
        *counts.entry(key).or_insert(0) += 1;
    }
    order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            (key, count)
        })
        .collect()
}

/// The top `n` entries by count, descending; ties keep their incoming order.
pub fn top_n(counts: Vec<(String, u64)>, n: usize) -> Vec<(String, u64)> {
    let mut ranked = counts;
    ranked.sort_by(|a, b| b.1.cmp(&a.1)); // stable, so ties stay put
    ranked.truncate(n);
    ranked
}

/// Percentage-of-total to one decimal. A zero denominator yields the "N/A"
/// cell — aggregate sheets mix numeric and not-applicable values in the same
/// column, and renderers pattern-match rather than string-sniff.
pub fn percentage(part: f64, whole: f64) -> Cell {
    if whole == 0.0 {
        Cell::NotApplicable
    } else {
        Cell::Float(round1(part / whole * 100.0))
    }
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
