use serde::Serialize;

/// Count/sum/average over one filtered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub count: u64,
    pub sum: f64,
    /// `sum / count`; 0 when the collection is empty, never NaN.
    pub average: f64,
}

/// Duration totals derived from paired timestamps. Records whose derived
/// duration is 0 still count for attendance but contribute no minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DurationAggregate {
    /// All records seen, timed or not.
    pub count: u64,
    /// Records that contributed minutes.
    pub timed_count: u64,
    pub total_minutes: i64,
    /// `total_minutes / 60`, one decimal.
    pub total_hours: f64,
    /// Mean minutes over timed records, one decimal.
    pub average_minutes: f64,
}

/// One partition of a grouped aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAggregate {
    pub key: String,
    pub count: u64,
    pub sum: f64,
    pub average: f64,
}
