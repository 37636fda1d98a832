use serde::Serialize;

use crate::metrics::{aggregate, Aggregate};
use crate::range::{filter_by_range, DateRange, Timestamped};
use crate::report::Cell;

/// Scalar differences between two period aggregates. Absolute deltas are
/// always numeric (0 when there is nothing to compare); growth rates fall
/// back to "N/A" when the first period's value is 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delta {
    pub count: i64,
    pub sum: f64,
    pub count_growth: Cell,
    pub sum_growth: Cell,
}

/// The outcome of aggregating one collection over one or two windows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub range1: Aggregate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range2: Option<Aggregate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<Delta>,
}

/// Aggregate the same records over two independent windows and derive the
/// change between them. With no second window this is a plain single-period
/// aggregate. The windows may overlap or arrive in either chronological
/// order; they are contrasted exactly as the caller gave them.
pub fn compare<T: Timestamped>(
    records: &[T],
    range1: &DateRange,
    range2: Option<&DateRange>,
    extract: impl Fn(&T) -> Option<f64> + Copy,
) -> Comparison {
    let first = aggregate(&filter_by_range(records, range1), extract);

    let Some(range2) = range2 else {
        return Comparison { range1: first, range2: None, delta: None };
    };

    let second = aggregate(&filter_by_range(records, range2), extract);
    let delta = Delta {
        count: second.count as i64 - first.count as i64,
        sum: second.sum - first.sum,
        count_growth: growth(first.count as f64, second.count as f64),
        sum_growth: growth(first.sum, second.sum),
    };

    Comparison {
        range1: first,
        range2: Some(second),
        delta: Some(delta),
    }
}

/// Percentage change from `before` to `after`, two decimals with a percent
/// sign, or "N/A" when there is nothing to grow from.
pub fn growth(before: f64, after: f64) -> Cell {
    if before == 0.0 {
        Cell::NotApplicable
    } else {
        Cell::Text(format!("{:.2}%", (after - before) / before * 100.0))
    }
}
