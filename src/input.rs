//! Lenient loading of raw JSON collections. A record that fails to parse is
//! logged and skipped — partial data never aborts a report; the worst a bad
//! record can do is go missing from one section.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::sections::Collections;

/// Deserialize an array of raw records, skipping the ones that do not parse.
pub fn parse_records<T: DeserializeOwned>(label: &str, raw: Vec<Value>) -> Vec<T> {
    let total = raw.len();
    let mut records = Vec::with_capacity(total);
    for (index, value) in raw.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("skipping {label} record {index}: {e}"),
        }
    }
    if records.len() < total {
        log::info!("loaded {}/{} {label} records", records.len(), total);
    }
    records
}

/// Read a JSON file containing an array of records.
pub fn load_records<T: DeserializeOwned>(label: &str, path: &Path) -> Result<Vec<T>> {
    let text = std::fs::read_to_string(path)?;
    let raw: Vec<Value> = serde_json::from_str(&text)?;
    Ok(parse_records(label, raw))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCollections {
    members: Vec<Value>,
    subscriptions: Vec<Value>,
    payments: Vec<Value>,
    #[serde(alias = "checkIns")]
    check_ins: Vec<Value>,
    schedules: Vec<Value>,
    packages: Vec<Value>,
}

/// Read every collection from a single JSON object
/// (`{"members": [...], "payments": [...], ...}`). Absent collections come
/// out empty; malformed records are skipped per collection.
pub fn load_collections(path: &Path) -> Result<Collections> {
    let text = std::fs::read_to_string(path)?;
    let raw: RawCollections = serde_json::from_str(&text)?;
    Ok(Collections {
        members: parse_records("member", raw.members),
        subscriptions: parse_records("subscription", raw.subscriptions),
        payments: parse_records("payment", raw.payments),
        check_ins: parse_records("check-in", raw.check_ins),
        schedules: parse_records("schedule", raw.schedules),
        packages: parse_records("package", raw.packages),
    })
}
