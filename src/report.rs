//! The renderer-agnostic report document: ordered sections of ordered rows.
//! No formatting, colors, or fonts here — those belong to whatever renders
//! the report downstream.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Spreadsheet tab names cap out at 31 characters.
pub const MAX_TITLE_LEN: usize = 31;

const TITLE_BAD_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// One value in a report row. `NotApplicable` is a first-class marker, so
/// renderers and tests can pattern-match instead of string-sniffing a column
/// that mixes numbers and "N/A".
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    NotApplicable,
}

impl Cell {
    pub fn is_na(&self) -> bool {
        matches!(self, Cell::NotApplicable)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(n) => write!(f, "{n}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::NotApplicable => write!(f, "N/A"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Int(n) => serializer.serialize_i64(*n),
            Cell::Float(v) => serializer.serialize_f64(*v),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Int(n)
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        Cell::Int(n as i64)
    }
}

impl From<usize> for Cell {
    fn from(n: usize) -> Self {
        Cell::Int(n as i64)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// Ordered field → value pairs. Serializes as a JSON object in insertion
/// order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, Cell)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: impl Into<Cell>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, cell)| cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Cell)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, cell) in &self.fields {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

/// One named table ("sheet") of rows within a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub rows: Vec<Row>,
    /// Column-width hints for renderers that can use them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<Vec<u16>>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
            column_widths: None,
        }
    }

    pub fn with_column_widths(mut self, widths: Vec<u16>) -> Self {
        self.column_widths = Some(widths);
        self
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }
}

/// The assembled document: sections in exactly the order they were
/// submitted. Two reports with identical sections compare equal however
/// they will eventually be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub sections: Vec<Section>,
}

/// How assembly treats section titles.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Apply the spreadsheet tab-name constraints. A renderer without the
    /// 31-character limit can switch this off.
    pub sanitize_titles: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self { sanitize_titles: true }
    }
}

/// Make a section title safe for spreadsheet tabs: the characters
/// `: \ / ? * [ ]` become `_` and the result is truncated to 31 characters.
/// Violations are corrected silently; this is a cosmetic constraint of a
/// downstream renderer, not an error.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if TITLE_BAD_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_TITLE_LEN)
        .collect()
}

/// Compose sections into one ordered document. Section and row order are
/// preserved exactly; nothing is re-sorted.
pub fn assemble(sections: Vec<Section>, options: &AssembleOptions) -> Report {
    let sections = if options.sanitize_titles {
        sections
            .into_iter()
            .map(|mut section| {
                section.title = sanitize_title(&section.title);
                section
            })
            .collect()
    } else {
        sections
    };
    Report { sections }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_and_truncates() {
        let title = "CheckIn_01/03/24_31/03/24_extra_long_tail";
        let clean = sanitize_title(title);
        assert!(clean.chars().count() <= MAX_TITLE_LEN);
        assert!(!clean.contains(['/', ':', '\\', '?', '*', '[', ']']));
        assert_eq!(clean, "CheckIn_01_03_24_31_03_24_extra");
    }

    #[test]
    fn sanitize_leaves_short_clean_titles_alone() {
        assert_eq!(sanitize_title("Revenue"), "Revenue");
    }

    #[test]
    fn assemble_can_skip_sanitizing() {
        let sections = vec![Section::new("A/B")];
        let kept = assemble(sections.clone(), &AssembleOptions { sanitize_titles: false });
        assert_eq!(kept.sections[0].title, "A/B");
        let cleaned = assemble(sections, &AssembleOptions::default());
        assert_eq!(cleaned.sections[0].title, "A_B");
    }

    #[test]
    fn cell_serializes_na_as_string() {
        let row = Row::new()
            .field("Metric", "Completion rate")
            .field("Value", Cell::NotApplicable);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"Metric":"Completion rate","Value":"N/A"}"#);
    }

    #[test]
    fn row_preserves_insertion_order() {
        let row = Row::new().field("b", 1i64).field("a", 2i64).field("c", 3i64);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"b":1,"a":2,"c":3}"#);
    }

    #[test]
    fn reports_with_identical_sections_are_equal() {
        let build = || {
            let mut section = Section::new("Revenue").with_column_widths(vec![30, 12]);
            section.push(Row::new().field("Metric", "Total revenue").field("Value", 300.0));
            assemble(vec![section], &AssembleOptions::default())
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn section_order_is_preserved() {
        let report = assemble(
            vec![Section::new("Zed"), Section::new("Alpha")],
            &AssembleOptions::default(),
        );
        let titles: Vec<&str> = report.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Zed", "Alpha"]);
    }
}
