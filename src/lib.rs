//! Pure reporting engine for gym-chain management data: aggregates member,
//! payment, attendance, and training-session collections over inclusive
//! calendar-date windows into an ordered, renderer-agnostic report document.
//!
//! The engine is stateless — every report is a pure function of the input
//! collections and the report parameters. Loosely-linked records (foreign
//! keys that may be a bare id or an embedded object, dates in several
//! formats, two field-naming conventions) are normalized at the edges so
//! the aggregation core stays simple.

pub mod compare;
pub mod date_util;
pub mod error;
pub mod input;
pub mod link;
pub mod metrics;
pub mod model;
pub mod range;
pub mod report;
pub mod sections;

pub use compare::{compare, growth, Comparison, Delta};
pub use error::{Error, Result};
pub use link::{EntityIndex, Identified, RecordRef};
pub use metrics::{Aggregate, DurationAggregate, GroupAggregate};
pub use range::{DateRange, Timestamped};
pub use report::{assemble, sanitize_title, AssembleOptions, Cell, Report, Row, Section};
pub use sections::{build_report, Collections, ReportParams, SectionSelection};
