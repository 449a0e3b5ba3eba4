//! Viewer for flow scanner reports.
//!
//! A report arrives as a base64 payload. It is decoded, parsed and classified
//! into one of three display modes: a searchable table of violations, a YAML
//! dump, or the raw text.

pub mod config;
pub mod decode;
pub mod engine;
pub mod report;

pub use engine::ResultView;
pub use report::classify::{classify, Classification, Dataset, ReportMode};
pub use report::search::filter;
pub use report::violation::{transform, DisplayRow, TransformError, ViolationRecord};
