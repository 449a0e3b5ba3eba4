use serde::Serialize;

use crate::report::parser::{self, ParsedReport};
use crate::report::violation::{self, DisplayRow};

/// How a report is displayed. Decided once per payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReportMode {
    /// Searchable table of violation rows
    Table,
    /// YAML dump of the row collection
    StructuredText,
    /// The decoded text, shown as is
    RawString,
}

impl ReportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportMode::Table => "Table",
            ReportMode::StructuredText => "StructuredText",
            ReportMode::RawString => "RawString",
        }
    }
}

impl std::fmt::Display for ReportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The authoritative, unfiltered content of one loaded report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Dataset {
    Rows(Vec<DisplayRow>),
    Text(String),
}

impl Dataset {
    /// Number of rows, or number of characters for text
    pub fn len(&self) -> usize {
        match self {
            Dataset::Rows(rows) => rows.len(),
            Dataset::Text(text) => text.chars().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Dataset::Rows(rows) => rows.is_empty(),
            Dataset::Text(text) => text.is_empty(),
        }
    }

    pub fn rows(&self) -> &[DisplayRow] {
        match self {
            Dataset::Rows(rows) => rows,
            Dataset::Text(_) => &[],
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Dataset::Text(text) => Some(text),
            Dataset::Rows(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub mode: ReportMode,
    pub dataset: Dataset,
}

/// A table column derived from the rows of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Display label, first letter upper-cased
    pub label: String,
    /// Row key the column reads from
    pub field_name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Pick the display mode for decoded report text.
///
/// Text that is not JSON, or JSON that is not a violation report, is shown
/// raw. A violation report with rows becomes a table. A violation report with
/// no rows falls through to structured text of the empty row list; only a
/// schema mismatch, never an empty result, leads to raw text.
pub fn classify(text: &str) -> Classification {
    let raw = || Classification {
        mode: ReportMode::RawString,
        dataset: Dataset::Text(text.to_string()),
    };

    let value = match parser::parse(text) {
        ParsedReport::Structured(value) => value,
        ParsedReport::Failure(_) => return raw(),
    };

    match violation::transform(&value) {
        Ok(rows) if !rows.is_empty() => Classification {
            mode: ReportMode::Table,
            dataset: Dataset::Rows(rows),
        },
        Ok(rows) => Classification {
            mode: ReportMode::StructuredText,
            dataset: Dataset::Rows(rows),
        },
        Err(e) => {
            tracing::debug!("Not a violation report: {}", e);
            raw()
        }
    }
}

/// Distinct row keys across all rows, in first-seen order.
pub fn columns(rows: &[DisplayRow]) -> Vec<Column> {
    let mut seen: Vec<&'static str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
    }

    seen.into_iter()
        .map(|key| Column {
            label: capitalize(key),
            field_name: key.to_string(),
            kind: "text",
        })
        .collect()
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
