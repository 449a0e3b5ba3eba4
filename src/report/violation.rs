use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Column labels of a display row, in display order.
pub const ROW_KEYS: [&str; 8] = [
    "Flow Name",
    "API Name",
    "Flow Type",
    "severity",
    "rule",
    "Rule Description",
    "type",
    "metaType",
];

/// The parsed value does not have the shape of a violation report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("report has no `result` object")]
    MissingResult,

    #[error("report has no `result.results` field")]
    MissingResults,

    #[error("`result.results` is not a list (found {0})")]
    ResultsNotSequence(&'static str),

    #[error("violation #{0} is null")]
    NullRecord(usize),
}

/// A single finding as the flow scanner reports it.
///
/// Every attribute is optional: producers omit fields freely and the viewer
/// must not invent values for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRecord {
    #[serde(default)]
    pub flow_name: Option<Value>,
    /// API name of the flow element
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub flow_type: Option<Value>,
    #[serde(default)]
    pub severity: Option<Value>,
    #[serde(default)]
    pub rule: Option<Value>,
    #[serde(default)]
    pub rule_description: Option<Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    #[serde(default)]
    pub meta_type: Option<Value>,
}

/// One flattened table row.
///
/// All eight columns are always present. `None` is the empty cell: the
/// source record did not carry the field, or carried `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    #[serde(rename = "Flow Name")]
    pub flow_name: Option<String>,
    #[serde(rename = "API Name")]
    pub api_name: Option<String>,
    #[serde(rename = "Flow Type")]
    pub flow_type: Option<String>,
    pub severity: Option<String>,
    pub rule: Option<String>,
    #[serde(rename = "Rule Description")]
    pub rule_description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(rename = "metaType")]
    pub meta_type: Option<String>,
}

impl DisplayRow {
    /// Column labels present in this row, in display order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        ROW_KEYS.into_iter()
    }

    /// Look up a cell by its column label
    pub fn get(&self, key: &str) -> Option<&str> {
        let cell = match key {
            "Flow Name" => &self.flow_name,
            "API Name" => &self.api_name,
            "Flow Type" => &self.flow_type,
            "severity" => &self.severity,
            "rule" => &self.rule,
            "Rule Description" => &self.rule_description,
            "type" => &self.kind,
            "metaType" => &self.meta_type,
            _ => return None,
        };
        cell.as_deref()
    }

    /// `(label, cell)` pairs in display order
    pub fn cells(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        self.keys().map(move |key| (key, self.get(key)))
    }
}

impl From<&ViolationRecord> for DisplayRow {
    fn from(v: &ViolationRecord) -> Self {
        DisplayRow {
            flow_name: cell_text(v.flow_name.as_ref()),
            api_name: cell_text(v.name.as_ref()),
            flow_type: cell_text(v.flow_type.as_ref()),
            severity: cell_text(v.severity.as_ref()),
            rule: cell_text(v.rule.as_ref()),
            rule_description: cell_text(v.rule_description.as_ref()),
            kind: cell_text(v.kind.as_ref()),
            meta_type: cell_text(v.meta_type.as_ref()),
        }
    }
}

/// Coerce a field value to cell text. Strings are copied verbatim; `null`
/// is the empty cell; anything else keeps its compact JSON form.
fn cell_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Flatten a parsed scanner report into display rows.
///
/// The report must expose `result.results` as a list. Each object in the list
/// becomes exactly one row, in source order. A `null` entry makes the whole
/// report unusable as a table; other non-object entries yield a row of
/// empty cells.
pub fn transform(parsed: &Value) -> Result<Vec<DisplayRow>, TransformError> {
    let result = match parsed.get("result") {
        Some(Value::Null) | None => return Err(TransformError::MissingResult),
        Some(result) => result,
    };

    let violations = match result.get("results") {
        None => return Err(TransformError::MissingResults),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(TransformError::ResultsNotSequence(json_kind(other))),
    };

    violations
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let record = match item {
                Value::Null => return Err(TransformError::NullRecord(index)),
                Value::Object(_) => {
                    ViolationRecord::deserialize(item).unwrap_or_default()
                }
                _ => ViolationRecord::default(),
            };
            Ok(DisplayRow::from(&record))
        })
        .collect()
}
