use anyhow::Result;
use serde::Serialize;

use crate::engine::ResultView;
use crate::report::classify::{Column, ReportMode};
use crate::report::violation::DisplayRow;

/// Machine-readable snapshot of what the viewer currently shows
#[derive(Debug, Serialize)]
pub struct ViewExport<'a> {
    pub version: &'static str,
    pub generated_at: String,
    /// `None` when no report is loaded
    pub mode: Option<ReportMode>,
    pub displayable: bool,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub search: &'a str,
    pub record_count: usize,
    pub columns: Vec<Column>,
    pub rows: Vec<&'a DisplayRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
}

impl<'a> ViewExport<'a> {
    pub fn from_view(view: &'a ResultView) -> Self {
        ViewExport {
            version: env!("CARGO_PKG_VERSION"),
            generated_at: chrono::Utc::now().to_rfc3339(),
            mode: view.mode(),
            displayable: view.is_displayable(),
            search: view.search_term(),
            record_count: view.record_count(),
            columns: view.columns(),
            rows: view.visible_rows(),
            text: view.raw_text(),
        }
    }
}

/// Render the current view as pretty-printed JSON
pub fn render(view: &ResultView) -> Result<String> {
    let json = serde_json::to_string_pretty(&ViewExport::from_view(view))?;
    Ok(json)
}
