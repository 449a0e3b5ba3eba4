pub mod attachment;

use tracing::{debug, info, warn};

use crate::decode::{self, DecodeError};
use crate::report::classify::{self, Classification, Column, Dataset, ReportMode};
use crate::report::search;
use crate::report::violation::DisplayRow;
use crate::report::yaml::StructuredTextHelper;

/// The result viewer. Owns the current dataset and the visible subset
/// produced by the active search term.
///
/// Every new payload replaces the whole state; nothing carries over from
/// the previous report, including the search term.
#[derive(Debug, Default)]
pub struct ResultView {
    /// Classified report, `None` when nothing is displayable
    current: Option<Classification>,
    /// Indices into the dataset rows that pass the search
    visible: Vec<usize>,
    /// Normalized search term
    search_term: String,
}

impl ResultView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the full pipeline on a transported payload.
    ///
    /// A payload that cannot be decoded leaves the view empty and returns the
    /// error so the caller can log it.
    pub fn load_payload(&mut self, raw: &str) -> Result<(), DecodeError> {
        match decode::decode(raw) {
            Ok(text) => {
                self.load_text(&text);
                Ok(())
            }
            Err(e) => {
                warn!("Discarding undecodable payload: {}", e);
                self.clear();
                Err(e)
            }
        }
    }

    /// Classify already decoded report text and make it current.
    pub fn load_text(&mut self, text: &str) {
        let classification = classify::classify(text);
        let visible = (0..classification.dataset.rows().len()).collect();

        info!(
            "Loaded report: mode={}, {} entries",
            classification.mode,
            classification.dataset.len()
        );

        *self = ResultView {
            current: Some(classification),
            visible,
            search_term: String::new(),
        };
    }

    /// Drop the current report
    pub fn clear(&mut self) {
        *self = ResultView::default();
    }

    /// Apply a search term. Only tables are searchable; in other modes the
    /// term is ignored.
    pub fn search(&mut self, term: &str) {
        let Some(current) = &self.current else {
            return;
        };
        if current.mode != ReportMode::Table {
            debug!("Search ignored in {} mode", current.mode);
            return;
        }

        self.search_term = search::normalize_term(term);
        self.visible = search::matching_indices(current.dataset.rows(), &self.search_term);
        debug!(
            "Search {:?}: {} of {} rows visible",
            self.search_term,
            self.visible.len(),
            current.dataset.len()
        );
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn mode(&self) -> Option<ReportMode> {
        self.current.as_ref().map(|c| c.mode)
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.current.as_ref().map(|c| &c.dataset)
    }

    /// Rows that pass the active search, in dataset order
    pub fn visible_rows(&self) -> Vec<&DisplayRow> {
        let rows = self.dataset().map(Dataset::rows).unwrap_or_default();
        self.visible.iter().map(|&i| &rows[i]).collect()
    }

    pub fn record_count(&self) -> usize {
        self.visible.len()
    }

    /// Table columns; empty unless the report is a table
    pub fn columns(&self) -> Vec<Column> {
        match &self.current {
            Some(c) if c.mode == ReportMode::Table => classify::columns(c.dataset.rows()),
            _ => Vec::new(),
        }
    }

    /// Whether the report has anything to show. An empty row list or empty
    /// text is reported to the user as "no violations".
    pub fn is_displayable(&self) -> bool {
        self.dataset().is_some_and(|d| !d.is_empty())
    }

    pub fn is_tabular(&self) -> bool {
        self.is_displayable()
            && self.mode() == Some(ReportMode::Table)
            && !self.columns().is_empty()
    }

    pub fn is_structured_text(&self) -> bool {
        self.is_displayable() && self.mode() == Some(ReportMode::StructuredText)
    }

    pub fn is_raw_string(&self) -> bool {
        self.is_displayable() && self.mode() == Some(ReportMode::RawString)
    }

    /// Decoded text of a raw report
    pub fn raw_text(&self) -> Option<&str> {
        match &self.current {
            Some(c) if c.mode == ReportMode::RawString => c.dataset.text(),
            _ => None,
        }
    }

    /// YAML rendering of a structured-text report. Empty until the helper
    /// is loaded or when the report is in another mode.
    pub fn structured_text(&self, helper: &StructuredTextHelper) -> String {
        match &self.current {
            Some(c) if c.mode == ReportMode::StructuredText => {
                helper.dump(&c.dataset).unwrap_or_default()
            }
            _ => String::new(),
        }
    }
}
