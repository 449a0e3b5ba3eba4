use serde_json::Value;

/// Outcome of attempting a structured parse of decoded report text
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedReport {
    /// The text was valid JSON
    Structured(Value),
    /// The text was not JSON; carries the original text unchanged
    Failure(String),
}

/// Strictly parse report text as JSON.
///
/// Every kind of parse error collapses into [`ParsedReport::Failure`].
pub fn parse(text: &str) -> ParsedReport {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => ParsedReport::Structured(value),
        Err(e) => {
            tracing::debug!("Report text is not JSON: {}", e);
            ParsedReport::Failure(text.to_string())
        }
    }
}
