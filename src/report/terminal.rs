use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;

use crate::engine::ResultView;
use crate::report::classify::ReportMode;
use crate::report::yaml::StructuredTextHelper;

/// Render the current view to the terminal with colors
pub fn render(view: &ResultView, helper: &StructuredTextHelper, empty_message: &str) {
    print!("{}", render_to_string(view, helper, empty_message));
}

/// Terminal rendering of the current view
pub fn render_to_string(
    view: &ResultView,
    helper: &StructuredTextHelper,
    empty_message: &str,
) -> String {
    let mut out = String::new();
    out.push('\n');

    if !view.is_displayable() {
        out.push_str(&format!("  {}\n\n", empty_message.bold()));
        return out;
    }

    match view.mode() {
        Some(ReportMode::Table) if view.is_tabular() => render_table(view, &mut out),
        Some(ReportMode::StructuredText) => {
            let yaml = view.structured_text(helper);
            out.push_str(&yaml);
            if !yaml.ends_with('\n') {
                out.push('\n');
            }
        }
        Some(ReportMode::RawString) => {
            let text = view.raw_text().unwrap_or_default();
            out.push_str(text);
            if !text.ends_with('\n') {
                out.push('\n');
            }
        }
        _ => {}
    }

    out.push('\n');
    out
}

fn render_table(view: &ResultView, out: &mut String) {
    let columns = view.columns();
    let rows = view.visible_rows();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns.iter().map(|c| Cell::new(&c.label)));

    for row in &rows {
        table.add_row(columns.iter().map(|c| {
            let value = row.get(&c.field_name).unwrap_or_default();
            let cell = Cell::new(value);
            if c.field_name == "severity" {
                match severity_color(value) {
                    Some(color) => cell.fg(color),
                    None => cell,
                }
            } else {
                cell
            }
        }));
    }

    out.push_str(&table.to_string());
    out.push('\n');

    let total = view.dataset().map(|d| d.len()).unwrap_or_default();
    let count = if view.search_term().is_empty() {
        format!(" {} records", rows.len().to_string().bold())
    } else {
        format!(
            " {} of {} records match {}",
            rows.len().to_string().bold(),
            total,
            format!("\"{}\"", view.search_term()).cyan()
        )
    };
    out.push_str(&count);
    out.push('\n');
}

/// Scanner severities come either as levels (error/warning/note) or as
/// priorities (High/Medium/Low).
fn severity_color(severity: &str) -> Option<Color> {
    match severity.to_lowercase().as_str() {
        "error" | "critical" | "high" => Some(Color::Red),
        "warning" | "warn" | "medium" => Some(Color::Yellow),
        "note" | "info" | "low" => Some(Color::Blue),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{"result":{"results":[
        {"flowName":"Account_Update","severity":"error","rule":"HardcodedId"},
        {"flowName":"Lead_Router","severity":"note","rule":"FlowDescription"}
    ]}}"#;

    fn helper() -> StructuredTextHelper {
        let helper = StructuredTextHelper::new();
        helper.ensure_loaded();
        helper
    }

    #[test]
    fn table_lists_rows_and_count() {
        let mut view = ResultView::new();
        view.load_text(REPORT);
        let out = render_to_string(&view, &helper(), "No Violations Found");
        assert!(out.contains("Flow Name"));
        assert!(out.contains("Account_Update"));
        assert!(out.contains("Lead_Router"));
        assert!(out.contains("records"));
    }

    #[test]
    fn table_shows_only_matches() {
        let mut view = ResultView::new();
        view.load_text(REPORT);
        view.search("lead");
        let out = render_to_string(&view, &helper(), "No Violations Found");
        assert!(!out.contains("Account_Update"));
        assert!(out.contains("Lead_Router"));
        assert!(out.contains("of 2 records match"));
    }

    #[test]
    fn empty_report_shows_message() {
        let mut view = ResultView::new();
        view.load_text(r#"{"result":{"results":[]}}"#);
        let out = render_to_string(&view, &helper(), "No Violations Found");
        assert!(out.contains("No Violations Found"));
    }

    #[test]
    fn raw_text_is_printed_verbatim() {
        let mut view = ResultView::new();
        view.load_text("Scan aborted: no flows in package");
        let out = render_to_string(&view, &helper(), "-");
        assert!(out.contains("Scan aborted: no flows in package\n"));
    }

    #[test]
    fn severity_colors() {
        assert_eq!(severity_color("Error"), Some(Color::Red));
        assert_eq!(severity_color("warning"), Some(Color::Yellow));
        assert_eq!(severity_color("Low"), Some(Color::Blue));
        assert_eq!(severity_color("custom"), None);
    }
}
