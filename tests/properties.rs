//! Property-based tests for the decode / classify / search pipeline

use proptest::prelude::*;
use serde_json::{json, Value};

use flowview::decode::{decode, encode};
use flowview::report::search::{filter, matching_indices};
use flowview::{classify, Dataset, DisplayRow, ReportMode};

/// Strategy for a single violation object with all eight fields
fn violation_strategy() -> impl Strategy<Value = Value> {
    (
        "[A-Za-z_]{1,12}",
        "[A-Za-z0-9_]{1,12}",
        prop::sample::select(vec!["Screen", "AutoLaunchedFlow", "Workflow"]),
        prop::sample::select(vec!["error", "warning", "note", "High", "Low"]),
        "[A-Za-z]{3,16}",
        "[a-z ]{0,30}",
        "[a-zA-Z]{1,12}",
        prop::sample::select(vec!["node", "variable", "resource"]),
    )
        .prop_map(|(flow, name, flow_type, severity, rule, desc, kind, meta)| {
            json!({
                "flowName": flow,
                "name": name,
                "flowType": flow_type,
                "severity": severity,
                "rule": rule,
                "ruleDescription": desc,
                "type": kind,
                "metaType": meta,
            })
        })
}

fn report_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(violation_strategy(), 1..20)
}

fn rows_of(violations: Vec<Value>) -> Vec<DisplayRow> {
    let text = json!({"result": {"results": violations}}).to_string();
    match classify(&text).dataset {
        Dataset::Rows(rows) => rows,
        Dataset::Text(_) => panic!("violation report classified as text"),
    }
}

proptest! {
    #[test]
    fn decode_reverses_encode(text in any::<String>()) {
        prop_assert_eq!(decode(&encode(&text)).unwrap(), text);
    }

    #[test]
    fn non_json_text_is_raw(text in "[a-zA-Z][a-zA-Z ,.:]{0,60}") {
        // A leading letter other than a JSON literal keyword never parses
        prop_assume!(serde_json::from_str::<Value>(&text).is_err());
        let c = classify(&text);
        prop_assert_eq!(c.mode, ReportMode::RawString);
        prop_assert_eq!(c.dataset, Dataset::Text(text));
    }

    #[test]
    fn json_without_results_is_raw(key in "[a-z]{1,8}", n in any::<i64>()) {
        prop_assume!(key != "result");
        let text = json!({ key: { "results": [n] } }).to_string();
        let c = classify(&text);
        prop_assert_eq!(c.mode, ReportMode::RawString);
        prop_assert_eq!(c.dataset, Dataset::Text(text));
    }

    #[test]
    fn violations_become_one_row_each(violations in report_strategy()) {
        let text = json!({"result": {"results": violations.clone()}}).to_string();
        let c = classify(&text);
        prop_assert_eq!(c.mode, ReportMode::Table);
        let rows = c.dataset.rows();
        prop_assert_eq!(rows.len(), violations.len());
        for (row, v) in rows.iter().zip(&violations) {
            prop_assert_eq!(row.get("Flow Name"), v["flowName"].as_str());
            prop_assert_eq!(row.get("API Name"), v["name"].as_str());
            prop_assert_eq!(row.get("Flow Type"), v["flowType"].as_str());
            prop_assert_eq!(row.get("severity"), v["severity"].as_str());
            prop_assert_eq!(row.get("rule"), v["rule"].as_str());
            prop_assert_eq!(row.get("Rule Description"), v["ruleDescription"].as_str());
            prop_assert_eq!(row.get("type"), v["type"].as_str());
            prop_assert_eq!(row.get("metaType"), v["metaType"].as_str());
        }
    }

    #[test]
    fn empty_term_is_identity(violations in report_strategy(), blank in "[ \t]{0,4}") {
        let rows = rows_of(violations);
        let all: Vec<&DisplayRow> = rows.iter().collect();
        prop_assert_eq!(filter(&rows, &blank), all);
    }

    #[test]
    fn search_ignores_case(violations in report_strategy(), term in "[a-zA-Z]{1,4}") {
        let rows = rows_of(violations);
        prop_assert_eq!(
            matching_indices(&rows, &term.to_uppercase()),
            matching_indices(&rows, &term.to_lowercase())
        );
    }

    #[test]
    fn filter_is_an_ordered_subset(violations in report_strategy(), term in "[a-z]{1,3}") {
        let rows = rows_of(violations);
        let picked = matching_indices(&rows, &term);
        prop_assert!(picked.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(picked.iter().all(|&i| i < rows.len()));
    }

    #[test]
    fn filter_reset_is_lossless(violations in report_strategy(), term in "[a-z]{1,3}") {
        let mut view = flowview::ResultView::new();
        view.load_text(&json!({"result": {"results": violations}}).to_string());
        let before: Vec<DisplayRow> = view.visible_rows().into_iter().cloned().collect();
        view.search(&term);
        prop_assert!(view.record_count() <= before.len());
        view.search("");
        let after: Vec<DisplayRow> = view.visible_rows().into_iter().cloned().collect();
        prop_assert_eq!(before, after);
    }
}

#[test]
fn empty_results_are_structured_text() {
    let c = classify(r#"{"result":{"results":[]}}"#);
    assert_eq!(c.mode, ReportMode::StructuredText);
    assert_eq!(c.dataset, Dataset::Rows(vec![]));
}

#[test]
fn end_to_end_single_violation() {
    let text = r#"{"result":{"results":[{"flowName":"F1","name":"A","flowType":"Screen","severity":"High","rule":"R1","ruleDescription":"desc","type":"Error","metaType":"M"}]}}"#;
    let payload = encode(text);
    let c = classify(&decode(&payload).unwrap());
    assert_eq!(c.mode, ReportMode::Table);

    let rows = c.dataset.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        serde_json::to_value(&rows[0]).unwrap(),
        json!({
            "Flow Name": "F1",
            "API Name": "A",
            "Flow Type": "Screen",
            "severity": "High",
            "rule": "R1",
            "Rule Description": "desc",
            "type": "Error",
            "metaType": "M"
        })
    );
}

#[test]
fn high_and_lower_high_match_the_same_rows() {
    let rows = rows_of(vec![
        json!({"flowName": "A", "severity": "High"}),
        json!({"flowName": "B", "severity": "Low"}),
        json!({"flowName": "C", "ruleDescription": "too high a count"}),
    ]);
    assert_eq!(filter(&rows, "HIGH"), filter(&rows, "high"));
    assert_eq!(matching_indices(&rows, "high"), vec![0, 2]);
}

#[test]
fn filter_reset_after_severity_search() {
    let rows = rows_of(vec![
        json!({"flowName": "A", "severity": "error"}),
        json!({"flowName": "B", "severity": "note"}),
    ]);
    let narrowed: Vec<DisplayRow> = filter(&rows, "sev").into_iter().cloned().collect();
    assert!(narrowed.is_empty());
    assert_eq!(filter(&rows, ""), rows.iter().collect::<Vec<_>>());
}
