//! End-to-end summarizer tests: wire shapes and the `summarize` CLI.
//!
//! Unit tests in `core/trace.rs` cover the parsing edge cases; these verify
//! the emitted JSON contract and the standalone CLI behavior.

use std::fs;
use std::process::Command;

use serde_json::{json, Value};

use workbench::core::trace::{summarize, SummarizeError};
use workbench::exit_codes;

#[test]
fn simple_trace_summary_has_the_documented_shape() {
    let doc = json!({"state": [[1, {"x": 1}], [2, {"x": 2}]]});
    let summary = summarize(&doc, None).expect("summary");

    let emitted = serde_json::to_value(&summary).expect("serialize");
    assert_eq!(
        emitted,
        json!({
            "states_total": 2,
            "steps_emitted": 2,
            "steps": [
                {"idx": 1, "state_number": 1, "action": null, "changed_vars": ["x"]},
                {"idx": 2, "state_number": 2, "action": null, "changed_vars": ["x"]}
            ],
            "lasso_edges": []
        })
    );
}

#[test]
fn lasso_trace_records_the_closing_edge_separately() {
    let doc = json!({
        "state": [[1, {"x": 1}], [2, {"x": 2}], [1, {"x": 1}]],
        "action": [[[2, {"x": 2}], {"name": "Loop"}, [1, {"x": 1}]]]
    });
    let summary = summarize(&doc, None).expect("summary");

    assert_eq!(summary.states_total, 3);
    assert!(summary.steps.iter().all(|s| s.action.is_none()));

    let edges = serde_json::to_value(&summary.lasso_edges).expect("serialize");
    assert_eq!(edges, json!([{"from": 2, "to": 1, "action": {"name": "Loop"}}]));
}

#[test]
fn uncapped_summary_emits_one_step_per_state() {
    let states: Vec<Value> = (1..=12).map(|n| json!([n, {"x": n}])).collect();
    let summary = summarize(&json!({"state": states}), None).expect("summary");
    assert_eq!(summary.states_total, 12);
    assert_eq!(summary.steps_emitted, 12);
}

#[test]
fn capped_summary_still_reports_full_totals() {
    let states: Vec<Value> = (1..=12).map(|n| json!([n, {"x": n}])).collect();
    let summary = summarize(&json!({"state": states}), Some(5)).expect("summary");
    assert_eq!(summary.states_total, 12);
    assert_eq!(summary.steps_emitted, 5);
    assert_eq!(summary.steps.last().expect("step").state_number, 5);
}

#[test]
fn whole_document_failures_are_typed() {
    assert!(matches!(
        summarize(&json!(42), None),
        Err(SummarizeError::MalformedInput(_))
    ));
    assert!(matches!(
        summarize(&json!({"no_state": true}), None),
        Err(SummarizeError::MalformedInput(_))
    ));
    assert_eq!(
        summarize(&json!({"state": []}), None),
        Err(SummarizeError::EmptyTrace)
    );
}

#[test]
fn summarize_cli_prints_json() {
    let temp = tempfile::tempdir().expect("tempdir");
    let trace_path = temp.path().join("counterexample.json");
    fs::write(
        &trace_path,
        r#"{"state": [[1, {"x": 1}], [2, {"x": 2}]]}"#,
    )
    .expect("write trace");

    let output = Command::new(env!("CARGO_BIN_EXE_workbench"))
        .arg("summarize")
        .arg("--trace")
        .arg(&trace_path)
        .output()
        .expect("run summarize");

    assert_eq!(output.status.code(), Some(exit_codes::PASS));
    let summary: Value = serde_json::from_slice(&output.stdout).expect("parse stdout");
    assert_eq!(summary["states_total"], json!(2));
    assert_eq!(summary["steps"][0]["changed_vars"], json!(["x"]));
}

#[test]
fn summarize_cli_text_mode_is_scannable() {
    let temp = tempfile::tempdir().expect("tempdir");
    let trace_path = temp.path().join("counterexample.json");
    fs::write(
        &trace_path,
        r#"{
            "state": [[1, {"x": 1}], [2, {"x": 2}]],
            "action": [
                [[1, {"x": 1}], {"name": "Incr"}, [2, {"x": 2}]],
                [[2, {"x": 2}], {"name": "Loop"}, [1, {"x": 1}]]
            ]
        }"#,
    )
    .expect("write trace");

    let output = Command::new(env!("CARGO_BIN_EXE_workbench"))
        .args(["summarize", "--format", "text", "--trace"])
        .arg(&trace_path)
        .output()
        .expect("run summarize");

    assert_eq!(output.status.code(), Some(exit_codes::PASS));
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(text.contains("State 2: changed x via Incr"));
    assert!(text.contains("Lasso:"));
    assert!(text.contains("2 -> 1"));
}

#[test]
fn summarize_cli_fails_loudly_on_malformed_input() {
    let temp = tempfile::tempdir().expect("tempdir");
    let trace_path = temp.path().join("counterexample.json");
    fs::write(&trace_path, r#"{"state": "nope"}"#).expect("write trace");

    let output = Command::new(env!("CARGO_BIN_EXE_workbench"))
        .arg("summarize")
        .arg("--trace")
        .arg(&trace_path)
        .output()
        .expect("run summarize");

    assert_eq!(output.status.code(), Some(exit_codes::INPUT_ERROR));
    assert!(!output.stderr.is_empty());
}
