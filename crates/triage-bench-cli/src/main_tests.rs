// crates/triage-bench-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for suite discovery and summary formatting helpers.
// Purpose: Ensure CLI helpers behave deterministically without a live endpoint.
// Dependencies: triage-bench-cli main helpers
// ============================================================================

//! ## Overview
//! Validates suite file discovery ordering, options conversion, timestamp
//! capture, and the suite summary line.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use triage_bench_core::SuiteReport;
use triage_bench_core::Timestamp;

use super::collect_suite_paths;
use super::format_suite_summary;
use super::now_timestamp;
use super::options_to_json;

// ============================================================================
// SECTION: Suite Discovery
// ============================================================================

#[test]
fn suite_paths_are_filtered_and_sorted_by_name() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("beta.json"), b"{}").unwrap();
    fs::write(dir.path().join("alpha.json"), b"{}").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();
    fs::create_dir(dir.path().join("nested.json")).unwrap();

    let paths = collect_suite_paths(dir.path()).unwrap();
    let names: Vec<String> = paths
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["alpha.json".to_string(), "beta.json".to_string()]);
}

#[test]
fn missing_suite_directory_is_an_error() {
    let result = collect_suite_paths(Path::new("definitely-missing-suite-dir"));
    assert!(result.is_err());
}

// ============================================================================
// SECTION: Options Conversion
// ============================================================================

#[test]
fn absent_options_become_an_empty_object() {
    let value = options_to_json(None).unwrap();
    assert!(value.as_object().is_some_and(serde_json::Map::is_empty));
}

#[test]
fn options_table_converts_to_json() {
    let table: toml::Value = toml::from_str("model = \"triage-v2\"\nthreshold = 0.5\n").unwrap();
    let value = options_to_json(Some(&table)).unwrap();
    assert_eq!(value["model"], "triage-v2");
    assert_eq!(value["threshold"], 0.5);
}

// ============================================================================
// SECTION: Timestamps And Summaries
// ============================================================================

#[test]
fn now_timestamp_is_unix_millis() {
    let timestamp = now_timestamp().unwrap();
    match timestamp {
        Timestamp::UnixMillis(millis) => assert!(millis > 0),
        Timestamp::Logical(_) => panic!("expected wall-clock timestamp"),
    }
}

#[test]
fn suite_summary_line_includes_counts_and_artifact() {
    let report = SuiteReport {
        suite_id: "crisis-baseline".to_string(),
        suite_version: "1.0.0".to_string(),
        description: "baseline".to_string(),
        generated_at: Timestamp::Logical(1),
        endpoint: "https://classifier.example.com/v1/classify".to_string(),
        total: 3,
        passed: 2,
        failed: 1,
        aggregate_score: 66.7,
        results: Vec::new(),
    };
    let line = format_suite_summary(&report, Path::new("reports/crisis-baseline.json"));
    assert_eq!(
        line,
        "suite crisis-baseline: 2/3 cases passed, aggregate 66.7, report reports/crisis-baseline.json"
    );
}
