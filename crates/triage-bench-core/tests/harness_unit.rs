// crates/triage-bench-core/tests/harness_unit.rs
// ============================================================================
// Module: Harness Unit Tests
// Description: End-to-end suite evaluation with a stubbed classifier.
// Purpose: Ensure per-case failures degrade and report order is stable.
// ============================================================================

//! Harness tests exercising the runner, checker, and aggregator together.

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
    clippy::float_cmp,
    reason = "Test-only assertions and exact score comparisons are permitted."
)]

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use triage_bench_core::ActualOutcome;
use triage_bench_core::Case;
use triage_bench_core::Classifier;
use triage_bench_core::ClassifierError;
use triage_bench_core::ConversationTurn;
use triage_bench_core::ExpectedOutcome;
use triage_bench_core::Imminence;
use triage_bench_core::Severity;
use triage_bench_core::Suite;
use triage_bench_core::Timestamp;
use triage_bench_core::run_suite;

// ============================================================================
// SECTION: Stub Classifier
// ============================================================================

/// Stub keyed by the content of the first conversation turn.
struct StubClassifier {
    responses: BTreeMap<String, Result<ActualOutcome, ClassifierError>>,
}

#[async_trait]
impl Classifier for StubClassifier {
    async fn classify(&self, turns: &[ConversationTurn]) -> Result<ActualOutcome, ClassifierError> {
        let key = turns.first().map(|turn| turn.content.clone()).unwrap_or_default();
        self.responses
            .get(&key)
            .cloned()
            .unwrap_or(Err(ClassifierError::Transport("no stubbed response".to_string())))
    }
}

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn expected_high() -> ExpectedOutcome {
    ExpectedOutcome {
        severity: Severity::High,
        acceptable_severities: None,
        imminence: Imminence::Urgent,
        acceptable_imminences: None,
        min_confidence: 0.6,
        domains: Vec::new(),
        legal_flags: BTreeMap::new(),
    }
}

fn case(id: &str) -> Case {
    Case {
        id: id.to_string(),
        description: format!("case {id}"),
        turns: vec![ConversationTurn {
            role: "user".to_string(),
            content: id.to_string(),
        }],
        expected: expected_high(),
        rationale: None,
    }
}

fn suite(ids: &[&str]) -> Suite {
    Suite {
        id: "stub-suite".to_string(),
        version: "1.0.0".to_string(),
        description: "stub fixtures".to_string(),
        cases: ids.iter().map(|id| case(id)).collect(),
    }
}

fn high_outcome(confidence: f64) -> ActualOutcome {
    ActualOutcome {
        severity: Severity::High,
        imminence: Imminence::Urgent,
        confidence,
        domains: Vec::new(),
        legal_flags: None,
        primary_concerns: None,
    }
}

// ============================================================================
// SECTION: Suite Execution
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn passing_suite_reports_full_score() {
    let suite = suite(&["a", "b"]);
    let classifier = Arc::new(StubClassifier {
        responses: BTreeMap::from([
            ("a".to_string(), Ok(high_outcome(0.8))),
            ("b".to_string(), Ok(high_outcome(0.9))),
        ]),
    });

    let report =
        run_suite(&suite, classifier, 4, "http://localhost:9", Timestamp::Logical(7)).await;

    assert_eq!(report.suite_id, "stub-suite");
    assert_eq!(report.endpoint, "http://localhost:9");
    assert_eq!(report.generated_at, Timestamp::Logical(7));
    assert_eq!(report.total, 2);
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(report.aggregate_score, 100.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn classifier_failure_degrades_one_case_without_aborting() {
    let suite = suite(&["a", "b", "c"]);
    let classifier = Arc::new(StubClassifier {
        responses: BTreeMap::from([
            ("a".to_string(), Ok(high_outcome(0.8))),
            ("b".to_string(), Err(ClassifierError::Status(503))),
            ("c".to_string(), Ok(high_outcome(0.8))),
        ]),
    });

    let report = run_suite(&suite, classifier, 2, "endpoint", Timestamp::Logical(1)).await;

    assert_eq!(report.total, 3);
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 1);
    let failed = &report.results[1];
    assert_eq!(failed.case_id, "b");
    assert_eq!(failed.score, 0.0);
    assert_eq!(failed.actual.severity, Severity::None);
    assert_eq!(failed.error.as_deref(), Some("classifier returned status 503"));
}

#[tokio::test(flavor = "multi_thread")]
async fn report_case_order_matches_suite_order() {
    let suite = suite(&["z", "m", "a"]);
    let classifier = Arc::new(StubClassifier {
        responses: BTreeMap::from([
            ("z".to_string(), Ok(high_outcome(0.8))),
            ("m".to_string(), Ok(high_outcome(0.8))),
            ("a".to_string(), Ok(high_outcome(0.8))),
        ]),
    });

    let report = run_suite(&suite, classifier, 3, "endpoint", Timestamp::Logical(1)).await;
    let ids: Vec<&str> = report.results.iter().map(|result| result.case_id.as_str()).collect();
    assert_eq!(ids, vec!["z", "m", "a"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn low_confidence_case_scores_partial_but_fails() {
    let suite = suite(&["a"]);
    let classifier = Arc::new(StubClassifier {
        responses: BTreeMap::from([("a".to_string(), Ok(high_outcome(0.4)))]),
    });

    let report = run_suite(&suite, classifier, 1, "endpoint", Timestamp::Logical(1)).await;
    assert_eq!(report.passed, 0);
    assert_eq!(report.failed, 1);
    assert_eq!(report.results[0].score, 66.7);
    assert_eq!(report.aggregate_score, 66.7);
}
