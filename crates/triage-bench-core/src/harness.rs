// crates/triage-bench-core/src/harness.rs
// ============================================================================
// Module: Suite Harness
// Description: Drives a suite through the runner, checker, and aggregator.
// Purpose: Produce a complete suite report from a validated suite.
// Dependencies: crate::classifier, crate::report, crate::result, crate::runner
// ============================================================================

//! ## Overview
//! The harness wires the pipeline together: one runner task per case issues
//! the classifier call and folds the response (or failure) into a
//! [`CaseResult`]; the aggregator then builds the suite report. Every task
//! body captures its own failure, so the runner never propagates an error
//! and a degraded classifier only lowers scores.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::classifier::Classifier;
use crate::report::SuiteReport;
use crate::result::CaseResult;
use crate::runner::run_pool;
use crate::suite::Case;
use crate::suite::Suite;
use crate::time::Timestamp;

// ============================================================================
// SECTION: Suite Execution
// ============================================================================

/// Evaluates every case in the suite and aggregates the report.
///
/// Cases run through the bounded lane pool with at most `lanes` classifier
/// calls in flight. Result order always matches suite case order. An
/// aborted runner slot is recorded as a failed case rather than dropped.
pub async fn run_suite(
    suite: &Suite,
    classifier: Arc<dyn Classifier>,
    lanes: usize,
    endpoint: &str,
    generated_at: Timestamp,
) -> SuiteReport {
    let slots = run_pool(suite.cases.clone(), lanes, move |_, case: Case| {
        let classifier = Arc::clone(&classifier);
        async move {
            match classifier.classify(&case.turns).await {
                Ok(actual) => CaseResult::from_outcome(&case, actual),
                Err(err) => CaseResult::from_failure(&case, &err.to_string()),
            }
        }
    })
    .await;

    let results = slots
        .into_iter()
        .zip(&suite.cases)
        .map(|(slot, case)| {
            slot.unwrap_or_else(|| CaseResult::from_failure(case, "task aborted before completion"))
        })
        .collect();
    SuiteReport::build(suite, endpoint, generated_at, results)
}
