// crates/triage-bench-core/src/result.rs
// ============================================================================
// Module: Case Results
// Description: Immutable per-case evaluation records.
// Purpose: Capture self-contained case outcomes for the suite report.
// Dependencies: crate::checker, crate::outcome, crate::suite, serde
// ============================================================================

//! ## Overview
//! A [`CaseResult`] echoes the case input and expectation alongside the
//! actual outcome so the report is self-contained. Results are created once
//! by the scoring step, immutable afterwards, and owned exclusively by the
//! report aggregator until serialized.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::checker::CaseEvaluation;
use crate::checker::evaluate_case;
use crate::outcome::ActualOutcome;
use crate::suite::Case;
use crate::suite::ConversationTurn;
use crate::suite::ExpectedOutcome;

// ============================================================================
// SECTION: Case Result
// ============================================================================

/// Self-contained evaluation record for one case.
///
/// # Invariants
/// - `passed` is true iff every entry in `checks` is true.
/// - `score` lies in `[0, 100]` with one decimal of precision.
/// - `error` is present iff the classifier call failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    /// Case identifier copied from the suite.
    pub case_id: String,
    /// Case description copied from the suite.
    pub description: String,
    /// Conversational input copied from the suite.
    pub input: Vec<ConversationTurn>,
    /// Expected outcome echoed for report self-containment.
    pub expected: ExpectedOutcome,
    /// Actual outcome produced by the classifier (or the failure placeholder).
    pub actual: ActualOutcome,
    /// True iff all evaluated checks hold.
    pub passed: bool,
    /// Named boolean checks in deterministic order.
    pub checks: BTreeMap<String, bool>,
    /// Percentage score in `[0, 100]`.
    pub score: f64,
    /// Error text captured when the classifier call failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaseResult {
    /// Builds the result for a successfully classified case.
    #[must_use]
    pub fn from_outcome(case: &Case, actual: ActualOutcome) -> Self {
        let CaseEvaluation {
            checks,
            passed,
            score,
        } = evaluate_case(&case.expected, &actual);
        Self {
            case_id: case.id.clone(),
            description: case.description.clone(),
            input: case.turns.clone(),
            expected: case.expected.clone(),
            actual,
            passed,
            checks,
            score,
            error: None,
        }
    }

    /// Builds the degraded result for a failed classifier call.
    ///
    /// All expectation logic is skipped: the actual outcome is the failure
    /// placeholder, the three baseline checks are false, and the error text
    /// is attached.
    #[must_use]
    pub fn from_failure(case: &Case, error: &str) -> Self {
        let CaseEvaluation {
            checks,
            passed,
            score,
        } = CaseEvaluation::failure();
        Self {
            case_id: case.id.clone(),
            description: case.description.clone(),
            input: case.turns.clone(),
            expected: case.expected.clone(),
            actual: ActualOutcome::failure_placeholder(),
            passed,
            checks,
            score,
            error: Some(error.to_string()),
        }
    }
}
