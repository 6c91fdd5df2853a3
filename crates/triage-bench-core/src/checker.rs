// crates/triage-bench-core/src/checker.rs
// ============================================================================
// Module: Expectation Checker
// Description: Compares actual classifications against case expectations.
// Purpose: Produce named boolean checks and a percentage score per case.
// Dependencies: crate::outcome, crate::scale, crate::suite
// ============================================================================

//! ## Overview
//! The checker compares an [`ActualOutcome`] against a case's
//! [`ExpectedOutcome`] using three rule families: set membership for overall
//! severity and imminence, numeric thresholds for confidence, and ordinal
//! thresholds on the fixed scales for per-domain minimums. The percentage
//! score and the boolean pass gate are computed independently: `passed`
//! requires every evaluated check to hold, while the score is the fraction
//! of true checks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::outcome::ActualOutcome;
use crate::outcome::LegalFlagValue;
use crate::suite::ExpectedOutcome;
use crate::suite::FlagExpectation;

// ============================================================================
// SECTION: Check Names
// ============================================================================

/// Check name for overall severity set membership.
pub const CHECK_OVERALL_SEVERITY: &str = "overall_severity";
/// Check name for overall imminence set membership.
pub const CHECK_OVERALL_IMMINENCE: &str = "overall_imminence";
/// Check name for the overall confidence threshold.
pub const CHECK_CONFIDENCE: &str = "confidence";

/// Builds the check name for one domain dimension.
fn domain_check(tag: &str, dimension: &str) -> String {
    format!("domain:{tag}:{dimension}")
}

/// Builds the check name for one legal flag.
fn flag_check(name: &str) -> String {
    format!("flag:{name}")
}

// ============================================================================
// SECTION: Evaluation Output
// ============================================================================

/// Outcome of evaluating one case against its expectations.
///
/// # Invariants
/// - `passed` is true iff every check in `checks` is true.
/// - `score` is `100 * true_checks / total_checks`, rounded to one decimal.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseEvaluation {
    /// Named boolean checks in deterministic order.
    pub checks: BTreeMap<String, bool>,
    /// True iff all evaluated checks hold.
    pub passed: bool,
    /// Percentage score in `[0, 100]` with one decimal of precision.
    pub score: f64,
}

impl CaseEvaluation {
    /// Folds a check map into the pass gate and score.
    #[must_use]
    pub fn from_checks(checks: BTreeMap<String, bool>) -> Self {
        let total = checks.len();
        let true_count = checks.values().filter(|check| **check).count();
        let passed = total > 0 && true_count == total;
        Self {
            checks,
            passed,
            score: percentage(true_count, total),
        }
    }

    /// Returns the evaluation recorded when the classifier call failed.
    ///
    /// The three baseline checks are present and false; no domain or flag
    /// checks are evaluated.
    #[must_use]
    pub fn failure() -> Self {
        let checks = BTreeMap::from([
            (CHECK_OVERALL_SEVERITY.to_string(), false),
            (CHECK_OVERALL_IMMINENCE.to_string(), false),
            (CHECK_CONFIDENCE.to_string(), false),
        ]);
        Self {
            checks,
            passed: false,
            score: 0.0,
        }
    }
}

/// Computes a percentage with one decimal of precision.
fn percentage(true_count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let numerator = u32::try_from(true_count).unwrap_or(u32::MAX);
    let denominator = u32::try_from(total).unwrap_or(u32::MAX);
    (f64::from(numerator) / f64::from(denominator) * 1000.0).round() / 10.0
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates an actual outcome against a case's expectations.
#[must_use]
pub fn evaluate_case(expected: &ExpectedOutcome, actual: &ActualOutcome) -> CaseEvaluation {
    let mut checks = BTreeMap::new();
    checks.insert(
        CHECK_OVERALL_SEVERITY.to_string(),
        expected.severity_set().contains(&actual.severity),
    );
    checks.insert(
        CHECK_OVERALL_IMMINENCE.to_string(),
        expected.imminence_set().contains(&actual.imminence),
    );
    checks.insert(CHECK_CONFIDENCE.to_string(), actual.confidence >= expected.min_confidence);

    for expectation in &expected.domains {
        let tag = expectation.domain.as_str();
        match actual.domain(tag) {
            None => {
                // Absent expected domains are an explicit detection gap.
                checks.insert(domain_check(tag, "present"), false);
            }
            Some(assessment) => {
                checks.insert(domain_check(tag, "present"), true);
                if let Some(min_severity) = expectation.min_severity {
                    checks.insert(
                        domain_check(tag, "severity"),
                        assessment.severity.rank() >= min_severity.rank(),
                    );
                }
                if let Some(min_imminence) = expectation.min_imminence {
                    checks.insert(
                        domain_check(tag, "imminence"),
                        assessment.imminence.rank() >= min_imminence.rank(),
                    );
                }
                if let Some(min_confidence) = expectation.min_confidence {
                    checks.insert(
                        domain_check(tag, "confidence"),
                        assessment.confidence >= min_confidence,
                    );
                }
            }
        }
    }

    for (name, expectation) in &expected.legal_flags {
        let actual_flag =
            actual.legal_flags.as_ref().and_then(|flags| flags.get(name));
        checks.insert(flag_check(name), flag_matches(expectation, actual_flag));
    }

    CaseEvaluation::from_checks(checks)
}

/// Compares one flag expectation against the actual flag payload.
fn flag_matches(expectation: &FlagExpectation, actual: Option<&LegalFlagValue>) -> bool {
    let Some(flag) = actual else {
        return false;
    };
    match expectation {
        FlagExpectation::Present(expected) => flag.present == Some(*expected),
        FlagExpectation::Level(expected) => flag.level.as_deref() == Some(expected.as_str()),
    }
}
