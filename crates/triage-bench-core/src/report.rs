// crates/triage-bench-core/src/report.rs
// ============================================================================
// Module: Report Aggregator
// Description: Suite-level report folding and artifact writing.
// Purpose: Produce a deterministic, self-contained report per suite.
// Dependencies: crate::result, crate::suite, crate::time, serde, thiserror
// ============================================================================

//! ## Overview
//! The aggregator folds the ordered case results into suite-level counts and
//! the aggregate score. The aggregate is the arithmetic mean of per-case
//! scores, not a pass-count ratio; the two numbers are reported side by side
//! and must never be conflated. The artifact is named by suite identifier and
//! written in a single whole-file operation, so re-running a suite replaces
//! the prior artifact and a reader never observes a half-written report.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::result::CaseResult;
use crate::suite::Suite;
use crate::time::Timestamp;

// ============================================================================
// SECTION: Suite Report
// ============================================================================

/// Aggregated evaluation report for one suite.
///
/// # Invariants
/// - `results` preserves the original case order regardless of completion
///   order.
/// - `total == passed + failed` and `total == results.len()`.
/// - `aggregate_score` is the arithmetic mean of case scores, one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite identifier.
    pub suite_id: String,
    /// Suite definition version.
    pub suite_version: String,
    /// Suite description.
    pub description: String,
    /// Report generation timestamp supplied by the host.
    pub generated_at: Timestamp,
    /// Classifier endpoint label used for the run.
    pub endpoint: String,
    /// Total number of cases evaluated.
    pub total: usize,
    /// Number of cases with all checks true.
    pub passed: usize,
    /// Number of cases with at least one false check.
    pub failed: usize,
    /// Arithmetic mean of per-case scores.
    pub aggregate_score: f64,
    /// Ordered per-case results.
    pub results: Vec<CaseResult>,
}

impl SuiteReport {
    /// Folds ordered case results into a suite report.
    #[must_use]
    pub fn build(
        suite: &Suite,
        endpoint: &str,
        generated_at: Timestamp,
        results: Vec<CaseResult>,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|result| result.passed).count();
        let aggregate_score = mean_score(&results);
        Self {
            suite_id: suite.id.clone(),
            suite_version: suite.version.clone(),
            description: suite.description.clone(),
            generated_at,
            endpoint: endpoint.to_string(),
            total,
            passed,
            failed: total - passed,
            aggregate_score,
            results,
        }
    }
}

/// Computes the mean of per-case scores with one decimal of precision.
fn mean_score(results: &[CaseResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let count = u32::try_from(results.len()).unwrap_or(u32::MAX);
    let sum: f64 = results.iter().map(|result| result.score).sum();
    (sum / f64::from(count) * 10.0).round() / 10.0
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while materializing the report artifact.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Report serialization failed.
    #[error("failed to serialize report for suite '{suite_id}': {source}")]
    Serialize {
        /// Suite identifier.
        suite_id: String,
        /// Underlying serialization error.
        source: serde_json::Error,
    },
    /// The artifact could not be written.
    #[error("failed to write report artifact {path}: {source}")]
    Write {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

// ============================================================================
// SECTION: Artifact Write
// ============================================================================

/// Writes the report artifact as pretty JSON under `dir`.
///
/// The artifact is keyed by suite identifier (`<suite_id>.json`); an
/// existing artifact for the same suite is replaced.
///
/// # Errors
///
/// Returns [`ReportError`] when serialization fails or the destination is
/// not writable. Write failures are fatal to the run.
pub fn write_report(report: &SuiteReport, dir: &Path) -> Result<PathBuf, ReportError> {
    let bytes = serde_json::to_vec_pretty(report).map_err(|source| ReportError::Serialize {
        suite_id: report.suite_id.clone(),
        source,
    })?;
    fs::create_dir_all(dir).map_err(|source| ReportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(format!("{}.json", report.suite_id));
    fs::write(&path, bytes).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
