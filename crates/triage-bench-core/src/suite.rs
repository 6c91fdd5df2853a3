// crates/triage-bench-core/src/suite.rs
// ============================================================================
// Module: Suite Definitions and Loader
// Description: Suite, case, and expectation types with strict validation.
// Purpose: Parse declarative suite documents into validated immutable records.
// Dependencies: crate::scale, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Suites are declarative JSON documents describing conversational inputs and
//! the classification outcomes they are expected to produce. Loading performs
//! a single bounded read and strict validation; a suite that fails any check
//! is rejected as malformed rather than partially accepted. Loaded suites are
//! immutable.
//!
//! Security posture: suite documents are untrusted input; size limits and
//! identifier validation fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::scale::Imminence;
use crate::scale::Severity;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a suite document in bytes.
pub const MAX_SUITE_FILE_BYTES: u64 = 1024 * 1024;
/// Maximum length of suite and case identifiers.
pub const MAX_IDENTIFIER_LENGTH: usize = 128;

// ============================================================================
// SECTION: Conversation Input
// ============================================================================

/// One turn of the conversational input presented to the classifier.
///
/// # Invariants
/// - `role` is an opaque tag; the harness does not interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Speaker role tag (for example `user` or `assistant`).
    pub role: String,
    /// Turn text content.
    pub content: String,
}

// ============================================================================
// SECTION: Expectations
// ============================================================================

/// Expected value for a legal or safeguarding flag.
///
/// # Invariants
/// - Boolean expectations compare against the actual flag's `present` field.
/// - Level expectations compare against the actual flag's `level` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagExpectation {
    /// The flag must be present (or absent) as a boolean condition.
    Present(bool),
    /// The flag must carry this enumerated level string.
    Level(String),
}

/// Minimum thresholds expected for one risk domain.
///
/// # Invariants
/// - `domain` is non-empty.
/// - `min_confidence`, when set, lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainExpectation {
    /// Domain tag matched against the actual per-domain assessments.
    pub domain: String,
    /// Minimum acceptable severity on the ordered scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_severity: Option<Severity>,
    /// Minimum acceptable imminence on the ordered scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_imminence: Option<Imminence>,
    /// Minimum acceptable confidence for the domain assessment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_confidence: Option<f64>,
}

/// Expected classification outcome for one case.
///
/// # Invariants
/// - Acceptable sets, when supplied, are non-empty.
/// - `min_confidence` lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedOutcome {
    /// Baseline expected overall severity.
    pub severity: Severity,
    /// Additional acceptable overall severities widening the baseline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptable_severities: Option<Vec<Severity>>,
    /// Baseline expected overall imminence.
    pub imminence: Imminence,
    /// Additional acceptable overall imminences widening the baseline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptable_imminences: Option<Vec<Imminence>>,
    /// Minimum acceptable overall confidence.
    pub min_confidence: f64,
    /// Per-domain minimum expectations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<DomainExpectation>,
    /// Legal and safeguarding flag expectations keyed by flag name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub legal_flags: BTreeMap<String, FlagExpectation>,
}

impl ExpectedOutcome {
    /// Returns the acceptable overall severity set.
    ///
    /// The baseline severity is always a member; the optional acceptable list
    /// widens the set rather than replacing it.
    #[must_use]
    pub fn severity_set(&self) -> BTreeSet<Severity> {
        let mut set = BTreeSet::from([self.severity]);
        if let Some(widened) = &self.acceptable_severities {
            set.extend(widened.iter().copied());
        }
        set
    }

    /// Returns the acceptable overall imminence set.
    ///
    /// The baseline imminence is always a member; the optional acceptable
    /// list widens the set rather than replacing it.
    #[must_use]
    pub fn imminence_set(&self) -> BTreeSet<Imminence> {
        let mut set = BTreeSet::from([self.imminence]);
        if let Some(widened) = &self.acceptable_imminences {
            set.extend(widened.iter().copied());
        }
        set
    }
}

// ============================================================================
// SECTION: Cases and Suites
// ============================================================================

/// One conversational input plus its expected classification outcome.
///
/// # Invariants
/// - `id` is unique within the owning suite.
/// - `turns` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Case identifier, unique within the suite.
    pub id: String,
    /// Human description of the scenario under test.
    pub description: String,
    /// Ordered conversational input.
    pub turns: Vec<ConversationTurn>,
    /// Expected classification outcome.
    pub expected: ExpectedOutcome,
    /// Optional free-text rationale for the expectation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// A named, versioned, ordered collection of cases.
///
/// # Invariants
/// - `cases` is non-empty and case identifiers are unique.
/// - `id` is filesystem-safe (lowercase alphanumeric, `-`, `_`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    /// Suite identifier, used to name the report artifact.
    pub id: String,
    /// Semantic version string for the suite definition.
    pub version: String,
    /// Human description of the suite.
    pub description: String,
    /// Ordered case list.
    pub cases: Vec<Case>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating a suite document.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// The suite file could not be read.
    #[error("failed to read suite file {path}: {source}")]
    Read {
        /// Path of the suite file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The suite file exceeds the size limit.
    #[error("suite file {path} exceeds {limit} bytes")]
    TooLarge {
        /// Path of the suite file.
        path: PathBuf,
        /// Enforced byte limit.
        limit: u64,
    },
    /// The suite document is not valid JSON for the suite shape.
    #[error("malformed suite document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The suite identifier is empty, too long, or not filesystem-safe.
    #[error("invalid suite identifier '{id}'")]
    InvalidSuiteId {
        /// Offending identifier.
        id: String,
    },
    /// The suite version string is empty.
    #[error("suite '{id}' has an empty version")]
    EmptyVersion {
        /// Suite identifier.
        id: String,
    },
    /// The suite contains no cases.
    #[error("suite '{id}' contains no cases")]
    EmptyCases {
        /// Suite identifier.
        id: String,
    },
    /// A case identifier is empty or too long.
    #[error("invalid case identifier '{id}'")]
    InvalidCaseId {
        /// Offending identifier.
        id: String,
    },
    /// Two cases share the same identifier.
    #[error("duplicate case identifier '{id}'")]
    DuplicateCaseId {
        /// Duplicated identifier.
        id: String,
    },
    /// A case has no conversation turns.
    #[error("case '{id}' has no conversation turns")]
    EmptyConversation {
        /// Case identifier.
        id: String,
    },
    /// A confidence threshold lies outside `[0, 1]`.
    #[error("case '{id}' has confidence threshold {value} outside [0, 1]")]
    ConfidenceRange {
        /// Case identifier.
        id: String,
        /// Offending threshold value.
        value: f64,
    },
    /// An acceptable severity or imminence set is present but empty.
    #[error("case '{id}' has an empty acceptable {dimension} set")]
    EmptyAcceptableSet {
        /// Case identifier.
        id: String,
        /// Dimension name (`severity` or `imminence`).
        dimension: &'static str,
    },
    /// A domain expectation has an empty domain tag.
    #[error("case '{id}' has a domain expectation with an empty domain tag")]
    EmptyDomainTag {
        /// Case identifier.
        id: String,
    },
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl Suite {
    /// Parses and validates a suite from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError`] when the document is malformed or any
    /// validation rule fails.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, SuiteError> {
        let suite: Self = serde_json::from_slice(bytes)?;
        suite.validate()?;
        Ok(suite)
    }

    /// Validates suite invariants after parsing.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), SuiteError> {
        if !is_safe_identifier(&self.id) {
            return Err(SuiteError::InvalidSuiteId {
                id: self.id.clone(),
            });
        }
        if self.version.trim().is_empty() {
            return Err(SuiteError::EmptyVersion {
                id: self.id.clone(),
            });
        }
        if self.cases.is_empty() {
            return Err(SuiteError::EmptyCases {
                id: self.id.clone(),
            });
        }
        let mut seen = BTreeSet::new();
        for case in &self.cases {
            validate_case(case)?;
            if !seen.insert(case.id.as_str()) {
                return Err(SuiteError::DuplicateCaseId {
                    id: case.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Validates a single case record.
fn validate_case(case: &Case) -> Result<(), SuiteError> {
    if case.id.is_empty() || case.id.len() > MAX_IDENTIFIER_LENGTH {
        return Err(SuiteError::InvalidCaseId {
            id: case.id.clone(),
        });
    }
    if case.turns.is_empty() {
        return Err(SuiteError::EmptyConversation {
            id: case.id.clone(),
        });
    }
    validate_confidence(&case.id, case.expected.min_confidence)?;
    if case.expected.acceptable_severities.as_ref().is_some_and(Vec::is_empty) {
        return Err(SuiteError::EmptyAcceptableSet {
            id: case.id.clone(),
            dimension: "severity",
        });
    }
    if case.expected.acceptable_imminences.as_ref().is_some_and(Vec::is_empty) {
        return Err(SuiteError::EmptyAcceptableSet {
            id: case.id.clone(),
            dimension: "imminence",
        });
    }
    for domain in &case.expected.domains {
        if domain.domain.trim().is_empty() {
            return Err(SuiteError::EmptyDomainTag {
                id: case.id.clone(),
            });
        }
        if let Some(threshold) = domain.min_confidence {
            validate_confidence(&case.id, threshold)?;
        }
    }
    Ok(())
}

/// Validates a confidence threshold lies in `[0, 1]`.
fn validate_confidence(case_id: &str, value: f64) -> Result<(), SuiteError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(SuiteError::ConfidenceRange {
            id: case_id.to_string(),
            value,
        });
    }
    Ok(())
}

/// Returns true when an identifier is non-empty, bounded, and filesystem-safe.
fn is_safe_identifier(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_IDENTIFIER_LENGTH
        && id.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_')
}

/// Loads a suite document from a file with a bounded read.
///
/// # Errors
///
/// Returns [`SuiteError`] when the file cannot be read, exceeds
/// [`MAX_SUITE_FILE_BYTES`], or fails validation.
pub fn load_suite(path: &Path) -> Result<Suite, SuiteError> {
    let metadata = fs::metadata(path).map_err(|source| SuiteError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.len() > MAX_SUITE_FILE_BYTES {
        return Err(SuiteError::TooLarge {
            path: path.to_path_buf(),
            limit: MAX_SUITE_FILE_BYTES,
        });
    }
    let bytes = fs::read(path).map_err(|source| SuiteError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Suite::from_json_slice(&bytes)
}
