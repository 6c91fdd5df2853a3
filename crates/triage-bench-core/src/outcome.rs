// crates/triage-bench-core/src/outcome.rs
// ============================================================================
// Module: Actual Classification Outcomes
// Description: Validated classifier response shapes.
// Purpose: Represent classifier output strictly parsed at the boundary.
// Dependencies: crate::scale, serde
// ============================================================================

//! ## Overview
//! Classifier responses are loosely shaped on the wire; this module defines
//! the validated in-memory form. Parsing happens once at the client boundary
//! (parse, don't trust): a payload missing required fields is surfaced as a
//! classifier failure instead of propagating a missing-field fault into
//! scoring. Outcomes are produced fresh per case and never mutated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::scale::Imminence;
use crate::scale::Severity;

// ============================================================================
// SECTION: Outcome Types
// ============================================================================

/// Per-domain assessment returned by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAssessment {
    /// Domain tag (for example `self_harm` or `harm_to_others`).
    pub domain: String,
    /// Severity assessed for the domain.
    pub severity: Severity,
    /// Imminence assessed for the domain.
    pub imminence: Imminence,
    /// Confidence for the domain assessment.
    pub confidence: f64,
    /// Optional risk features identified in the domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_factors: Option<Vec<String>>,
    /// Optional protective features identified in the domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protective_factors: Option<Vec<String>>,
}

/// Value of one legal or safeguarding flag in the classifier payload.
///
/// # Invariants
/// - Boolean-style flags populate `present`; rating-style flags populate
///   `level`. Either field may be absent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegalFlagValue {
    /// Boolean presence indicator (for example duty-to-warn).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present: Option<bool>,
    /// Enumerated level string (for example a jurisdictional risk rating).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// Overall classification outcome for one case.
///
/// # Invariants
/// - Produced fresh per case by the classifier client; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualOutcome {
    /// Overall severity.
    pub severity: Severity,
    /// Overall imminence.
    pub imminence: Imminence,
    /// Overall scalar confidence.
    pub confidence: f64,
    /// Per-domain assessments.
    #[serde(default)]
    pub domains: Vec<DomainAssessment>,
    /// Optional legal and safeguarding flags keyed by flag name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_flags: Option<BTreeMap<String, LegalFlagValue>>,
    /// Optional primary concern labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_concerns: Option<Vec<String>>,
}

impl ActualOutcome {
    /// Returns the placeholder outcome recorded when the classifier failed.
    ///
    /// Severity `none`, imminence `not_applicable`, confidence zero, and no
    /// domain or flag payloads.
    #[must_use]
    pub const fn failure_placeholder() -> Self {
        Self {
            severity: Severity::None,
            imminence: Imminence::NotApplicable,
            confidence: 0.0,
            domains: Vec::new(),
            legal_flags: None,
            primary_concerns: None,
        }
    }

    /// Finds the assessment for a domain tag, if the classifier produced one.
    #[must_use]
    pub fn domain(&self, tag: &str) -> Option<&DomainAssessment> {
        self.domains.iter().find(|assessment| assessment.domain == tag)
    }
}
