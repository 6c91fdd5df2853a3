// crates/triage-bench-core/src/scale.rs
// ============================================================================
// Module: Ordered Risk Scales
// Description: Severity and imminence classifications with total ordering.
// Purpose: Provide the fixed ordinal scales used by threshold checks.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Severity and imminence form small, fixed, totally ordered scales. The
//! ordering is load-bearing: minimum-threshold checks compare positions on
//! the scale, so variant declaration order must match the documented scale
//! order and is stable for serialization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Severity
// ============================================================================

/// Risk-intensity classification on a five-level ordered scale.
///
/// # Invariants
/// - Ordering follows declaration order: `none < mild < moderate < high <
///   critical`.
/// - Wire form is the lowercase variant name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// No detectable risk.
    #[default]
    None,
    /// Mild risk indicators.
    Mild,
    /// Moderate risk indicators.
    Moderate,
    /// High risk indicators.
    High,
    /// Critical risk indicators.
    Critical,
}

impl Severity {
    /// Returns the stable wire label for the severity level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Returns the ordinal position on the severity scale (0-based).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Imminence
// ============================================================================

/// Time-to-harm classification on a five-level ordered scale.
///
/// # Invariants
/// - Ordering follows declaration order: `not_applicable < chronic <
///   subacute < urgent < emergency`.
/// - Wire form is the lowercase variant name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Imminence {
    /// No applicable time horizon.
    #[default]
    NotApplicable,
    /// Chronic, long-horizon risk.
    Chronic,
    /// Subacute, medium-horizon risk.
    Subacute,
    /// Urgent, short-horizon risk.
    Urgent,
    /// Emergency, immediate risk.
    Emergency,
}

impl Imminence {
    /// Returns the stable wire label for the imminence level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotApplicable => "not_applicable",
            Self::Chronic => "chronic",
            Self::Subacute => "subacute",
            Self::Urgent => "urgent",
            Self::Emergency => "emergency",
        }
    }

    /// Returns the ordinal position on the imminence scale (0-based).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Imminence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
