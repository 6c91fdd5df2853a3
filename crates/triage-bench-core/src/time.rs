// crates/triage-bench-core/src/time.rs
// ============================================================================
// Module: Report Time Model
// Description: Canonical timestamp representation for report artifacts.
// Purpose: Keep report generation deterministic and replayable in tests.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The core never reads wall-clock time directly; hosts supply the report
//! generation timestamp. This keeps two runs against unchanged inputs
//! byte-identical except for the timestamp field, which tests rely on.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Canonical timestamp recorded in suite reports.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads
///   wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Timestamp {
    /// Unix epoch milliseconds.
    UnixMillis(i64),
    /// Monotonic logical time value used by deterministic tests.
    Logical(u64),
}

impl Timestamp {
    /// Returns the timestamp as unix milliseconds when available.
    #[must_use]
    pub const fn as_unix_millis(&self) -> Option<i64> {
        match self {
            Self::UnixMillis(value) => Some(*value),
            Self::Logical(_) => None,
        }
    }

    /// Returns the timestamp as logical time when available.
    #[must_use]
    pub const fn as_logical(&self) -> Option<u64> {
        match self {
            Self::UnixMillis(_) => None,
            Self::Logical(value) => Some(*value),
        }
    }
}
