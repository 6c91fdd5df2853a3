// crates/triage-bench-core/src/classifier.rs
// ============================================================================
// Module: Classifier Seam
// Description: Trait boundary between the harness and classifier transports.
// Purpose: Keep the core transport-agnostic and testable with stubs.
// Dependencies: async-trait, crate::outcome, crate::suite, thiserror
// ============================================================================

//! ## Overview
//! The classifier is a remote black box reachable over a request/response
//! interface. The core depends only on this trait; the HTTP implementation
//! lives in `triage-bench-client`. Every failure mode maps into
//! [`ClassifierError`], which case evaluation downgrades into a recoverable
//! per-case result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;

use crate::outcome::ActualOutcome;
use crate::suite::ConversationTurn;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Uniform failure signal for classifier calls.
///
/// # Invariants
/// - Variants are recoverable per case and never abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// Transport-level failure (connect, timeout, request build).
    #[error("classifier transport failure: {0}")]
    Transport(String),
    /// The endpoint returned a non-success status.
    #[error("classifier returned status {0}")]
    Status(u16),
    /// The response payload did not match the expected shape.
    #[error("classifier payload invalid: {0}")]
    Payload(String),
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Request/response interface to an external risk classifier.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classifies one ordered conversation, returning the parsed outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] for transport failures, non-success
    /// statuses, and malformed payloads.
    async fn classify(&self, turns: &[ConversationTurn]) -> Result<ActualOutcome, ClassifierError>;
}
