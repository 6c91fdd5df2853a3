// crates/triage-bench-core/src/lib.rs
// ============================================================================
// Module: Triage Bench Core
// Description: Data model, scoring, and runner for classifier evaluation.
// Purpose: Provide deterministic suite evaluation independent of transport.
// Dependencies: async-trait, serde, serde_json, thiserror, tokio
// ============================================================================

//! ## Overview
//! This crate holds the evaluation core of Triage Bench: the ordered risk
//! scales, suite and case definitions, the expectation checker, the
//! concurrency-bounded task runner, and the report aggregator. The core is
//! transport-agnostic: classifiers are reached through the [`Classifier`]
//! trait and the core never reads wall-clock time directly; hosts supply
//! timestamps when building reports.
//!
//! Invariants:
//! - Suites are validated at load and immutable afterwards.
//! - Report case order always matches suite case order, regardless of task
//!   completion order.
//! - Classifier failures degrade into per-case results and never abort a run.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod checker;
pub mod classifier;
pub mod harness;
pub mod outcome;
pub mod report;
pub mod result;
pub mod runner;
pub mod scale;
pub mod suite;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use checker::CaseEvaluation;
pub use checker::evaluate_case;
pub use classifier::Classifier;
pub use classifier::ClassifierError;
pub use harness::run_suite;
pub use outcome::ActualOutcome;
pub use outcome::DomainAssessment;
pub use outcome::LegalFlagValue;
pub use report::ReportError;
pub use report::SuiteReport;
pub use report::write_report;
pub use result::CaseResult;
pub use runner::run_pool;
pub use scale::Imminence;
pub use scale::Severity;
pub use suite::Case;
pub use suite::ConversationTurn;
pub use suite::DomainExpectation;
pub use suite::ExpectedOutcome;
pub use suite::FlagExpectation;
pub use suite::Suite;
pub use suite::SuiteError;
pub use suite::load_suite;
pub use time::Timestamp;
