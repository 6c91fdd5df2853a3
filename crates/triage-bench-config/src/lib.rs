// crates/triage-bench-config/src/lib.rs
// ============================================================================
// Module: Triage Bench Configuration
// Description: Fail-closed configuration loading for the harness.
// Purpose: Provide strict TOML config parsing with hard limits.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size limits and
//! fail-closed validation. The classifier credential may be supplied through
//! the environment instead of the file so suite definitions and configs can
//! be committed without secrets.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ClassifierSection;
pub use config::ConfigError;
pub use config::ReportSection;
pub use config::RunnerSection;
pub use config::TriageBenchConfig;
