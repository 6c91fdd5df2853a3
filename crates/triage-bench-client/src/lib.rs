// crates/triage-bench-client/src/lib.rs
// ============================================================================
// Module: Triage Bench Client
// Description: HTTP transport for the external risk classifier.
// Purpose: Implement the core classifier seam over a bounded HTTP client.
// Dependencies: async-trait, reqwest, serde, triage-bench-core, url
// ============================================================================

//! ## Overview
//! This crate implements [`triage_bench_core::Classifier`] against a remote
//! HTTP endpoint. Requests carry the ordered conversation turns plus an
//! opaque options object; responses are strictly parsed at this boundary so
//! malformed payloads surface as recoverable classifier failures. The client
//! enforces a bounded request timeout, disabled redirects, a response size
//! limit, and an https-only scheme policy unless cleartext is explicitly
//! allowed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ClassifierClient;
pub use client::ClassifierClientConfig;
pub use client::ClientConfigError;
