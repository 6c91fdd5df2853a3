// crates/triage-bench-client/src/client.rs
// ============================================================================
// Module: HTTP Classifier Client
// Description: Bounded HTTP client for classifier evaluation requests.
// Purpose: Map transport and protocol failures into uniform case failures.
// Dependencies: async-trait, reqwest, serde, serde_json, triage-bench-core
// ============================================================================

//! ## Overview
//! The client issues one POST per case to the classifier endpoint. Every
//! failure mode (connect errors, timeouts, non-success statuses, oversized
//! bodies, and payloads missing required fields) maps into
//! [`ClassifierError`] so the harness can downgrade it into a per-case
//! result. A bearer credential is optional; unauthenticated calls are a
//! valid configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::redirect::Policy;
use serde::Serialize;
use thiserror::Error;
use triage_bench_core::ActualOutcome;
use triage_bench_core::Classifier;
use triage_bench_core::ClassifierError;
use triage_bench_core::ConversationTurn;
use url::Url;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the HTTP classifier client.
///
/// # Invariants
/// - `allow_http = false` blocks cleartext `http://` endpoints.
/// - `timeout_ms` applies to the full request lifecycle.
/// - `max_response_bytes` is a hard upper bound on response bodies.
/// - URLs with embedded credentials are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierClientConfig {
    /// Classifier evaluation endpoint.
    pub endpoint: Url,
    /// Optional bearer credential; absence means unauthenticated calls.
    pub auth_token: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Allow cleartext HTTP (disabled by default).
    pub allow_http: bool,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    pub user_agent: String,
    /// Opaque options object forwarded with every request.
    pub options: serde_json::Value,
}

impl ClassifierClientConfig {
    /// Creates a configuration with default limits for an endpoint.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            auth_token: None,
            timeout_ms: 30_000,
            allow_http: false,
            max_response_bytes: 1024 * 1024,
            user_agent: "triage-bench/0.1".to_string(),
            options: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while constructing the classifier client.
#[derive(Debug, Error)]
pub enum ClientConfigError {
    /// The endpoint scheme is not allowed by policy.
    #[error("unsupported endpoint scheme '{0}'")]
    Scheme(String),
    /// The endpoint URL embeds credentials.
    #[error("endpoint credentials are not allowed")]
    Credentials,
    /// The underlying HTTP client could not be built.
    #[error("http client build failed: {0}")]
    Build(String),
}

// ============================================================================
// SECTION: Wire Shapes
// ============================================================================

/// Request payload posted to the classifier endpoint.
#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    /// Ordered conversation turns under evaluation.
    messages: &'a [ConversationTurn],
    /// Opaque configuration object forwarded unchanged.
    config: &'a serde_json::Value,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// HTTP implementation of the classifier seam.
///
/// # Invariants
/// - Redirects are not followed.
/// - Responses exceeding the configured size limit fail closed.
#[derive(Debug)]
pub struct ClassifierClient {
    /// Client configuration, including limits and policy.
    config: ClassifierClientConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl ClassifierClient {
    /// Creates a new classifier client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientConfigError`] when the endpoint violates scheme
    /// policy or the HTTP client cannot be created.
    pub fn new(config: ClassifierClientConfig) -> Result<Self, ClientConfigError> {
        validate_endpoint(&config.endpoint, config.allow_http)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| ClientConfigError::Build(err.to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Returns the endpoint label recorded in reports.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.config.endpoint.as_str()
    }
}

#[async_trait]
impl Classifier for ClassifierClient {
    async fn classify(&self, turns: &[ConversationTurn]) -> Result<ActualOutcome, ClassifierError> {
        let body = ClassifyRequest {
            messages: turns,
            config: &self.config.options,
        };
        let mut request = self.client.post(self.config.endpoint.clone()).json(&body);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                ClassifierError::Transport("request timed out".to_string())
            } else {
                ClassifierError::Transport(err.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::Status(status.as_u16()));
        }
        let bytes = read_body_limited(response, self.config.max_response_bytes).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ClassifierError::Payload(err.to_string()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates endpoint scheme and credential policy.
fn validate_endpoint(endpoint: &Url, allow_http: bool) -> Result<(), ClientConfigError> {
    match endpoint.scheme() {
        "https" => {}
        "http" if allow_http => {}
        other => return Err(ClientConfigError::Scheme(other.to_string())),
    }
    if !endpoint.username().is_empty() || endpoint.password().is_some() {
        return Err(ClientConfigError::Credentials);
    }
    Ok(())
}

/// Reads the response body while enforcing the byte limit.
///
/// The body is streamed chunk by chunk and the read stops as soon as the
/// accumulated length exceeds the limit, so an oversized body is never fully
/// buffered even without a `Content-Length` header.
async fn read_body_limited(
    mut response: reqwest::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, ClassifierError> {
    if let Some(expected) = response.content_length()
        && expected > u64::try_from(max_bytes).unwrap_or(u64::MAX)
    {
        return Err(ClassifierError::Payload("response exceeds size limit".to_string()));
    }
    let status: StatusCode = response.status();
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|err| {
        ClassifierError::Transport(format!("failed to read response ({status}): {err}"))
    })? {
        if body.len() + chunk.len() > max_bytes {
            return Err(ClassifierError::Payload("response exceeds size limit".to_string()));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
