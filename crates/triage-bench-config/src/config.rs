// crates/triage-bench-config/src/config.rs
// ============================================================================
// Module: Harness Configuration
// Description: Configuration loading and validation for Triage Bench.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and value
//! limits. An absent default config file yields defaults so the CLI can run
//! entirely from flags; an explicitly named file that cannot be read is an
//! error. Invalid values fail closed.
//!
//! Security posture: config inputs are untrusted; credentials are read from
//! the environment in preference to the file.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "triage-bench.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "TRIAGE_BENCH_CONFIG";
/// Environment variable overriding the classifier bearer credential.
pub const TOKEN_ENV_VAR: &str = "TRIAGE_BENCH_TOKEN";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a bearer credential.
pub const MAX_TOKEN_LENGTH: usize = 256;
/// Minimum classifier request timeout in milliseconds.
pub const MIN_TIMEOUT_MS: u64 = 100;
/// Maximum classifier request timeout in milliseconds.
pub const MAX_TIMEOUT_MS: u64 = 600_000;
/// Default classifier request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Maximum number of concurrent lanes.
pub const MAX_LANES: usize = 64;
/// Default number of concurrent lanes.
pub const DEFAULT_LANES: usize = 10;
/// Default report output directory.
const DEFAULT_OUTPUT_DIR: &str = "reports";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Classifier endpoint configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierSection {
    /// Classifier evaluation endpoint URL.
    pub endpoint: Option<String>,
    /// Optional bearer credential (environment override takes precedence).
    pub auth_token: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Allow cleartext HTTP endpoints (disabled by default).
    pub allow_http: bool,
    /// Opaque options object forwarded with every classification request.
    pub options: Option<toml::Value>,
}

impl Default for ClassifierSection {
    fn default() -> Self {
        Self {
            endpoint: None,
            auth_token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            allow_http: false,
            options: None,
        }
    }
}

/// Task runner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunnerSection {
    /// Maximum number of concurrent classifier calls.
    pub lanes: usize,
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            lanes: DEFAULT_LANES,
        }
    }
}

/// Report artifact configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Directory receiving one artifact per suite.
    pub output_dir: PathBuf,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Triage Bench harness configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TriageBenchConfig {
    /// Classifier endpoint settings.
    pub classifier: ClassifierSection,
    /// Task runner settings.
    pub runner: RunnerSection,
    /// Report artifact settings.
    pub report: ReportSection,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl TriageBenchConfig {
    /// Loads configuration from an explicit path, the environment override,
    /// or the default filename.
    ///
    /// An absent default file yields defaults; an absent explicit or
    /// environment-selected file is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, exceeds the
    /// size limit, fails to parse, or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path);
        let bytes = match fs::read(&resolved) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => {
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                return Ok(config);
            }
            Err(err) => {
                return Err(ConfigError::Io(format!("{}: {err}", resolved.display())));
            }
        };
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Applies environment overrides for credentials.
    fn apply_env_overrides(&mut self) {
        if let Ok(token) = env::var(TOKEN_ENV_VAR)
            && !token.is_empty()
        {
            self.classifier.auth_token = Some(token);
        }
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.classifier.validate()?;
        self.runner.validate()?;
        Ok(())
    }
}

impl ClassifierSection {
    /// Validates endpoint, credential, and timeout settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any value violates its bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.endpoint {
            let url = Url::parse(endpoint)
                .map_err(|err| ConfigError::Invalid(format!("classifier.endpoint: {err}")))?;
            match url.scheme() {
                "https" => {}
                "http" if self.allow_http => {}
                other => {
                    return Err(ConfigError::Invalid(format!(
                        "classifier.endpoint scheme '{other}' requires classifier.allow_http"
                    )));
                }
            }
        }
        if let Some(token) = &self.auth_token
            && (token.is_empty() || token.len() > MAX_TOKEN_LENGTH)
        {
            return Err(ConfigError::Invalid(
                "classifier.auth_token must be non-empty and bounded".to_string(),
            ));
        }
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "classifier.timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        Ok(())
    }
}

impl RunnerSection {
    /// Validates lane bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the lane count violates its bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lanes == 0 || self.lanes > MAX_LANES {
            return Err(ConfigError::Invalid(format!(
                "runner.lanes must be between 1 and {MAX_LANES}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
///
/// The boolean is true when the path was explicitly requested and must
/// therefore exist.
fn resolve_path(path: Option<&Path>) -> (PathBuf, bool) {
    if let Some(path) = path {
        return (path.to_path_buf(), true);
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR)
        && !env_path.is_empty()
    {
        return (PathBuf::from(env_path), true);
    }
    (PathBuf::from(DEFAULT_CONFIG_NAME), false)
}
