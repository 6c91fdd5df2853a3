// crates/triage-bench-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults Tests
// Description: Validate default values and per-field bounds.
// Purpose: Ensure configuration validation is strict and fail-closed.
// =============================================================================

//! Default and field validation tests for triage-bench-config.

use std::path::PathBuf;

use triage_bench_config::ConfigError;
use triage_bench_config::TriageBenchConfig;

type TestResult = Result<(), String>;

fn parse(content: &str) -> Result<TriageBenchConfig, String> {
    toml::from_str(content).map_err(|err| err.to_string())
}

fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}

#[test]
fn defaults_are_valid_and_bounded() -> TestResult {
    let config = TriageBenchConfig::default();
    config.validate().map_err(|err| err.to_string())?;
    if config.runner.lanes != 10 {
        return Err(format!("unexpected default lanes {}", config.runner.lanes));
    }
    if config.classifier.timeout_ms != 30_000 {
        return Err(format!("unexpected default timeout {}", config.classifier.timeout_ms));
    }
    if config.report.output_dir != PathBuf::from("reports") {
        return Err("unexpected default output dir".to_string());
    }
    Ok(())
}

#[test]
fn empty_document_parses_to_defaults() -> TestResult {
    let config = parse("")?;
    if config != TriageBenchConfig::default() {
        return Err("empty document did not produce defaults".to_string());
    }
    Ok(())
}

#[test]
fn populated_document_overrides_defaults() -> TestResult {
    let config = parse(
        r#"
        [classifier]
        endpoint = "https://classifier.example.com/v1/classify"
        timeout_ms = 5000

        [runner]
        lanes = 4

        [report]
        output_dir = "artifacts"
        "#,
    )?;
    config.validate().map_err(|err| err.to_string())?;
    if config.classifier.endpoint.as_deref() != Some("https://classifier.example.com/v1/classify") {
        return Err("endpoint not applied".to_string());
    }
    if config.classifier.timeout_ms != 5_000 || config.runner.lanes != 4 {
        return Err("overrides not applied".to_string());
    }
    if config.report.output_dir != PathBuf::from("artifacts") {
        return Err("output dir not applied".to_string());
    }
    Ok(())
}

#[test]
fn zero_lanes_are_rejected() -> TestResult {
    let config = parse("[runner]\nlanes = 0\n")?;
    assert_invalid(config.validate(), "runner.lanes")
}

#[test]
fn excessive_lanes_are_rejected() -> TestResult {
    let config = parse("[runner]\nlanes = 65\n")?;
    assert_invalid(config.validate(), "runner.lanes")
}

#[test]
fn timeout_below_minimum_is_rejected() -> TestResult {
    let config = parse("[classifier]\ntimeout_ms = 5\n")?;
    assert_invalid(config.validate(), "classifier.timeout_ms")
}

#[test]
fn timeout_above_maximum_is_rejected() -> TestResult {
    let config = parse("[classifier]\ntimeout_ms = 900000\n")?;
    assert_invalid(config.validate(), "classifier.timeout_ms")
}

#[test]
fn cleartext_endpoint_requires_allow_http() -> TestResult {
    let config = parse("[classifier]\nendpoint = \"http://localhost:8080/v1/classify\"\n")?;
    assert_invalid(config.validate(), "allow_http")
}

#[test]
fn cleartext_endpoint_is_accepted_when_opted_in() -> TestResult {
    let config = parse(
        "[classifier]\nendpoint = \"http://localhost:8080/v1/classify\"\nallow_http = true\n",
    )?;
    config.validate().map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn malformed_endpoint_is_rejected() -> TestResult {
    let config = parse("[classifier]\nendpoint = \"not a url\"\n")?;
    assert_invalid(config.validate(), "classifier.endpoint")
}

#[test]
fn empty_auth_token_is_rejected() -> TestResult {
    let config = parse("[classifier]\nauth_token = \"\"\n")?;
    assert_invalid(config.validate(), "classifier.auth_token")
}

#[test]
fn oversized_auth_token_is_rejected() -> TestResult {
    let token = "a".repeat(300);
    let config = parse(&format!("[classifier]\nauth_token = \"{token}\"\n"))?;
    assert_invalid(config.validate(), "classifier.auth_token")
}

#[test]
fn options_table_is_preserved() -> TestResult {
    let config = parse("[classifier.options]\nmodel = \"triage-v2\"\nthreshold = 0.5\n")?;
    let Some(options) = config.classifier.options else {
        return Err("options table was dropped".to_string());
    };
    let Some(model) = options.get("model").and_then(toml::Value::as_str) else {
        return Err("options.model missing".to_string());
    };
    if model != "triage-v2" {
        return Err(format!("unexpected options.model {model}"));
    }
    Ok(())
}
