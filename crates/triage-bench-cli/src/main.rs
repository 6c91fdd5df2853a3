// crates/triage-bench-cli/src/main.rs
// ============================================================================
// Module: Triage Bench CLI Entry Point
// Description: Command dispatcher for suite evaluation workflows.
// Purpose: Run evaluation suites against a classifier endpoint and persist reports.
// Dependencies: clap, serde_json, tokio, triage-bench-client, triage-bench-config, triage-bench-core.
// ============================================================================

//! ## Overview
//! The Triage Bench CLI loads evaluation suites, drives them against a
//! classifier endpoint, and writes one report artifact per suite. Per-case
//! classifier failures degrade into failing case results; per-suite load
//! failures in batch mode are reported and skipped; report write failures
//! abort the run. Security posture: suite files and configs are untrusted
//! input and are validated before use.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;
use triage_bench_client::ClassifierClient;
use triage_bench_client::ClassifierClientConfig;
use triage_bench_config::TriageBenchConfig;
use triage_bench_config::config::MAX_LANES;
use triage_bench_core::Classifier;
use triage_bench_core::SuiteReport;
use triage_bench_core::Timestamp;
use triage_bench_core::load_suite;
use triage_bench_core::run_suite;
use triage_bench_core::write_report;
use url::Url;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "triage-bench", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a single suite file and write its report.
    Run(RunCommand),
    /// Evaluate every suite file in a directory.
    RunAll(RunAllCommand),
    /// Parse and validate a suite file without contacting the classifier.
    Validate(ValidateCommand),
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
struct RunCommand {
    /// Path to the suite definition file.
    #[arg(long, value_name = "FILE")]
    suite: PathBuf,
    /// Shared endpoint and runner arguments.
    #[command(flatten)]
    common: CommonArgs,
}

/// Arguments for the `run-all` command.
#[derive(Args, Debug)]
struct RunAllCommand {
    /// Directory containing suite definition files.
    #[arg(long, value_name = "DIR")]
    suite_dir: PathBuf,
    /// Shared endpoint and runner arguments.
    #[command(flatten)]
    common: CommonArgs,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Path to the suite definition file.
    #[arg(long, value_name = "FILE")]
    suite: PathBuf,
}

/// Arguments shared by the evaluation commands.
#[derive(Args, Debug)]
struct CommonArgs {
    /// Path to the harness configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Classifier endpoint URL (overrides the configuration file).
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,
    /// Number of concurrent lanes (overrides the configuration file).
    #[arg(long, value_name = "N")]
    lanes: Option<usize>,
    /// Report output directory (overrides the configuration file).
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Allow cleartext HTTP endpoints.
    #[arg(long, action = ArgAction::SetTrue)]
    allow_http: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("triage-bench {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        write_stdout_line("run `triage-bench --help` for usage")
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Run(command) => command_run(command).await,
        Commands::RunAll(command) => command_run_all(command).await,
        Commands::Validate(command) => command_validate(&command),
    }
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command for a single suite file.
async fn command_run(command: RunCommand) -> CliResult<ExitCode> {
    let settings = resolve_settings(&command.common)?;
    let client = build_client(&settings)?;
    let generated_at = now_timestamp()?;

    let report = match run_suite_file(&command.suite, &client, settings.lanes, generated_at).await {
        Ok(report) => report,
        Err(message) => return Err(CliError::new(message)),
    };
    let artifact = write_report(&report, &settings.output_dir)
        .map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&format_suite_summary(&report, &artifact))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    if report.failed == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Executes the `run-all` command over every suite file in a directory.
///
/// Suite files that fail to load are reported on stderr and skipped; a
/// report write failure aborts the batch.
async fn command_run_all(command: RunAllCommand) -> CliResult<ExitCode> {
    let settings = resolve_settings(&command.common)?;
    let client = build_client(&settings)?;
    let paths = collect_suite_paths(&command.suite_dir)?;
    if paths.is_empty() {
        return Err(CliError::new(format!(
            "no suite files found in {}",
            command.suite_dir.display()
        )));
    }

    let mut any_failed = false;
    for path in paths {
        let generated_at = now_timestamp()?;
        match run_suite_file(&path, &client, settings.lanes, generated_at).await {
            Ok(report) => {
                let artifact = write_report(&report, &settings.output_dir)
                    .map_err(|err| CliError::new(err.to_string()))?;
                write_stdout_line(&format_suite_summary(&report, &artifact))
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
                if report.failed > 0 {
                    any_failed = true;
                }
            }
            Err(message) => {
                write_stderr_line(&message)
                    .map_err(|err| CliError::new(output_error("stderr", &err)))?;
                any_failed = true;
            }
        }
    }

    if any_failed {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Loads one suite file and evaluates it against the classifier.
async fn run_suite_file(
    path: &Path,
    client: &Arc<ClassifierClient>,
    lanes: usize,
    generated_at: Timestamp,
) -> Result<SuiteReport, String> {
    let suite = load_suite(path).map_err(|err| format!("{}: {err}", path.display()))?;
    let endpoint = client.endpoint().to_string();
    let classifier: Arc<dyn Classifier> = Arc::<ClassifierClient>::clone(client);
    Ok(run_suite(&suite, classifier, lanes, &endpoint, generated_at).await)
}

// ============================================================================
// SECTION: Validate Command
// ============================================================================

/// Executes the `validate` command.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let suite = load_suite(&command.suite)
        .map_err(|err| CliError::new(format!("{}: {err}", command.suite.display())))?;
    write_stdout_line(&format!(
        "suite {} version {} is valid ({} cases)",
        suite.id,
        suite.version,
        suite.cases.len()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Effective settings after merging flags over the configuration file.
struct RunSettings {
    /// Classifier client configuration.
    client_config: ClassifierClientConfig,
    /// Number of concurrent lanes.
    lanes: usize,
    /// Report output directory.
    output_dir: PathBuf,
}

/// Merges CLI flags over the loaded configuration file.
fn resolve_settings(common: &CommonArgs) -> CliResult<RunSettings> {
    let config =
        TriageBenchConfig::load(common.config.as_deref()).map_err(|err| CliError::new(err.to_string()))?;

    let endpoint_text = common
        .endpoint
        .clone()
        .or_else(|| config.classifier.endpoint.clone())
        .ok_or_else(|| CliError::new("no classifier endpoint configured".to_string()))?;
    let endpoint = Url::parse(&endpoint_text)
        .map_err(|err| CliError::new(format!("invalid endpoint {endpoint_text}: {err}")))?;

    let lanes = common.lanes.unwrap_or(config.runner.lanes);
    if lanes == 0 || lanes > MAX_LANES {
        return Err(CliError::new(format!("lanes must be between 1 and {MAX_LANES}")));
    }

    let mut client_config = ClassifierClientConfig::new(endpoint);
    client_config.auth_token = config.classifier.auth_token.clone();
    client_config.timeout_ms = config.classifier.timeout_ms;
    client_config.allow_http = common.allow_http || config.classifier.allow_http;
    client_config.options = options_to_json(config.classifier.options.as_ref())?;

    let output_dir = common.output_dir.clone().unwrap_or(config.report.output_dir);
    Ok(RunSettings {
        client_config,
        lanes,
        output_dir,
    })
}

/// Builds the shared classifier client from resolved settings.
fn build_client(settings: &RunSettings) -> CliResult<Arc<ClassifierClient>> {
    let client = ClassifierClient::new(settings.client_config.clone())
        .map_err(|err| CliError::new(err.to_string()))?;
    Ok(Arc::new(client))
}

/// Converts the configured options table into the request JSON object.
fn options_to_json(options: Option<&toml::Value>) -> CliResult<serde_json::Value> {
    match options {
        Some(value) => serde_json::to_value(value)
            .map_err(|err| CliError::new(format!("invalid classifier options: {err}"))),
        None => Ok(serde_json::Value::Object(serde_json::Map::new())),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Captures the current wall-clock time as a report timestamp.
fn now_timestamp() -> CliResult<Timestamp> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| CliError::new(format!("system clock before epoch: {err}")))?;
    let millis = i64::try_from(elapsed.as_millis())
        .map_err(|err| CliError::new(format!("timestamp out of range: {err}")))?;
    Ok(Timestamp::UnixMillis(millis))
}

/// Collects suite definition files from a directory in name order.
fn collect_suite_paths(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).map_err(|err| CliError::new(format!("{}: {err}", dir.display())))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| CliError::new(format!("{}: {err}", dir.display())))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Formats the one-line summary printed after a suite completes.
fn format_suite_summary(report: &SuiteReport, artifact: &Path) -> String {
    format!(
        "suite {}: {}/{} cases passed, aggregate {:.1}, report {}",
        report.suite_id,
        report.passed,
        report.total,
        report.aggregate_score,
        artifact.display()
    )
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
