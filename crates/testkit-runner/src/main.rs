//! testkit-runner
//!
//! Usage: `testkit-runner <command> [args...]`
//!
//! Runs a test binary with verbose output, prints a summary (or JSON when
//! `TESTKIT_OUTPUT=json`), and exits non-zero when any package failed.

use anyhow::{bail, Context, Result};
use std::process::ExitCode;
use testkit_runner::results::print_summary;
use testkit_runner::{run_failed, run_test_binary, OutputFormat, RunnerConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so JSON output stays clean
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut argv = std::env::args().skip(1);
    let Some(command) = argv.next() else {
        bail!("usage: testkit-runner <command> [args...]");
    };
    let args: Vec<String> = argv.collect();

    let config = RunnerConfig::from_env().context("Invalid runner configuration")?;

    let packages = run_test_binary(&config, &command, args)
        .await
        .with_context(|| format!("Running {}", command))?;

    match config.output_format {
        OutputFormat::Summary => print_summary(&packages),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&packages)?),
    }

    if run_failed(&config, &packages) {
        info!("Test run failed");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
