//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `latency_probe` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Printing the fetched page or the profiling report
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use latency_probe::initialization::{init_crypto_provider, init_logger_with};
use latency_probe::{run, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // Invalid options (missing URL, non-positive profile count) exit here with status 2
    let config = Config::from(Opt::parse());

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    match run(config).await {
        Ok(output) => {
            println!("{}", output.text());
            Ok(())
        }
        Err(e) => {
            eprintln!("latency_probe error: {:#}", e);
            process::exit(1);
        }
    }
}
