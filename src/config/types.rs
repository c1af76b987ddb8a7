//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::HTTPS_CONNECT_TIMEOUT;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Format of the profiling report printed at the end of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Line-oriented human-readable report (default)
    Text,
    /// Single JSON document
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use latency_probe::Config;
///
/// let config = Config {
///     url: "https://example.com/".to_string(),
///     profile: Some(10),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// URL to request
    pub url: String,

    /// Number of requests to send. `None` or `Some(1)` fetches the page once
    /// and returns its raw bytes instead of statistics.
    pub profile: Option<u32>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Report format for profiling runs
    pub output_format: OutputFormat,

    /// Bound on TCP connect plus TLS handshake for `https` endpoints
    pub tls_connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            profile: None,
            log_level: LogLevel::Error,
            log_format: LogFormat::Plain,
            output_format: OutputFormat::Text,
            tls_connect_timeout: HTTPS_CONNECT_TIMEOUT,
        }
    }
}

impl Config {
    /// Returns `true` when the run should aggregate statistics rather than
    /// print the raw page.
    pub fn is_profiling(&self) -> bool {
        matches!(self.profile, Some(count) if count > 1)
    }
}

/// Command-line options.
///
/// This struct is automatically generated by `clap` from the field attributes.
///
/// # Examples
///
/// ```bash
/// # Fetch a page once and print the raw response
/// latency_probe --url https://example.com/
///
/// # Profile an endpoint with 20 sequential requests
/// latency_probe -u https://example.com/ -p 20 --log-level info
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "latency_probe",
    about = "Sends raw HTTP/1.0 requests to a URL and reports latency and size statistics."
)]
pub struct Opt {
    /// URL to request (http or https)
    #[arg(short, long)]
    pub url: String,

    /// Number of requests to send; values above 1 print statistics
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub profile: Option<u32>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Error)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Report format: text|json
    #[arg(long = "output", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            url: opt.url,
            profile: opt.profile,
            log_level: opt.log_level,
            log_format: opt.log_format,
            output_format: opt.output_format,
            ..Default::default()
        }
    }
}
