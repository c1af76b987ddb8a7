//! latency_probe library: raw HTTP/HTTPS latency profiling
//!
//! This library sends minimal HTTP/1.0 requests over plain TCP or TLS, times
//! each round trip, and reduces a run of measurements into latency and
//! response-size statistics.
//!
//! # Example
//!
//! ```no_run
//! use latency_probe::{run, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     url: "https://example.com/".to_string(),
//!     profile: Some(5),
//!     ..Default::default()
//! };
//!
//! let output = run(config).await?;
//! println!("{}", output.text());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
mod endpoint;
mod error_handling;
mod fetch;
pub mod initialization;
mod statistics;

// Re-export public API
pub use app::{format_report, Report};
pub use config::{Config, LogFormat, LogLevel, Opt, OutputFormat};
pub use endpoint::{Endpoint, Scheme};
pub use error_handling::{EndpointError, InitializationError, RequestError, RequestPhase};
pub use fetch::{build_request, parse_status_code, Executor, Measurement};
pub use run::{run, RunOutput};
pub use statistics::{aggregate, mean, median, success_percentage, Partition, Summary};

// Internal run module (contains the fetch/profile orchestration)
mod run {
    use anyhow::{Context, Result};
    use log::{debug, info};

    use crate::app::{format_report, log_error_statistics};
    use crate::config::Config;
    use crate::endpoint::Endpoint;
    use crate::fetch::Executor;
    use crate::statistics::{aggregate, Summary};

    /// Result of a run, ready for printing.
    #[derive(Debug, Clone)]
    pub enum RunOutput {
        /// Raw response of a single request (fetch mode)
        Page(String),
        /// Statistics over several requests (profiling mode)
        Profile {
            /// Number of requests sent
            requests: u32,
            /// Aggregated statistics
            summary: Summary,
            /// Report formatted per the configured output format
            rendered: String,
        },
    }

    impl RunOutput {
        /// Text to print for this run.
        pub fn text(&self) -> &str {
            match self {
                RunOutput::Page(page) => page,
                RunOutput::Profile { rendered, .. } => rendered,
            }
        }
    }

    /// Runs a fetch or a profiling session with the provided configuration.
    ///
    /// With `profile` unset or `1`, the URL is fetched once and the raw
    /// response is returned. With a larger count, that many requests are sent
    /// one after another and their statistics are returned.
    ///
    /// Per-request failures do not fail the run; they are logged and folded
    /// into the statistics.
    ///
    /// # Errors
    ///
    /// This function will return an error if the URL is invalid or uses a
    /// scheme other than `http` or `https`, or if the JSON report cannot be
    /// serialized.
    pub async fn run(config: Config) -> Result<RunOutput> {
        let endpoint = Endpoint::parse(&config.url).context("Enter valid url")?;
        let executor = Executor::from_config(&config);

        match config.profile {
            Some(count) if config.is_profiling() => {
                info!(
                    "Fetch url metrics: hostname={}, scheme={}, path={}, profileCount={}",
                    endpoint.hostname(),
                    endpoint.scheme(),
                    endpoint.path(),
                    count
                );

                let measurements = executor.profile(&endpoint, count).await;
                log_error_statistics(&measurements);

                let summary = aggregate(&measurements);
                debug!("Summary for {} requests: {:?}", count, summary);

                let rendered = format_report(&summary, count, config.output_format)
                    .context("Failed to serialize report")?;
                Ok(RunOutput::Profile {
                    requests: count,
                    summary,
                    rendered,
                })
            }
            _ => {
                info!(
                    "Fetch page: hostname={}, scheme={}, path={}",
                    endpoint.hostname(),
                    endpoint.scheme(),
                    endpoint.path()
                );
                Ok(RunOutput::Page(executor.fetch_page(&endpoint).await))
            }
        }
    }
}
