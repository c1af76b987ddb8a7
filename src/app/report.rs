//! Report formatting for profiling runs.

use std::fmt;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::statistics::Summary;

/// Profiling result handed to the printer: the summary plus the request count.
///
/// `Display` renders the text report; `Serialize` the JSON one.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    /// Number of requests sent
    pub requests: u32,
    /// Statistics over those requests
    pub summary: &'a Summary,
}

/// Formats a profiling summary for `count` requests.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_report(
    summary: &Summary,
    count: u32,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    let report = Report {
        requests: count,
        summary,
    };
    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(&report),
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;
        writeln!(f, "Number of requests: {}", self.requests)?;
        writeln!(f, "Fastest Time: {} ms", summary.fastest_ms)?;
        writeln!(f, "Slowest Time: {} ms", summary.slowest_ms)?;
        writeln!(f, "Mean Time: {} ms", summary.mean_ms)?;
        writeln!(f, "Median Time: {} ms", summary.median_ms)?;
        writeln!(
            f,
            "Percentage requests that succeeded: {}%",
            summary.success_percentage
        )?;

        f.write_str("Error codes: [")?;
        for (i, code) in summary.error_status_codes.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{code}")?;
        }
        f.write_str("]\n")?;

        writeln!(
            f,
            "Size of bytes of the largest response: {} bytes",
            summary.largest_response
        )?;
        writeln!(
            f,
            "Size of bytes of the smallest response: {} bytes",
            summary.smallest_response
        )
    }
}
