//! Latency and size statistics over a run's measurements.
//!
//! [`aggregate`] reduces the ordered measurements of a profiling run into a
//! [`Summary`]. Latency figures are taken from successful requests (status
//! 200) and fall back to the failed ones when nothing succeeded.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::error_handling::RequestPhase;
use crate::fetch::Measurement;


/// Aggregate statistics for a sequence of measurements.
///
/// Latencies are in milliseconds; sizes are in bytes. `Default` is the
/// zero-valued summary returned for an empty run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Lowest latency
    pub fastest_ms: f64,
    /// Highest latency
    pub slowest_ms: f64,
    /// Arithmetic mean latency
    pub mean_ms: f64,
    /// Median latency; mean of the two middle values for an even count
    pub median_ms: f64,
    /// Share of requests with status 200, from 0 to 100
    pub success_percentage: f64,
    /// Status code of every failed request, in the order they happened
    pub error_status_codes: Vec<u16>,
    /// Smallest response over all requests
    pub smallest_response: usize,
    /// Largest response over all requests
    pub largest_response: usize,
}

/// Measurements split by outcome, each side in input order.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    /// Requests that returned status 200
    pub successes: Vec<&'a Measurement>,
    /// Everything else, including requests with no status
    pub failures: Vec<&'a Measurement>,
}

impl<'a> Partition<'a> {
    /// Splits measurements into successes (status 200) and failures.
    pub fn of(measurements: &'a [Measurement]) -> Self {
        let (successes, failures): (Vec<_>, Vec<_>) =
            measurements.iter().partition(|m| m.is_success());
        Self {
            successes,
            failures,
        }
    }

    /// Number of measurements on both sides.
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Latencies of the side the latency statistics are computed over:
    /// successes when there are any, failures otherwise.
    pub fn latency_sample(&self) -> Vec<f64> {
        let side = if self.successes.is_empty() {
            &self.failures
        } else {
            &self.successes
        };
        side.iter().map(|m| m.latency_ms()).collect()
    }
}

/// Reduces a run's measurements into a [`Summary`].
///
/// Returns the zero-valued summary for an empty slice. Measurements whose
/// status line could not be parsed carry status `0` and count as failures.
pub fn aggregate(measurements: &[Measurement]) -> Summary {
    let Some(first) = measurements.first() else {
        debug!("No measurements to aggregate");
        return Summary::default();
    };

    for m in measurements {
        info!(
            "Processing stat: statResponseTime={:?}, statResponseCode={}, statResponseByteLen={}",
            m.duration,
            m.status_code,
            m.response_len()
        );
    }

    let partition = Partition::of(measurements);
    debug!(
        "Response Times: successTimes={:?}, failureTimes={:?}",
        partition
            .successes
            .iter()
            .map(|m| m.latency_ms())
            .collect::<Vec<_>>(),
        partition
            .failures
            .iter()
            .map(|m| m.latency_ms())
            .collect::<Vec<_>>()
    );

    let (smallest_response, largest_response) = response_size_bounds(first, measurements);

    let sample = partition.latency_sample();
    let fastest_ms = sample.iter().copied().fold(f64::INFINITY, f64::min);
    let slowest_ms = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean_ms = mean(&sample);
    let median_ms = median(&sample);
    debug!("Mean Time: meanTime={mean_ms}");
    debug!("Median Time: medianTime={median_ms}");

    let summary = Summary {
        fastest_ms,
        slowest_ms,
        mean_ms,
        median_ms,
        success_percentage: success_percentage(partition.successes.len(), partition.total()),
        error_status_codes: partition.failures.iter().map(|m| m.status_code).collect(),
        smallest_response,
        largest_response,
    };
    debug!("Aggregated summary: {summary:?}");
    summary
}

/// Smallest and largest response sizes, seeded from the first measurement.
///
/// Each later measurement is checked with `if smaller … else if larger …`:
/// it can move at most one bound, and a size equal to either bound or lying
/// between them moves neither.
fn response_size_bounds(first: &Measurement, measurements: &[Measurement]) -> (usize, usize) {
    let mut smallest = first.response_len();
    let mut largest = first.response_len();
    for m in &measurements[1..] {
        let len = m.response_len();
        if len < smallest {
            smallest = len;
        } else if len > largest {
            largest = len;
        }
    }
    (smallest, largest)
}

/// Percentage of successful requests, computed in floating point.
#[allow(clippy::cast_precision_loss)] // request counts are far below 2^53
pub fn success_percentage(successes: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    successes as f64 / total as f64 * 100.0
}

/// Arithmetic mean; `0.0` for an empty slice.
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        debug!("Attempted to find a mean for array with no values");
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median; the average of the two middle values for even lengths and `0.0`
/// for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Counts per-request errors by phase, skipping phases with no errors.
pub fn error_counts_by_phase(measurements: &[Measurement]) -> Vec<(RequestPhase, usize)> {
    RequestPhase::iter()
        .map(|phase| {
            let count = measurements
                .iter()
                .filter_map(|m| m.error.as_ref())
                .filter(|e| e.phase() == phase)
                .count();
            (phase, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}
