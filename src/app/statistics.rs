//! Run statistics logging.

use log::info;

use crate::fetch::Measurement;
use crate::statistics::error_counts_by_phase;

/// Logs how many requests failed in each phase. Logs nothing when every
/// request completed.
pub fn log_error_statistics(measurements: &[Measurement]) {
    let counts = error_counts_by_phase(measurements);
    if counts.is_empty() {
        return;
    }

    let total: usize = counts.iter().map(|(_, count)| count).sum();
    info!("Request error counts ({} total):", total);
    for (phase, count) in counts {
        info!("   {}: {}", phase, count);
    }
}
