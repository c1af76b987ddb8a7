//! Outcome of a single request.

use std::time::Duration;

use crate::config::SUCCESS_STATUS;
use crate::error_handling::RequestError;

/// One request's outcome, created once per attempt by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    /// Status code from the status line, `0` when it could not be read
    pub status_code: u16,
    /// Raw bytes received: status line, headers, and body
    pub response: Vec<u8>,
    /// Wall-clock time from the start of connect to the end of the read
    pub duration: Duration,
    /// First error hit while executing the request, if any
    pub error: Option<RequestError>,
}

impl Measurement {
    /// Creates a measurement with no recorded error.
    pub fn new(status_code: u16, response: Vec<u8>, duration: Duration) -> Self {
        Self {
            status_code,
            response,
            duration,
            error: None,
        }
    }

    /// A request succeeded iff its status code is 200.
    pub fn is_success(&self) -> bool {
        self.status_code == SUCCESS_STATUS
    }

    /// Bytes received.
    pub fn response_len(&self) -> usize {
        self.response.len()
    }

    /// Latency in milliseconds with microsecond resolution.
    #[allow(clippy::cast_precision_loss)] // durations far below 2^53 µs
    pub fn latency_ms(&self) -> f64 {
        self.duration.as_micros() as f64 / 1000.0
    }

    /// Response as text; invalid UTF-8 sequences are replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.response).into_owned()
    }
}
