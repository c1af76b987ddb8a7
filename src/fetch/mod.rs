//! Request execution.
//!
//! This module sends one raw HTTP/1.0 request per call and times it:
//! 1. Start a monotonic timer
//! 2. Connect (TCP, or TCP + TLS handshake bounded by the connect timeout)
//! 3. Write `GET <path> HTTP/1.0` with a `Host` header
//! 4. Read until the peer closes the connection
//! 5. Stop the timer, parse the status line, close the transport
//!
//! Errors in any phase are logged and recorded on the [`Measurement`]; the
//! run continues with whatever bytes were received.

mod measurement;
mod request;
mod transport;


use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use tokio_rustls::TlsConnector;

use crate::config::{Config, PROFILE_PREALLOCATION_LIMIT, UNKNOWN_STATUS};
use crate::endpoint::Endpoint;
use crate::initialization::init_tls_connector;

pub use measurement::Measurement;
pub use request::{build_request, parse_status_code};
pub use transport::Transport;

/// Executes requests against endpoints.
///
/// Holds the TLS connector and connect timeout shared by every request of a
/// run. Build it once and pass it by reference.
#[derive(Clone)]
pub struct Executor {
    connector: TlsConnector,
    tls_connect_timeout: Duration,
}

impl Executor {
    /// Creates an executor from an existing connector.
    pub fn new(connector: TlsConnector, tls_connect_timeout: Duration) -> Self {
        Self {
            connector,
            tls_connect_timeout,
        }
    }

    /// Builds an executor with the bundled trust store and the configured
    /// TLS connect timeout.
    pub fn from_config(config: &Config) -> Self {
        Self::new(init_tls_connector(), config.tls_connect_timeout)
    }

    /// Sends one request to `endpoint` and measures it.
    ///
    /// Never fails: a connect, write, read, or status-line error is logged and
    /// stored in [`Measurement::error`], and the measurement keeps the bytes
    /// received so far. The status code is `0` when it could not be parsed.
    /// The connection is closed before this returns.
    pub async fn execute(&self, endpoint: &Endpoint) -> Measurement {
        debug!(
            "Sending request: hostname={}, path={}, scheme={}",
            endpoint.hostname(),
            endpoint.path(),
            endpoint.scheme()
        );
        let request = build_request(endpoint);
        let mut response = Vec::new();

        let start = Instant::now();
        let (transport, mut failure) =
            match Transport::connect(endpoint, &self.connector, self.tls_connect_timeout).await {
                Ok(mut transport) => {
                    let exchanged = match transport.send(request.as_bytes()).await {
                        Ok(()) => transport.receive(&mut response).await,
                        Err(e) => Err(e),
                    };
                    (Some(transport), exchanged.err())
                }
                Err(e) => (None, Some(e)),
            };
        let duration = start.elapsed();

        if let Some(e) = &failure {
            error!("Request to {endpoint} failed during {}: {e}", e.phase());
        }

        let status_code = match parse_status_code(&response) {
            Ok(code) => code,
            Err(e) => {
                // Parse failures after a transport error are a consequence of it
                if failure.is_none() {
                    warn!("{e}");
                    failure = Some(e);
                }
                UNKNOWN_STATUS
            }
        };

        if let Some(transport) = transport {
            transport.close().await;
        }
        // Profiling keeps every measurement until the run ends
        response.shrink_to_fit();

        Measurement {
            status_code,
            response,
            duration,
            error: failure,
        }
    }

    /// Fetches `endpoint` once and returns the raw response as text.
    pub async fn fetch_page(&self, endpoint: &Endpoint) -> String {
        let measurement = self.execute(endpoint).await;
        info!(
            "Fetched page: status={}, duration={}ms, bytes={}",
            measurement.status_code,
            measurement.duration.as_millis(),
            measurement.response_len()
        );
        measurement.body_text()
    }

    /// Sends `count` requests one after another and returns their measurements
    /// in order. Request *i+1* starts after request *i*'s connection is closed.
    pub async fn profile(&self, endpoint: &Endpoint, count: u32) -> Vec<Measurement> {
        let mut measurements = measurement_buffer(count);
        for attempt in 1..=count {
            let measurement = self.execute(endpoint).await;
            if log::log_enabled!(log::Level::Debug) {
                debug!(
                    "Profiling stats: attempt={}/{}, responseStatusCode={}, responseDurationInms={}, response={}",
                    attempt,
                    count,
                    measurement.status_code,
                    measurement.duration.as_millis(),
                    measurement.body_text()
                );
            }
            info!(
                "Profiling stats: attempt={}/{}, responseStatusCode={}, responseDurationInms={}",
                attempt,
                count,
                measurement.status_code,
                measurement.duration.as_millis()
            );
            measurements.push(measurement);
        }
        measurements
    }
}

/// Empty buffer for `count` measurements. Only a bounded number of slots is
/// reserved up front, so a huge count cannot fail before the first request.
fn measurement_buffer(count: u32) -> Vec<Measurement> {
    Vec::with_capacity(count.min(PROFILE_PREALLOCATION_LIMIT) as usize)
}
