//! Configuration constants.
//!
//! This module defines the constants used by the request executor and the
//! statistics aggregator.

use std::time::Duration;

// Network operation timeouts
/// Upper bound on TCP connect plus TLS handshake for `https` endpoints.
///
/// Plain `http` connects and all reads have no explicit timeout and rely on
/// the operating system defaults.
pub const HTTPS_CONNECT_TIMEOUT: Duration = Duration::from_secs(7);

// Ports used when the URL does not carry one
/// Port for `http` URLs without an explicit port.
pub const DEFAULT_HTTP_PORT: u16 = 80;
/// Port for `https` URLs without an explicit port.
pub const DEFAULT_HTTPS_PORT: u16 = 443;

/// The only status code counted as a successful request.
pub const SUCCESS_STATUS: u16 = 200;

/// Status code recorded when the status line could not be read or parsed.
pub const UNKNOWN_STATUS: u16 = 0;

// Status line parsing
/// Prefix of the HTTP-version token that opens every status line.
pub const STATUS_LINE_VERSION_PREFIX: &str = "HTTP/";
/// Number of ASCII digits in a status code token.
pub const STATUS_CODE_DIGITS: usize = 3;

/// Largest number of measurement slots reserved before a profiling run starts.
///
/// Longer runs grow the buffer as requests complete.
pub const PROFILE_PREALLOCATION_LIMIT: u32 = 1024;
