//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors raised while turning user input into an [`Endpoint`](crate::Endpoint).
///
/// These are configuration errors: the run stops before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// The input could not be parsed as an absolute URL.
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl {
        /// The rejected input
        url: String,
        /// Parser message
        reason: String,
    },

    /// The URL parsed but names no host.
    #[error("URL has no host: {0}")]
    MissingHost(String),

    /// The scheme is neither `http` nor `https`.
    #[error("Not supported format {0}")]
    UnsupportedScheme(String),
}

/// Errors that can occur while executing a single request.
///
/// Messages are stored as strings so the error can be cloned into the
/// [`Measurement`](crate::Measurement) it belongs to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// TCP connection could not be established.
    #[error("Error while creating connection: {0}")]
    Connect(String),

    /// TCP connect plus TLS handshake exceeded the configured bound.
    #[error("Connection timeout after {0}s")]
    ConnectTimeout(u64),

    /// The hostname is not a valid TLS server name.
    #[error("Invalid server name: {0}")]
    InvalidServerName(String),

    /// TLS handshake failed.
    #[error("TLS handshake failed: {0}")]
    TlsHandshake(String),

    /// Writing the request failed.
    #[error("Error while sending request: {0}")]
    Write(String),

    /// Reading the response failed before the peer closed the connection.
    #[error("Error while reading from connection: {0}")]
    Read(String),

    /// The response does not start with a parsable status line.
    #[error("Error while getting statusCode: {0}")]
    StatusLine(String),
}

/// Phases of a request, used to group per-request errors in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum RequestPhase {
    /// Resolving and connecting, including the TLS connect timeout
    Connect,
    /// TLS handshake
    Handshake,
    /// Sending the request
    Write,
    /// Reading the response
    Read,
    /// Parsing the status line
    StatusLine,
}

impl RequestPhase {
    /// Label used in log records.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPhase::Connect => "connect",
            RequestPhase::Handshake => "TLS handshake",
            RequestPhase::Write => "write",
            RequestPhase::Read => "read",
            RequestPhase::StatusLine => "status line",
        }
    }
}

impl std::fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RequestError {
    /// Returns the phase in which this error occurred.
    pub fn phase(&self) -> RequestPhase {
        match self {
            RequestError::Connect(_)
            | RequestError::ConnectTimeout(_)
            | RequestError::InvalidServerName(_) => RequestPhase::Connect,
            RequestError::TlsHandshake(_) => RequestPhase::Handshake,
            RequestError::Write(_) => RequestPhase::Write,
            RequestError::Read(_) => RequestPhase::Read,
            RequestError::StatusLine(_) => RequestPhase::StatusLine,
        }
    }
}
