//! Request targets.
//!
//! An [`Endpoint`] is built once from user input and is immutable afterwards.
//! The scheme is checked at construction, so the executor never sees an
//! unsupported protocol.

use std::fmt;

use log::debug;
use strum_macros::{Display, EnumString};
use url::Url;

use crate::config::{DEFAULT_HTTPS_PORT, DEFAULT_HTTP_PORT};
use crate::error_handling::EndpointError;

/// Transport used to reach an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Scheme {
    /// Plain TCP
    Http,
    /// TLS over TCP
    Https,
}

impl Scheme {
    /// Parses a scheme name, rejecting anything but `http` and `https`.
    pub fn parse(name: &str) -> Result<Self, EndpointError> {
        name.parse()
            .map_err(|_| EndpointError::UnsupportedScheme(name.to_string()))
    }

    /// Port used when the URL does not name one.
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => DEFAULT_HTTP_PORT,
            Scheme::Https => DEFAULT_HTTPS_PORT,
        }
    }
}

/// Target of a request: host, port, request path, and scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    hostname: String,
    port: u16,
    path: String,
    scheme: Scheme,
}

impl Endpoint {
    /// Creates an endpoint from already-split parts.
    ///
    /// The port defaults to the scheme's well-known port and an empty path
    /// becomes `/`. `hostname` and `path` are used literally in the request.
    ///
    /// # Errors
    ///
    /// Returns `EndpointError::UnsupportedScheme` if `scheme` is not `http`
    /// or `https`.
    pub fn new(
        hostname: impl Into<String>,
        path: impl Into<String>,
        scheme: &str,
    ) -> Result<Self, EndpointError> {
        let scheme = Scheme::parse(scheme)?;
        let path = path.into();
        Ok(Self {
            hostname: hostname.into(),
            port: scheme.default_port(),
            path: if path.is_empty() { "/".to_string() } else { path },
            scheme,
        })
    }

    /// Returns a copy of this endpoint that connects to `port`.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Parses and validates a URL.
    ///
    /// The URL must be absolute, carry a host, and use `http` or `https`.
    /// The query string, if any, is kept on the request target; the fragment
    /// is dropped.
    ///
    /// # Errors
    ///
    /// - `EndpointError::InvalidUrl` if the input does not parse
    /// - `EndpointError::UnsupportedScheme` for any other scheme
    /// - `EndpointError::MissingHost` if the URL has no host
    pub fn parse(input: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(input).map_err(|e| EndpointError::InvalidUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;

        let scheme = Scheme::parse(url.scheme())?;

        let hostname = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(EndpointError::MissingHost(input.to_string())),
        };

        let mut path = url.path().to_string();
        if path.is_empty() {
            path.push('/');
        }
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        let endpoint = Self {
            hostname,
            port: url.port().unwrap_or_else(|| scheme.default_port()),
            path,
            scheme,
        };
        debug!(
            "Parsed endpoint: hostname={}, port={}, path={}, scheme={}",
            endpoint.hostname, endpoint.port, endpoint.path, endpoint.scheme
        );
        Ok(endpoint)
    }

    /// Host as written in the URL, sent in the `Host` header.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Port to connect to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Request target sent on the request line (path plus query).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Transport the endpoint is reached over.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Host and port to connect to.
    ///
    /// IPv6 literals are stored bracketed (as they appear in the `Host`
    /// header); the brackets are removed here so the address resolves.
    pub fn socket_addr(&self) -> (&str, u16) {
        let host = self
            .hostname
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(&self.hostname);
        (host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}:{}{}",
            self.scheme, self.hostname, self.port, self.path
        )
    }
}
