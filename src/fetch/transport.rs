//! Plain and TLS transports.
//!
//! A [`Transport`] is opened per request and closed before the executor
//! returns; connections are never reused.

use std::io::ErrorKind;
use std::time::Duration;

use log::{debug, warn};
use rustls::pki_types::ServerName;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;

use crate::endpoint::{Endpoint, Scheme};
use crate::error_handling::RequestError;

/// An open connection to an endpoint.
pub enum Transport {
    /// `http` over TCP
    Plain(TcpStream),
    /// `https` over TLS
    Tls(Box<TlsStream<TcpStream>>),
}

impl Transport {
    /// Opens a connection suited to the endpoint's scheme.
    ///
    /// `http` connects over TCP with no timeout beyond the operating system's.
    /// `https` bounds TCP connect plus TLS handshake by `tls_timeout`.
    pub async fn connect(
        endpoint: &Endpoint,
        connector: &TlsConnector,
        tls_timeout: Duration,
    ) -> Result<Self, RequestError> {
        let (host, port) = endpoint.socket_addr();
        debug!("Connecting to {host}:{port} ({})", endpoint.scheme());

        match endpoint.scheme() {
            Scheme::Http => {
                let sock = TcpStream::connect((host, port))
                    .await
                    .map_err(|e| RequestError::Connect(format!("{host}:{port} - {e}")))?;
                Ok(Transport::Plain(sock))
            }
            Scheme::Https => {
                let server_name = ServerName::try_from(host.to_string())
                    .map_err(|e| RequestError::InvalidServerName(format!("{host}: {e}")))?;

                let handshake = async {
                    let sock = TcpStream::connect((host, port))
                        .await
                        .map_err(|e| RequestError::Connect(format!("{host}:{port} - {e}")))?;
                    connector
                        .connect(server_name, sock)
                        .await
                        .map_err(|e| RequestError::TlsHandshake(format!("{host} - {e}")))
                };

                match tokio::time::timeout(tls_timeout, handshake).await {
                    Ok(Ok(stream)) => Ok(Transport::Tls(Box::new(stream))),
                    Ok(Err(e)) => Err(e),
                    Err(_) => Err(RequestError::ConnectTimeout(tls_timeout.as_secs())),
                }
            }
        }
    }

    /// Writes the whole request and flushes it.
    pub async fn send(&mut self, request: &[u8]) -> Result<(), RequestError> {
        let result = match self {
            Transport::Plain(stream) => write_and_flush(stream, request).await,
            Transport::Tls(stream) => write_and_flush(stream, request).await,
        };
        result.map_err(|e| RequestError::Write(e.to_string()))
    }

    /// Reads until the peer closes the connection, appending to `buf`.
    ///
    /// Bytes received before a read error stay in `buf`. A TLS peer that
    /// closes the socket without sending `close_notify` surfaces as
    /// `UnexpectedEof`; that is the normal end of an HTTP/1.0 response.
    pub async fn receive(&mut self, buf: &mut Vec<u8>) -> Result<(), RequestError> {
        let result = match self {
            Transport::Plain(stream) => stream.read_to_end(buf).await,
            Transport::Tls(stream) => stream.read_to_end(buf).await,
        };
        match result {
            Ok(n) => {
                debug!("Read {n} bytes before peer closed the connection");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                debug!("Peer closed without close_notify after {} bytes", buf.len());
                Ok(())
            }
            Err(e) => Err(RequestError::Read(e.to_string())),
        }
    }

    /// Shuts the connection down. Failures are logged, not returned.
    pub async fn close(self) {
        let result = match self {
            Transport::Plain(mut stream) => stream.shutdown().await,
            Transport::Tls(mut stream) => stream.shutdown().await,
        };
        if let Err(e) = result {
            // The peer has usually closed already; the socket is dropped either way
            match e.kind() {
                ErrorKind::NotConnected | ErrorKind::BrokenPipe => {
                    debug!("Connection already closed by peer: {e}")
                }
                _ => warn!("Error while closing connection: {e}"),
            }
        }
    }
}

async fn write_and_flush<S>(stream: &mut S, request: &[u8]) -> std::io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    stream.write_all(request).await?;
    stream.flush().await
}
