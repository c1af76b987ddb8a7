//! TLS connector initialization.

use std::sync::Arc;

use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

/// Builds the TLS connector used for `https` endpoints.
///
/// Trust anchors come from the Mozilla root store bundled in `webpki-roots`,
/// so the result does not depend on the certificates installed on the host.
/// No client authentication is configured.
pub fn init_tls_connector() -> TlsConnector {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    log::debug!(
        "TLS connector initialized with {} trust anchors",
        webpki_roots::TLS_SERVER_ROOTS.len()
    );
    TlsConnector::from(Arc::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tls_connector_builds() {
        crate::initialization::init_crypto_provider();
        let _connector = init_tls_connector();
    }
}
