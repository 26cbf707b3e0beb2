//! TLS utilities for the SBI server
//!
//! Certificate and key loading plus rustls configuration builders for
//! server-TLS and mutual-TLS on the SBI interface. TLS 1.3 only, with the
//! X25519 and P-256 key exchange groups and the AES-GCM suites.

use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};

use crate::error::{SbiError, SbiResult};

/// Ring crypto provider restricted to the SBI cipher suites and curves.
fn provider() -> Arc<CryptoProvider> {
    let ring = rustls::crypto::ring::default_provider();
    let cipher_suites = ring
        .cipher_suites
        .iter()
        .filter(|suite| {
            matches!(
                suite.suite(),
                rustls::CipherSuite::TLS13_AES_128_GCM_SHA256
                    | rustls::CipherSuite::TLS13_AES_256_GCM_SHA384
            )
        })
        .copied()
        .collect();
    let kx_groups = ring
        .kx_groups
        .iter()
        .filter(|group| {
            matches!(
                group.name(),
                rustls::NamedGroup::X25519 | rustls::NamedGroup::secp256r1
            )
        })
        .copied()
        .collect();
    Arc::new(CryptoProvider {
        cipher_suites,
        kx_groups,
        ..ring
    })
}

/// Load PEM-encoded certificates from a file path.
pub fn load_certs(path: &str) -> SbiResult<Vec<CertificateDer<'static>>> {
    let file = File::open(path)
        .map_err(|e| SbiError::TlsError(format!("Failed to open cert file {path}: {e}")))?;
    let mut reader = BufReader::new(file);

    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SbiError::TlsError(format!("Failed to parse certs from {path}: {e}")))?;

    if certs.is_empty() {
        return Err(SbiError::TlsError(format!(
            "No certificates found in {path}"
        )));
    }

    Ok(certs)
}

/// Load a PEM-encoded private key from a file path.
pub fn load_private_key(path: &str) -> SbiResult<PrivateKeyDer<'static>> {
    let file = File::open(path)
        .map_err(|e| SbiError::TlsError(format!("Failed to open key file {path}: {e}")))?;
    let mut reader = BufReader::new(file);

    let key = rustls_pemfile::private_key(&mut reader)
        .map_err(|e| SbiError::TlsError(format!("Failed to parse key from {path}: {e}")))?
        .ok_or_else(|| SbiError::TlsError(format!("No private key found in {path}")))?;

    Ok(key)
}

/// Build a `RootCertStore` from a CA certificate file.
fn load_root_store(ca_path: &str) -> SbiResult<RootCertStore> {
    let ca_certs = load_certs(ca_path)?;
    let mut root_store = RootCertStore::empty();
    for cert in ca_certs {
        root_store
            .add(cert)
            .map_err(|e| SbiError::TlsError(format!("Failed to add CA cert: {e}")))?;
    }
    Ok(root_store)
}

/// Build a server-side TLS config (no client auth).
pub fn build_server_config(
    certs: Vec<CertificateDer<'static>>,
    key: PrivateKeyDer<'static>,
) -> SbiResult<ServerConfig> {
    ServerConfig::builder_with_provider(provider())
        .with_protocol_versions(&[&rustls::version::TLS13])
        .map_err(|e| SbiError::TlsError(format!("Failed to set protocol versions: {e}")))?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| SbiError::TlsError(format!("Failed to build server TLS config: {e}")))
}

/// Build a server-side TLS config with mutual TLS: client certificates are
/// required and verified against the CA file.
pub fn build_server_config_mtls(
    certs: Vec<CertificateDer<'static>>,
    key: PrivateKeyDer<'static>,
    client_ca_path: &str,
) -> SbiResult<ServerConfig> {
    let root_store = load_root_store(client_ca_path)?;

    let client_verifier = WebPkiClientVerifier::builder_with_provider(
        Arc::new(root_store),
        provider(),
    )
    .build()
    .map_err(|e| SbiError::TlsError(format!("Failed to build client verifier: {e}")))?;

    ServerConfig::builder_with_provider(provider())
        .with_protocol_versions(&[&rustls::version::TLS13])
        .map_err(|e| SbiError::TlsError(format!("Failed to set protocol versions: {e}")))?
        .with_client_cert_verifier(client_verifier)
        .with_single_cert(certs, key)
        .map_err(|e| SbiError::TlsError(format!("Failed to build mTLS server config: {e}")))
}
