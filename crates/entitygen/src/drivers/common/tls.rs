//! TLS configuration for PostgreSQL connections.
//!
//! The DSN's `sslmode` decides whether TLS is used and how the server
//! certificate is checked:
//!
//! | sslmode       | TLS                      | Certificate check         |
//! |---------------|--------------------------|---------------------------|
//! | `disable`     | never                    | none                      |
//! | `prefer`      | if the server offers it  | none                      |
//! | `require`     | always                   | none                      |
//! | `verify-ca`   | always                   | webpki roots              |
//! | `verify-full` | always                   | webpki roots and hostname |
//!
//! `prefer` is the default when the DSN names no mode. tokio-postgres only
//! understands the first three values, so [`split_ssl_mode`] reads the mode
//! and hands the driver a DSN it can parse.

use std::sync::Arc;

use rustls::ClientConfig;
use tokio_postgres_rustls::MakeRustlsConnect;
use tracing::{debug, info, warn};

use crate::error::{GenError, Result};

const SSLMODE_KEY: &str = "sslmode=";

/// SSL verification modes for PostgreSQL connections.
///
/// These modes match PostgreSQL's standard `sslmode` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslMode {
    /// No SSL/TLS (plain TCP connection).
    Disable,
    /// TLS when the server supports it, without certificate verification.
    #[default]
    Prefer,
    /// TLS without certificate verification.
    Require,
    /// Verify server certificate against CA but not hostname.
    VerifyCa,
    /// Full certificate and hostname verification.
    VerifyFull,
}

impl SslMode {
    /// Parse an SSL mode from a string.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "prefer" | "allow" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            other => Err(GenError::connection(
                "postgres",
                format!(
                    "invalid sslmode '{}'. Valid values: disable, prefer, require, verify-ca, verify-full",
                    other
                ),
            )),
        }
    }

    /// Check if this mode uses TLS at all.
    pub fn requires_tls(&self) -> bool {
        !matches!(self, SslMode::Disable)
    }

    /// Check if the server certificate is verified.
    pub fn verifies_certificate(&self) -> bool {
        matches!(self, SslMode::VerifyCa | SslMode::VerifyFull)
    }

    /// The `sslmode` value tokio-postgres is given.
    fn driver_value(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require | SslMode::VerifyCa | SslMode::VerifyFull => "require",
        }
    }
}

/// Read `sslmode` from a key/value or URL DSN.
///
/// Returns the mode and the DSN with `sslmode` rewritten to a value
/// tokio-postgres accepts. A DSN without `sslmode` yields [`SslMode::Prefer`].
pub fn split_ssl_mode(dsn: &str) -> Result<(SslMode, String)> {
    let lower = dsn.to_ascii_lowercase();
    let key_start = lower.match_indices(SSLMODE_KEY).map(|(i, _)| i).find(|&i| {
        i == 0 || matches!(lower.as_bytes()[i - 1], b' ' | b'\t' | b'\n' | b'?' | b'&')
    });

    let Some(key_start) = key_start else {
        return Ok((SslMode::default(), dsn.to_string()));
    };

    let value_start = key_start + SSLMODE_KEY.len();
    let value_end = dsn[value_start..]
        .find(|c: char| c.is_whitespace() || c == '&')
        .map(|i| i + value_start)
        .unwrap_or(dsn.len());

    let mode = SslMode::parse(&dsn[value_start..value_end])?;
    let rewritten = format!(
        "{}{}{}",
        &dsn[..value_start],
        mode.driver_value(),
        &dsn[value_end..]
    );

    Ok((mode, rewritten))
}

/// Builder for PostgreSQL TLS connections.
pub struct TlsBuilder {
    ssl_mode: SslMode,
}

impl TlsBuilder {
    /// Create a new TLS builder with the given SSL mode.
    pub fn new(ssl_mode: SslMode) -> Self {
        Self { ssl_mode }
    }

    /// Build a MakeRustlsConnect instance for tokio-postgres.
    ///
    /// Returns None if TLS is disabled.
    pub fn build(&self) -> Result<Option<MakeRustlsConnect>> {
        if !self.ssl_mode.requires_tls() {
            debug!("PostgreSQL TLS disabled by sslmode");
            return Ok(None);
        }

        let config = self.build_client_config()?;
        Ok(Some(MakeRustlsConnect::new(config)))
    }

    /// Build the underlying rustls ClientConfig.
    pub fn build_client_config(&self) -> Result<ClientConfig> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let builder = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| GenError::connection("postgres", format!("TLS setup failed: {}", e)))?;

        let config = match self.ssl_mode {
            SslMode::Disable => {
                return Err(GenError::connection(
                    "postgres",
                    "cannot build TLS config for sslmode=disable",
                ));
            }
            SslMode::Prefer | SslMode::Require => {
                warn!(
                    "sslmode={} encrypts the connection but does NOT verify the server \
                     certificate. Use sslmode=verify-full to verify it.",
                    self.ssl_mode.driver_value()
                );
                builder
                    .dangerous()
                    .with_custom_certificate_verifier(Arc::new(NoVerifier))
                    .with_no_client_auth()
            }
            SslMode::VerifyCa | SslMode::VerifyFull => {
                if self.ssl_mode == SslMode::VerifyCa {
                    warn!("sslmode=verify-ca also verifies the hostname (same as verify-full)");
                } else {
                    info!("sslmode=verify-full: certificate and hostname verification enabled");
                }
                let mut root_store = rustls::RootCertStore::empty();
                root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
                builder
                    .with_root_certificates(root_store)
                    .with_no_client_auth()
            }
        };

        Ok(config)
    }
}

/// Certificate verifier that accepts any certificate.
///
/// Used for `prefer` and `require`, where TLS only encrypts.
#[derive(Debug)]
struct NoVerifier;

impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls::pki_types::CertificateDer<'_>,
        _intermediates: &[rustls::pki_types::CertificateDer<'_>],
        _server_name: &rustls::pki_types::ServerName<'_>,
        _ocsp_response: &[u8],
        _now: rustls::pki_types::UnixTime,
    ) -> std::result::Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        vec![
            rustls::SignatureScheme::RSA_PKCS1_SHA256,
            rustls::SignatureScheme::RSA_PKCS1_SHA384,
            rustls::SignatureScheme::RSA_PKCS1_SHA512,
            rustls::SignatureScheme::ECDSA_NISTP256_SHA256,
            rustls::SignatureScheme::ECDSA_NISTP384_SHA384,
            rustls::SignatureScheme::ECDSA_NISTP521_SHA512,
            rustls::SignatureScheme::RSA_PSS_SHA256,
            rustls::SignatureScheme::RSA_PSS_SHA384,
            rustls::SignatureScheme::RSA_PSS_SHA512,
            rustls::SignatureScheme::ED25519,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_postgres::config::SslMode as DriverSslMode;

    #[test]
    fn test_ssl_mode_parsing() {
        assert_eq!(SslMode::parse("disable").unwrap(), SslMode::Disable);
        assert_eq!(SslMode::parse("prefer").unwrap(), SslMode::Prefer);
        assert_eq!(SslMode::parse("Require").unwrap(), SslMode::Require);
        assert_eq!(SslMode::parse("verify-ca").unwrap(), SslMode::VerifyCa);
        assert_eq!(SslMode::parse("verify-full").unwrap(), SslMode::VerifyFull);
        assert!(SslMode::parse("invalid").is_err());
    }

    #[test]
    fn test_default_dsn_prefers_tls_without_verification() {
        let (mode, dsn) = split_ssl_mode("host=localhost user=app dbname=app").unwrap();
        assert_eq!(mode, SslMode::Prefer);
        assert_eq!(dsn, "host=localhost user=app dbname=app");
        assert!(mode.requires_tls());
        assert!(!mode.verifies_certificate());
    }

    #[test]
    fn test_split_key_value_verify_full() {
        let (mode, dsn) =
            split_ssl_mode("host=db sslmode=verify-full dbname=app").unwrap();
        assert_eq!(mode, SslMode::VerifyFull);
        assert_eq!(dsn, "host=db sslmode=require dbname=app");

        let config: tokio_postgres::Config = dsn.parse().unwrap();
        assert_eq!(config.get_ssl_mode(), DriverSslMode::Require);
    }

    #[test]
    fn test_split_url_query() {
        let (mode, dsn) =
            split_ssl_mode("postgres://app@db/app?sslmode=verify-ca&connect_timeout=5").unwrap();
        assert_eq!(mode, SslMode::VerifyCa);
        assert_eq!(dsn, "postgres://app@db/app?sslmode=require&connect_timeout=5");

        let (mode, _) = split_ssl_mode("postgresql://app@db/app?sslmode=disable").unwrap();
        assert_eq!(mode, SslMode::Disable);
    }

    #[test]
    fn test_split_ignores_key_inside_other_values() {
        let (mode, dsn) = split_ssl_mode("host=db password=xsslmode=disable").unwrap();
        assert_eq!(mode, SslMode::Prefer);
        assert_eq!(dsn, "host=db password=xsslmode=disable");
    }

    #[test]
    fn test_split_invalid_mode_is_connection_error() {
        let err = split_ssl_mode("host=db sslmode=sometimes").unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("sometimes"));
    }

    #[test]
    fn test_disable_has_no_connector() {
        let builder = TlsBuilder::new(SslMode::Disable);
        assert!(builder.build().unwrap().is_none());
        assert!(builder.build_client_config().is_err());
    }

    #[test]
    fn test_every_tls_mode_builds() {
        for mode in [
            SslMode::Prefer,
            SslMode::Require,
            SslMode::VerifyCa,
            SslMode::VerifyFull,
        ] {
            assert!(TlsBuilder::new(mode).build().unwrap().is_some(), "{:?}", mode);
        }
    }

    #[test]
    fn test_only_verify_modes_check_certificates() {
        assert!(!SslMode::Prefer.verifies_certificate());
        assert!(!SslMode::Require.verifies_certificate());
        assert!(SslMode::VerifyCa.verifies_certificate());
        assert!(SslMode::VerifyFull.verifies_certificate());
    }
}
