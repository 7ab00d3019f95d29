// ── Runtime connection configuration ──
//
// Describes *how* to reach an orchestrator. It carries credentials and
// connection tuning but never touches disk: epgport-config builds a
// `ServerConfig` and the CLI hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use epgport_api::{Credentials, TlsMode, TransportConfig};

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CertificateVerification {
    /// System CA store (strict).
    SystemRoots,
    /// Custom CA bundle file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs). Default for lab orchestrators.
    #[default]
    Disabled,
}

/// Connection settings for a single orchestrator.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Hostname or address; may carry an explicit scheme (`http://lab-mso`).
    pub host: String,
    pub port: u16,
    pub certificate: CertificateVerification,
    pub user: String,
    pub password: SecretString,
    pub domain: String,
    /// Name of the API key to resolve after login.
    pub api_key_name: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ServerConfig {
    /// `https://{host}:{port}/`, or `{scheme}://{host}:{port}/` when the host
    /// names its own scheme.
    pub fn base_url(&self) -> Result<Url, CoreError> {
        let raw = if self.host.contains("://") {
            format!("{}:{}/", self.host.trim_end_matches('/'), self.port)
        } else {
            format!("https://{}:{}/", self.host, self.port)
        };
        Url::parse(&raw).map_err(|e| CoreError::Config {
            message: format!("invalid orchestrator address '{raw}': {e}"),
        })
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            user: self.user.clone(),
            password: self.password.clone(),
            domain: self.domain.clone(),
            api_key_name: self.api_key_name.clone(),
        }
    }

    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.certificate {
            CertificateVerification::SystemRoots => TlsMode::System,
            CertificateVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            CertificateVerification::Disabled => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
