//! Server configuration for epgport.
//!
//! Reads the orchestrator connection file (JSON), applies `EPGPORT_*`
//! environment overrides, resolves the password (file, env, or system
//! keyring), and translates the result into `epgport_core::ServerConfig`.
//! Nothing is cached: each call reads the file again.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Json},
    value::{Uncased, UncasedStr},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

use epgport_core::{CertificateVerification, ServerConfig};

/// File name searched for when no path is given.
pub const CONFIG_FILE_NAME: &str = "mso_server_config.json";

/// Prefix for environment overrides (`EPGPORT_HOST`, `EPGPORT_PASSWD`, ...).
pub const ENV_PREFIX: &str = "EPGPORT_";

const KEYRING_SERVICE: &str = "epgport";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found (searched: {searched})")]
    NotFound { searched: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for {user}@{host}")]
    NoCredentials { user: String, host: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── JSON config structs ─────────────────────────────────────────────

/// The on-disk server configuration.
///
/// ```json
/// { "host": "mso.example.com", "port": "443", "certificate": false,
///   "user": "admin", "passwd": "...", "domain": "local",
///   "apiKeyName": "automation" }
/// ```
#[derive(Debug, Deserialize)]
pub struct ServerFile {
    pub host: String,

    /// Accepted as a number or a numeric string.
    #[serde(deserialize_with = "port_number_or_string")]
    pub port: u16,

    /// `false` disables verification, `true` uses system roots, a string is
    /// a CA bundle path.
    #[serde(default)]
    pub certificate: Certificate,

    pub user: String,

    /// Plaintext password; falls back to the keyring when absent.
    #[serde(default)]
    pub passwd: Option<String>,

    pub domain: String,

    #[serde(rename = "apiKeyName")]
    pub api_key_name: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Certificate {
    Verify(bool),
    CaBundle(PathBuf),
}

impl Default for Certificate {
    fn default() -> Self {
        Self::Verify(false)
    }
}

impl From<Certificate> for CertificateVerification {
    fn from(cert: Certificate) -> Self {
        match cert {
            Certificate::Verify(false) => Self::Disabled,
            Certificate::Verify(true) => Self::SystemRoots,
            Certificate::CaBundle(path) => Self::CustomCa(path),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn port_number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid port '{text}'"))),
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Candidate locations, in search order: the working directory, then the
/// platform config directory.
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dirs) = ProjectDirs::from("org", "epgport", "epgport") {
        paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    paths
}

/// Pick the config file: `explicit` if given (it must exist), otherwise
/// the first existing default location.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let candidates = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => default_config_paths(),
    };

    candidates
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or_else(|| ConfigError::NotFound {
            searched: candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

// ── Config loading ──────────────────────────────────────────────────

/// Map `EPGPORT_*` variable names onto the file's keys.
fn env_key(key: &UncasedStr) -> Uncased<'_> {
    let key = key.as_str();
    if key.eq_ignore_ascii_case("apikeyname") || key.eq_ignore_ascii_case("api_key_name") {
        Uncased::from("apiKeyName")
    } else {
        Uncased::from(key.to_ascii_lowercase())
    }
}

/// Read the JSON file at `path` with environment overrides applied.
pub fn load_server_file(path: &Path) -> Result<ServerFile, ConfigError> {
    debug!(path = %path.display(), "loading server configuration");

    let figment = Figment::new()
        .merge(Json::file(path))
        .merge(Env::prefixed(ENV_PREFIX).lowercase(false).map(env_key));

    Ok(figment.extract()?)
}

/// Resolve the password: file or env value first, then the system keyring.
pub fn resolve_password(file: &ServerFile) -> Result<SecretString, ConfigError> {
    if let Some(ref passwd) = file.passwd {
        return Ok(SecretString::from(passwd.clone()));
    }

    let account = format!("{}@{}", file.user, file.host);
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &account) {
        if let Ok(secret) = entry.get_password() {
            debug!(%account, "password resolved from keyring");
            return Ok(SecretString::from(secret));
        }
    }

    Err(ConfigError::NoCredentials {
        user: file.user.clone(),
        host: file.host.clone(),
    })
}

/// Translate a parsed file into a `ServerConfig`.
pub fn to_server_config(file: ServerFile) -> Result<ServerConfig, ConfigError> {
    if file.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "must not be empty".into(),
        });
    }
    if file.port == 0 {
        return Err(ConfigError::Validation {
            field: "port".into(),
            reason: "must be between 1 and 65535".into(),
        });
    }

    let password = resolve_password(&file)?;

    Ok(ServerConfig {
        host: file.host,
        port: file.port,
        certificate: file.certificate.into(),
        user: file.user,
        password,
        domain: file.domain,
        api_key_name: file.api_key_name,
        timeout: Duration::from_secs(file.timeout),
    })
}

/// Locate, read, and translate the server configuration.
pub fn load_server_config(explicit: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let path = resolve_config_path(explicit)?;
    to_server_config(load_server_file(&path)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use figment::Jail;
    use secrecy::ExposeSecret;

    use super::*;

    const SAMPLE: &str = r#"{
        "host": "mso.example.com",
        "port": "443",
        "certificate": false,
        "user": "admin",
        "passwd": "s3cret",
        "domain": "local",
        "apiKeyName": "automation"
    }"#;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_string_port_and_defaults() {
        let file = write_config(SAMPLE);
        let config = load_server_config(Some(file.path())).unwrap();

        assert_eq!(config.host, "mso.example.com");
        assert_eq!(config.port, 443);
        assert_eq!(config.certificate, CertificateVerification::Disabled);
        assert_eq!(config.api_key_name, "automation");
        assert_eq!(config.password.expose_secret(), "s3cret");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn numeric_port_and_ca_bundle() {
        let file = write_config(
            r#"{ "host": "mso", "port": 8443, "certificate": "/etc/ssl/mso-ca.pem",
                 "user": "admin", "passwd": "pw", "domain": "local",
                 "apiKeyName": "k", "timeout": 5 }"#,
        );
        let config = load_server_config(Some(file.path())).unwrap();

        assert_eq!(config.port, 8443);
        assert_eq!(
            config.certificate,
            CertificateVerification::CustomCa("/etc/ssl/mso-ca.pem".into())
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn certificate_true_uses_system_roots() {
        assert_eq!(
            CertificateVerification::from(Certificate::Verify(true)),
            CertificateVerification::SystemRoots
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        let file = write_config(&SAMPLE.replace("\"443\"", "\"https\""));
        assert!(matches!(
            load_server_config(Some(file.path())),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn missing_explicit_file() {
        let err = load_server_config(Some(Path::new("/nonexistent/mso.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { ref searched } if searched.contains("/nonexistent/mso.json")));
    }

    #[test]
    fn missing_key_is_a_load_error() {
        let file = write_config(r#"{ "host": "mso", "port": 443 }"#);
        assert!(matches!(
            load_server_config(Some(file.path())),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, SAMPLE)?;
            jail.set_env("EPGPORT_HOST", "mso-dr.example.com");
            jail.set_env("EPGPORT_APIKEYNAME", "dr-automation");

            let path = resolve_config_path(None).map_err(|e| e.to_string())?;
            let file = load_server_file(&path).map_err(|e| e.to_string())?;

            assert_eq!(file.host, "mso-dr.example.com");
            assert_eq!(file.api_key_name, "dr-automation");
            assert_eq!(file.port, 443);
            Ok(())
        });
    }

    #[test]
    fn empty_host_fails_validation() {
        let file = write_config(&SAMPLE.replace("mso.example.com", " "));
        assert!(matches!(
            load_server_config(Some(file.path())),
            Err(ConfigError::Validation { ref field, .. }) if field == "host"
        ));
    }
}
