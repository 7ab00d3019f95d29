//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text
//! and a distinct process exit code per failure kind.

use miette::Diagnostic;
use thiserror::Error;

use epgport_config::ConfigError;
use epgport_core::CoreError;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    /// Returned by clap itself on argument errors.
    #[allow(dead_code)]
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const INPUT: i32 = 5;
    pub const CONFIG: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const UPDATE_FAILED: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Orchestrator request failed: {reason}")]
    #[diagnostic(
        code(epgport::connection_failed),
        help(
            "Check host, port, and certificate in the server configuration.\n\
             Target: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        reason: String,
        #[source]
        source: Option<Box<epgport_api::Error>>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(epgport::auth_failed),
        help("Verify user, passwd, domain, and apiKeyName in the server configuration.")
    )]
    AuthFailed { message: String },

    #[error("No password configured for {account}")]
    #[diagnostic(
        code(epgport::no_credentials),
        help(
            "Set \"passwd\" in the server configuration, export EPGPORT_PASSWD,\n\
             or store it in the system keyring under service \"epgport\", entry \"{account}\"."
        )
    )]
    NoCredentials { account: String },

    // ── Lookup ───────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(epgport::not_found),
        help("Check the names in the CSV against the orchestrator. No schema was modified.")
    )]
    NotFound { message: String },

    // ── Input ────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(epgport::input),
        help(
            "Expected a headered CSV with columns: schema, templateName,\n\
             applicationProfileName, epgName, siteName, podName, nodeName,\n\
             intfType, intfName, vlan, deploymentImmediacy, mode"
        )
    )]
    Input {
        message: String,
        #[source]
        source: Box<CoreError>,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Server configuration file not found")]
    #[diagnostic(
        code(epgport::no_config),
        help(
            "Pass one with --config or set EPGPORT_CONFIG.\n\
             Searched: {searched}"
        )
    )]
    NoConfig { searched: String },

    #[error("Invalid server configuration: {message}")]
    #[diagnostic(code(epgport::config))]
    Config { message: String },

    // ── Submission ───────────────────────────────────────────────────
    #[error("Update of schema '{schema}' was rejected ({status})")]
    #[diagnostic(code(epgport::update_failed), help("Response body:\n{body}"))]
    UpdateFailed {
        schema: String,
        status: String,
        body: String,
        #[source]
        source: Box<CoreError>,
    },

    // ── Orchestrator responses ───────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(epgport::api_error))]
    Api { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render JSON output: {0}")]
    #[diagnostic(code(epgport::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Input { .. } => exit_code::INPUT,
            Self::NoConfig { .. } | Self::Config { .. } => exit_code::CONFIG,
            Self::UpdateFailed { .. } => exit_code::UPDATE_FAILED,
            Self::Api { .. } | Self::Io(_) | Self::Json(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed {
                url,
                reason,
                source,
            } => CliError::ConnectionFailed {
                url,
                reason: source.as_deref().map_or(reason, connection_summary),
                source,
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::SchemaUpdateFailed {
                ref schema,
                status,
                ref body,
                ..
            } => CliError::UpdateFailed {
                schema: schema.clone(),
                status: status.map_or_else(|| "no response".to_owned(), |s| format!("HTTP {s}")),
                body: body.clone(),
                source: Box::new(err),
            },

            CoreError::InputFile { .. } | CoreError::InvalidRow { .. } => CliError::Input {
                message: err.to_string(),
                source: Box::new(err),
            },

            CoreError::EmptyInterfaceList { ref node_dn } => CliError::ConnectionFailed {
                url: node_dn.clone(),
                reason: err.to_string(),
                source: None,
            },

            CoreError::Api { message, body } => CliError::Api {
                message: match body {
                    Some(body) if !body.is_empty() => format!("{message}\n{body}"),
                    _ => message,
                },
            },

            CoreError::Config { message } => CliError::Config { message },

            err if err.is_lookup() => CliError::NotFound {
                message: err.to_string(),
            },

            err => CliError::Api {
                message: err.to_string(),
            },
        }
    }
}

/// Short reason for the headline; the source chain carries the detail.
fn connection_summary(err: &epgport_api::Error) -> String {
    match err {
        epgport_api::Error::Status { status, .. } => format!("HTTP {status}"),
        epgport_api::Error::Tls(_) => "TLS setup failed".to_owned(),
        _ => "no response".to_owned(),
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { searched } => CliError::NoConfig { searched },
            ConfigError::NoCredentials { user, host } => CliError::NoCredentials {
                account: format!("{user}@{host}"),
            },
            err @ (ConfigError::Validation { .. } | ConfigError::Figment(_)) => {
                CliError::Config {
                    message: err.to_string(),
                }
            }
        }
    }
}
