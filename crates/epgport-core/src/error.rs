// ── Core error types ──
//
// Domain errors from epgport-core. Every named entity the batch resolves
// has its own "not found" variant so callers never see a bare index or
// jsonpath miss. The `From<epgport_api::Error>` impl translates
// transport-layer errors, keeping the original as the source.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Orchestrator request to {url} failed: {reason}")]
    ConnectionFailed {
        url: String,
        reason: String,
        #[source]
        source: Option<Box<epgport_api::Error>>,
    },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Fabric interface list for node {node_dn} is empty")]
    EmptyInterfaceList { node_dn: String },

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Site not found: {name}")]
    SiteNotFound { name: String },

    #[error("Node '{name}' not found in site {site}")]
    NodeNotFound { site: String, name: String },

    #[error("Interface '{name}' not found on node {node_dn}")]
    InterfaceNotFound { node_dn: String, name: String },

    #[error("Schema not found: {name}")]
    SchemaNotFound { name: String },

    #[error("Template '{name}' not found in schema {schema}")]
    TemplateNotFound { schema: String, name: String },

    #[error("Schema {schema} has no binding of template '{template}' to site {site_id}")]
    SiteBindingNotFound {
        schema: String,
        template: String,
        site_id: String,
    },

    #[error("Application profile not found in schema {schema}: {reference}")]
    ApplicationProfileNotFound { schema: String, reference: String },

    #[error("Endpoint group not found in schema {schema}: {reference}")]
    EndpointGroupNotFound { schema: String, reference: String },

    // ── Submission errors ────────────────────────────────────────────
    #[error("Failed to update schema {schema}")]
    SchemaUpdateFailed {
        schema: String,
        status: Option<u16>,
        body: String,
        #[source]
        source: Box<epgport_api::Error>,
    },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Cannot read CSV file {path}")]
    InputFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV record at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Unexpected orchestrator response: {message}")]
    Api { message: String, body: Option<String> },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` for name-resolution failures.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Self::SiteNotFound { .. }
                | Self::NodeNotFound { .. }
                | Self::InterfaceNotFound { .. }
                | Self::SchemaNotFound { .. }
                | Self::TemplateNotFound { .. }
                | Self::SiteBindingNotFound { .. }
                | Self::ApplicationProfileNotFound { .. }
                | Self::EndpointGroupNotFound { .. }
        )
    }

    /// Wrap an API error raised while submitting `schema`.
    pub(crate) fn update_failed(schema: &str, err: epgport_api::Error) -> Self {
        let status = match &err {
            epgport_api::Error::Status { status, .. } => Some(*status),
            _ => None,
        };
        Self::SchemaUpdateFailed {
            schema: schema.to_owned(),
            status,
            body: err.body().unwrap_or_default().to_owned(),
            source: Box::new(err),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<epgport_api::Error> for CoreError {
    fn from(err: epgport_api::Error) -> Self {
        match err {
            epgport_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            epgport_api::Error::ApiKeyNotFound { name } => CoreError::AuthenticationFailed {
                message: format!("API key '{name}' is not defined for this user"),
            },
            epgport_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid orchestrator URL: {e}"),
            },
            epgport_api::Error::Deserialization { message, body } => CoreError::Api {
                message,
                body: Some(body),
            },
            err @ (epgport_api::Error::Transport(_)
            | epgport_api::Error::Tls(_)
            | epgport_api::Error::Status { .. }) => {
                let url = match &err {
                    epgport_api::Error::Status { url, .. } => url.clone(),
                    _ => "<orchestrator>".into(),
                };
                CoreError::ConnectionFailed {
                    url,
                    reason: err.to_string(),
                    source: Some(Box::new(err)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_become_connection_failures() {
        let api = epgport_api::Error::Status {
            status: 500,
            url: "/mso/api/v1/sites".into(),
            body: "boom".into(),
        };
        let core = CoreError::from(api);
        match core {
            CoreError::ConnectionFailed { url, source, .. } => {
                assert_eq!(url, "/mso/api/v1/sites");
                assert!(source.is_some());
            }
            other => panic!("expected ConnectionFailed, got {other:?}"),
        }
    }

    #[test]
    fn missing_api_key_is_an_auth_failure() {
        let core = CoreError::from(epgport_api::Error::ApiKeyNotFound {
            name: "automation".into(),
        });
        assert!(matches!(core, CoreError::AuthenticationFailed { ref message } if message.contains("automation")));
    }

    #[test]
    fn update_failure_keeps_status_and_body() {
        let err = CoreError::update_failed(
            "Prod",
            epgport_api::Error::Status {
                status: 400,
                url: "/mso/api/v1/schemas/s1".into(),
                body: "{\"message\":\"bad\"}".into(),
            },
        );
        match err {
            CoreError::SchemaUpdateFailed { schema, status, body, .. } => {
                assert_eq!(schema, "Prod");
                assert_eq!(status, Some(400));
                assert!(body.contains("bad"));
            }
            other => panic!("expected SchemaUpdateFailed, got {other:?}"),
        }
    }

    #[test]
    fn lookup_classification() {
        assert!(CoreError::SchemaNotFound { name: "x".into() }.is_lookup());
        assert!(!CoreError::EmptyInterfaceList { node_dn: "x".into() }.is_lookup());
    }
}
