use thiserror::Error;

/// Top-level error type for the `epgport-api` crate.
///
/// Covers every failure mode of the orchestrator REST surface:
/// authentication, transport, HTTP status, and payload decoding.
/// `epgport-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected (wrong credentials, unknown domain, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The named API key is not listed for the authenticated user.
    #[error("API key '{name}' not found for the authenticated user")]
    ApiKeyNotFound { name: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── HTTP ────────────────────────────────────────────────────────
    /// The orchestrator answered with an unexpected status code.
    #[error("Unexpected HTTP {status} from {url}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the orchestrator answered 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 404,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if the request never produced a usable response.
    pub fn is_connection(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::Tls(_) => true,
            _ => false,
        }
    }

    /// The response body attached to this error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Deserialization { body, .. } => Some(body),
            _ => None,
        }
    }
}
