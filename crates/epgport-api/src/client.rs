// Orchestrator HTTP client
//
// Wraps `reqwest::Client` with MSO-specific URL construction and the
// per-request authentication the orchestrator expects: an `AuthCookie`
// carrying the login token, plus `X-Nd-Apikey` / `X-Nd-Username` query
// parameters. Endpoint groups (sites, fabric, schemas) are implemented as
// inherent methods in separate files to keep this module focused on
// transport mechanics.

use reqwest::StatusCode;
use reqwest::header::COOKIE;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::{self, Credentials, Session};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Authenticated client for the orchestrator's REST API.
///
/// Holds a read-only [`Session`] obtained at construction time; every
/// request reuses it. There is no re-login or retry.
pub struct MsoClient {
    http: reqwest::Client,
    session: Session,
}

impl MsoClient {
    /// Log in and resolve the API key, producing a ready-to-use client.
    ///
    /// Performs exactly two calls: `POST /login` and the API-key lookup.
    pub async fn connect(
        base_url: Url,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let token = auth::login(&http, &base_url, credentials).await?;
        let api_key =
            auth::fetch_api_key(&http, &base_url, &token, &credentials.api_key_name).await?;

        debug!(user = %credentials.user, "orchestrator session established");

        let session = Session::new(base_url, credentials.user.clone(), token, api_key);
        Ok(Self { http, session })
    }

    /// Create a client around an existing session and `reqwest::Client`.
    ///
    /// Skips the login round-trip; used when a session was obtained
    /// elsewhere and by tests.
    pub fn with_session(http: reqwest::Client, session: Session) -> Self {
        Self { http, session }
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &Session {
        &self.session
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/mso/api/v1/{path}` with the API-key query parameters.
    pub(crate) fn mso_url(&self, path: &str) -> Result<Url, Error> {
        let mut url = self
            .session
            .base_url()
            .join(&format!("mso/api/v1/{path}"))?;
        url.query_pairs_mut()
            .append_pair("X-Nd-Apikey", self.session.api_key().expose_secret())
            .append_pair("X-Nd-Username", self.session.user());
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn auth_cookie(&self) -> String {
        format!("AuthCookie={}", self.session.token().expose_secret())
    }

    /// Send a GET request and decode the JSON body.
    ///
    /// The query string carries the API key, so only the path is logged and
    /// transport errors are stripped of their URL.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url.path());

        let resp = self
            .http
            .get(url.clone())
            .header(COOKIE, self.auth_cookie())
            .send()
            .await
            .map_err(|e| Error::Transport(e.without_url()))?;

        let body = Self::expect_status(&url, resp, |status| status.is_success()).await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Send a PUT request with a JSON body, discarding the response body.
    /// Only `201 Created` counts as success.
    pub(crate) async fn put(&self, url: Url, body: &impl Serialize) -> Result<(), Error> {
        debug!("PUT {}", url.path());

        let resp = self
            .http
            .put(url.clone())
            .header(COOKIE, self.auth_cookie())
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Transport(e.without_url()))?;

        Self::expect_status(&url, resp, |status| status == StatusCode::CREATED)
            .await
            .map(|_| ())
    }

    /// Return the body when `accept` admits the status, or `Error::Status`
    /// with the body attached for diagnosis.
    async fn expect_status(
        url: &Url,
        resp: reqwest::Response,
        accept: impl Fn(StatusCode) -> bool,
    ) -> Result<String, Error> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Transport(e.without_url()))?;
        trace!(status = status.as_u16(), bytes = body.len(), "response received");

        if accept(status) {
            Ok(body)
        } else {
            Err(Error::Status {
                status: status.as_u16(),
                url: url.path().to_owned(),
                body,
            })
        }
    }
}

impl std::fmt::Debug for MsoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MsoClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
