// Orchestrator authentication
//
// Two-step session setup: `POST /login` yields a JWT that is sent back as
// the `AuthCookie` cookie, then the user's API-key listing is searched for
// the configured key name. Both secrets are kept in `SecretString`.

use reqwest::header::COOKIE;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{ApiKeyList, LoginRequest, LoginResponse};

/// Login material for an orchestrator user.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub password: SecretString,
    pub domain: String,
    /// Name of the API key to look up after login.
    pub api_key_name: String,
}

/// A resolved, read-only orchestrator session.
#[derive(Clone)]
pub struct Session {
    base_url: Url,
    user: String,
    token: SecretString,
    api_key: SecretString,
}

impl Session {
    pub fn new(base_url: Url, user: String, token: SecretString, api_key: SecretString) -> Self {
        Self {
            base_url,
            user,
            token,
            api_key,
        }
    }

    /// The orchestrator root (e.g. `https://mso.example.com:443/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// The login token, sent as the `AuthCookie` cookie.
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// The resolved API key, sent as the `X-Nd-Apikey` query parameter.
    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Authenticate with username / password / domain.
///
/// `POST /login` must answer 200 with a `jwttoken` field; any other status
/// is reported as [`Error::Authentication`] with the response body.
pub async fn login(
    http: &reqwest::Client,
    base_url: &Url,
    credentials: &Credentials,
) -> Result<SecretString, Error> {
    let url = base_url.join("login")?;
    debug!("logging in at {}", url);

    let body = LoginRequest {
        user_name: &credentials.user,
        user_passwd: credentials.password.expose_secret(),
        domain: &credentials.domain,
    };

    let resp = http
        .post(url)
        .json(&body)
        .send()
        .await
        .map_err(Error::Transport)?;

    let status = resp.status();
    let text = resp.text().await.map_err(Error::Transport)?;

    if status != reqwest::StatusCode::OK {
        return Err(Error::Authentication {
            message: format!("login failed (HTTP {status}): {text}"),
        });
    }

    let login: LoginResponse =
        serde_json::from_str(&text).map_err(|e| Error::Authentication {
            message: format!("login response carried no token: {e}"),
        })?;

    debug!("login successful");
    Ok(SecretString::from(login.jwttoken))
}

/// Look up the API key named `key_name` for the logged-in user.
///
/// `GET /api/config/dn/userapikey/local-admin?showPassword=yes`. A non-200
/// answer is an [`Error::Status`]; a listing without the key is
/// [`Error::ApiKeyNotFound`].
pub async fn fetch_api_key(
    http: &reqwest::Client,
    base_url: &Url,
    token: &SecretString,
    key_name: &str,
) -> Result<SecretString, Error> {
    let mut url = base_url.join("api/config/dn/userapikey/local-admin")?;
    url.query_pairs_mut().append_pair("showPassword", "yes");
    debug!(key_name, "fetching API key");

    let resp = http
        .get(url.clone())
        .header(COOKIE, format!("AuthCookie={}", token.expose_secret()))
        .send()
        .await
        .map_err(Error::Transport)?;

    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if status != reqwest::StatusCode::OK {
        return Err(Error::Status {
            status: status.as_u16(),
            url: url.path().to_owned(),
            body,
        });
    }

    let keys: ApiKeyList = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })?;

    keys.api_keys
        .into_iter()
        .find(|k| k.name == key_name)
        .map(|k| SecretString::from(k.key))
        .ok_or_else(|| Error::ApiKeyNotFound {
            name: key_name.to_owned(),
        })
}
