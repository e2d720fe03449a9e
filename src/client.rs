//! Client handle and account operations.
use std::sync::RwLock;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::errors::{Error, Result};

/// Default production endpoint for the Limelock API.
const DEFAULT_BASE_URL: &str = "https://api.limelock.io";

/// Options for constructing a [`Client`].
#[derive(Clone)]
pub struct ClientOptions {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
    file_system: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            base_url: DEFAULT_BASE_URL.into(),
            token: None,
            timeout: Duration::from_secs(30),
            file_system: true,
        }
    }
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("file_system", &self.file_system)
            .finish()
    }
}

impl ClientOptions {
    /// Creates options pointing at the production endpoint, with no session
    /// token and file-system access enabled.
    pub fn new() -> ClientOptions {
        Default::default()
    }

    /// Overrides the base endpoint the client talks to.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Starts the session with an existing auth token instead of logging in.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Per-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Controls whether the file-backed operations ([`crate::put::file`],
    /// [`crate::get::copy`]) are available. Disable this when the target
    /// environment has no file system; those operations then fail fast with
    /// [`Error::FileOpsUnsupported`] instead of reaching for the disk.
    pub fn file_system(mut self, enabled: bool) -> Self {
        self.file_system = enabled;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(&self.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::TransportError {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Client {
            http,
            base_url,
            token: RwLock::new(self.token),
            file_system: self.file_system,
        })
    }
}

/// Handle on a Limelock session: one connection pool, one base endpoint,
/// and the current auth token.
///
/// The token is a single logical session value. Concurrent logins through
/// the same client race, and the last one to succeed wins.
///
/// ## Example
/// ```no_run
/// #[tokio::main]
/// async fn main() -> limelock::Result<()> {
///     let client = limelock::Client::new()?;
///     client.login("me@example.com", "hunter2").await?;
///     let record = limelock::put::data(&client, "hello").await?;
///     println!("stored as {}", record.tx_id);
///     Ok(())
/// }
/// ```
pub struct Client {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
    token: RwLock<Option<String>>,
    pub(crate) file_system: bool,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("file_system", &self.file_system)
            .finish()
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthOnly {
    auth_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    auth_token: String,
}

impl Client {
    /// Connects to the production endpoint with default options and no
    /// session token.
    pub fn new() -> Result<Client> {
        ClientOptions::new().build()
    }

    /// Starts building a customized client.
    pub fn options() -> ClientOptions {
        ClientOptions::new()
    }

    /// The current session token, if a login has succeeded or one was
    /// provided at construction.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Logs in with an email/password pair, storing the session token on the
    /// client for subsequent operations. Returns the token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let resp: LoginResponse = self
            .post_json(
                "accounts/login",
                "POST /accounts/login",
                &Credentials { email, password },
            )
            .await?;
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(resp.auth_token.clone());
        tracing::debug!("login succeeded");
        Ok(resp.auth_token)
    }

    /// Registers a new account. Does not log in.
    pub async fn register(&self, email: &str, password: &str) -> Result<()> {
        self.post(
            "accounts/register",
            "POST /accounts/register",
            &Credentials { email, password },
        )
        .await?;
        Ok(())
    }

    /// Details for the logged-in account, as reported by the service.
    pub async fn me(&self) -> Result<Value> {
        self.post_json(
            "accounts/me",
            "POST /accounts/me",
            &AuthOnly {
                auth_token: self.auth_token(),
            },
        )
        .await
    }

    pub(crate) fn auth_token(&self) -> String {
        self.token().unwrap_or_default()
    }

    /// Issues a POST and applies the status gate: success hands back the
    /// response, anything else becomes a [`Error::RemoteRejection`] carrying
    /// the body verbatim.
    pub(crate) async fn post<B: Serialize>(
        &self,
        path: &str,
        endpoint: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(endpoint, "sending request");
        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::TransportError {
                endpoint: endpoint.into(),
                source: e,
            })?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!(endpoint, status, body = %body, "remote rejected request");
            return Err(Error::RemoteRejection {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }
        Ok(resp)
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self.post(path, endpoint, body).await?;
        resp.json().await.map_err(|e| Error::MalformedResponse {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}
