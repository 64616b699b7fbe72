//! Brewpass REST API client.
//!
//! Holds the session and routes every call through one request path:
//! auth check, URL build, status check, JSON parse.

use std::sync::Arc;

use reqwest::Method;
use secrecy::SecretString;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::auth::{self, MissingSigner, StaticSigner, TokenPayload, TokenQuery, TokenSigner};
use crate::config::{ClientConfig, Credentials};
use crate::error::ClientError;
use crate::session::Session;

/// Token endpoint, relative to the API base.
const TOKEN_PATH: &str = "oauth/token";

/// Commerce API client.
///
/// Cheap to clone; clones share one session.
///
/// # Authentication
///
/// Call [`set_credentials`](Self::set_credentials) then
/// [`login`](Self::login), or hand over an existing bearer token with
/// [`set_token`](Self::set_token). Authenticated operations fail with
/// [`ClientError::NotAuthenticated`] until a token is present, without
/// touching the network.
#[derive(Clone)]
pub struct BrewpassClient {
    inner: Arc<BrewpassClientInner>,
}

struct BrewpassClientInner {
    client: reqwest::Client,
    config: ClientConfig,
    signer: Arc<dyn TokenSigner>,
    session: RwLock<Session>,
}

impl BrewpassClient {
    /// Create a client from configuration.
    ///
    /// Uses the configured token signature, if any; otherwise `login` fails
    /// with `ClientError::Signature` until a client is built with
    /// [`with_signer`](Self::with_signer).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        match config.token_signature().map(str::to_string) {
            Some(signature) => Self::with_signer(config, StaticSigner::new(signature)),
            None => Self::with_signer(config, MissingSigner),
        }
    }

    /// Create a client that signs token requests with `signer`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` if the HTTP client cannot be built.
    pub fn with_signer(
        config: ClientConfig,
        signer: impl TokenSigner + 'static,
    ) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let session = Session::new(config.credentials.clone());

        Ok(Self {
            inner: Arc::new(BrewpassClientInner {
                client,
                config,
                signer: Arc::new(signer),
                session: RwLock::new(session),
            }),
        })
    }

    /// Create a client from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the environment is invalid, or
    /// `ClientError::Http` if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Store the client identity used for login and the API-key header.
    pub async fn set_credentials(
        &self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> &Self {
        self.inner
            .session
            .write()
            .await
            .set_credentials(Credentials::new(client_id, client_secret));
        self
    }

    /// Set the bearer token directly, bypassing login.
    pub async fn set_token(&self, token: impl Into<String>) -> &Self {
        self.inner
            .session
            .write()
            .await
            .set_token(SecretString::from(token.into()));
        self
    }

    /// Whether a bearer token is present.
    pub async fn has_token(&self) -> bool {
        self.inner.session.read().await.has_token()
    }

    /// Log in with the password grant and keep the returned token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::AuthConfiguration` if credentials were never set,
    /// `ClientError::AuthFailure` if the token endpoint rejects the request.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<TokenPayload, ClientError> {
        let credentials = self
            .inner
            .session
            .read()
            .await
            .credentials()
            .cloned()
            .ok_or(ClientError::AuthConfiguration)?;

        let token_url = self.inner.config.api_base.join(TOKEN_PATH)?;
        let query = TokenQuery {
            market: &self.inner.config.market,
            platform: &self.inner.config.platform,
        };

        let payload = auth::password_grant(
            &self.inner.client,
            &token_url,
            self.inner.signer.as_ref(),
            &credentials,
            &query,
            username,
            password,
        )
        .await?;

        self.inner
            .session
            .write()
            .await
            .set_token(payload.access_token.clone());

        Ok(payload)
    }

    // =========================================================================
    // Request Execution
    // =========================================================================

    /// Issue an authenticated request and parse the JSON response.
    ///
    /// `path` is relative to the API base. `query` pairs are appended to the
    /// URL, and `body`, when present, is sent as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotAuthenticated` if no token is set (no request
    /// is sent), `ClientError::Api` on a non-success status, and
    /// `ClientError::Decode` if the body is not the expected JSON.
    #[instrument(skip(self, query, body), fields(method = %method, path = %path))]
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let token = self.bearer_token().await?;
        let url = self.endpoint(path, query)?;
        self.send_authenticated(method, url, &token, body).await
    }

    /// Same as [`request`](Self::request), but the path is given as raw
    /// segments that are percent-encoded one by one. Provider-issued values
    /// (store numbers, order tokens) go through here so they always stay a
    /// single segment.
    #[instrument(skip(self, segments, query, body), fields(method = %method))]
    pub(crate) async fn request_segments<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let token = self.bearer_token().await?;
        let url = self.segment_endpoint(segments, query)?;
        self.send_authenticated(method, url, &token, body).await
    }

    /// Issue an unauthenticated GET against an absolute URL.
    ///
    /// Same status and parse handling as [`request`](Self::request), minus the
    /// token check.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` on a non-success status and
    /// `ClientError::Decode` if the body is not the expected JSON.
    #[instrument(skip(self, url, query), fields(url = %url))]
    pub async fn public_request<T: DeserializeOwned>(
        &self,
        url: &Url,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let mut url = url.clone();
        append_query(&mut url, query);

        let request = self
            .inner
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");

        self.execute(request).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        self.request::<T, ()>(Method::GET, path, query, None).await
    }

    pub(crate) async fn post<T, B>(&self, segments: &[&str], body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.request_segments(Method::POST, segments, &[], Some(body))
            .await
    }

    async fn send_authenticated<T, B>(
        &self,
        method: Method,
        url: Url,
        token: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let mut request = self
            .inner
            .client
            .request(method, url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        self.execute(request).await
    }

    /// Send a prepared request, check its status and parse the JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "API request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "API request succeeded");

        Ok(serde_json::from_str(&body)?)
    }

    /// Get the current bearer token string.
    async fn bearer_token(&self) -> Result<String, ClientError> {
        self.inner
            .session
            .read()
            .await
            .bearer()
            .map(str::to_string)
            .ok_or(ClientError::NotAuthenticated)
    }

    /// Resolve `path` beneath the API base and append `query`.
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut url = self
            .inner
            .config
            .api_base
            .join(path.trim_start_matches('/'))?;
        append_query(&mut url, query);
        Ok(url)
    }

    /// Append `segments` beneath the API base, percent-encoding each one.
    ///
    /// Empty, `.` and `..` segments are rejected; they would collapse or
    /// climb the path.
    fn segment_endpoint(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Url, ClientError> {
        if let Some(bad) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(ClientError::InvalidPathSegment((*bad).to_string()));
        }

        let mut url = self.inner.config.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::InvalidPathSegment(self.inner.config.api_base.to_string())
            })?
            .pop_if_empty()
            .extend(segments);
        append_query(&mut url, query);
        Ok(url)
    }
}

fn append_query(url: &mut Url, query: &[(&str, &str)]) {
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
}

impl std::fmt::Debug for BrewpassClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrewpassClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
