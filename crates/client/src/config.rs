//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `BREWPASS_API_BASE` - Base URL for the token and REST endpoints
//!   (default: `https://openapi.starbucks.com/v1/`)
//! - `BREWPASS_LOCATOR_URL` - Public store locator endpoint
//!   (default: `https://www.starbucks.com/bff/locations`)
//! - `BREWPASS_MARKET` - Market query parameter (default: US)
//! - `BREWPASS_LOCALE` - Locale query parameter (default: en-US)
//! - `BREWPASS_PLATFORM` - Platform query parameter on the token request (default: Android)
//! - `BREWPASS_USER_AGENT` - Client identification header (default: brewpass/<version>)
//! - `BREWPASS_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: none)
//! - `BREWPASS_CLIENT_ID` / `BREWPASS_CLIENT_SECRET` - API client credentials (set both or neither)
//! - `BREWPASS_TOKEN_SIGNATURE` - Precomputed token request signature

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE: &str = "https://openapi.starbucks.com/v1/";
const DEFAULT_LOCATOR_URL: &str = "https://www.starbucks.com/bff/locations";
const DEFAULT_MARKET: &str = "US";
const DEFAULT_LOCALE: &str = "en-US";
const DEFAULT_PLATFORM: &str = "Android";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid URL in {0}: {1}")]
    InvalidUrl(String, url::ParseError),
}

/// API client identity used for the OAuth request and the API-key header.
///
/// Implements `Debug` manually to redact the secret.
#[derive(Clone)]
pub struct Credentials {
    /// OAuth client ID (also sent as the API key)
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: SecretString,
}

impl Credentials {
    /// Create credentials from an id and secret.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Brewpass client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL for the token endpoint and every authenticated endpoint.
    /// Always ends in `/`.
    pub api_base: Url,
    /// Public store locator endpoint
    pub locator_url: Url,
    /// Market query parameter (e.g. US)
    pub market: String,
    /// Locale query parameter (e.g. en-US)
    pub locale: String,
    /// Platform query parameter sent with the token request
    pub platform: String,
    /// Fixed client identification header value
    pub user_agent: String,
    /// Optional per-request timeout. `None` means requests never time out.
    pub request_timeout: Option<Duration>,
    /// Credentials applied when the client is built (optional)
    pub credentials: Option<Credentials>,
    /// Precomputed token request signature (optional)
    pub token_signature: Option<SecretString>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base.as_str())
            .field("locator_url", &self.locator_url.as_str())
            .field("market", &self.market)
            .field("locale", &self.locale)
            .field("platform", &self.platform)
            .field("user_agent", &self.user_agent)
            .field("request_timeout", &self.request_timeout)
            .field("credentials", &self.credentials)
            .field(
                "token_signature",
                &self.token_signature.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: parse_static_url(DEFAULT_API_BASE),
            locator_url: parse_static_url(DEFAULT_LOCATOR_URL),
            market: DEFAULT_MARKET.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
            user_agent: default_user_agent(),
            request_timeout: None,
            credentials: None,
            token_signature: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup("BREWPASS_API_BASE") {
            config.api_base = parse_base_url("BREWPASS_API_BASE", &base)?;
        }
        if let Some(locator) = lookup("BREWPASS_LOCATOR_URL") {
            config.locator_url = Url::parse(&locator)
                .map_err(|e| ConfigError::InvalidUrl("BREWPASS_LOCATOR_URL".to_string(), e))?;
        }
        if let Some(market) = lookup("BREWPASS_MARKET") {
            config.market = market;
        }
        if let Some(locale) = lookup("BREWPASS_LOCALE") {
            config.locale = locale;
        }
        if let Some(platform) = lookup("BREWPASS_PLATFORM") {
            config.platform = platform;
        }
        if let Some(user_agent) = lookup("BREWPASS_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(secs) = lookup("BREWPASS_REQUEST_TIMEOUT_SECS") {
            let secs = secs.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "BREWPASS_REQUEST_TIMEOUT_SECS".to_string(),
                    e.to_string(),
                )
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        config.credentials = match (
            lookup("BREWPASS_CLIENT_ID"),
            lookup("BREWPASS_CLIENT_SECRET"),
        ) {
            (Some(id), Some(secret)) => Some(Credentials::new(id, secret)),
            (None, None) => None,
            _ => {
                return Err(ConfigError::InvalidEnvVar(
                    "BREWPASS_CLIENT_*".to_string(),
                    "Both BREWPASS_CLIENT_ID and BREWPASS_CLIENT_SECRET must be set together"
                        .to_string(),
                ));
            }
        };

        config.token_signature = lookup("BREWPASS_TOKEN_SIGNATURE").map(SecretString::from);

        Ok(config)
    }

    /// Point the token and REST endpoints at a different base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base` does not parse.
    pub fn with_api_base(mut self, base: &str) -> Result<Self, ConfigError> {
        self.api_base = parse_base_url("api_base", base)?;
        Ok(self)
    }

    /// Point the public store locator at a different URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `url` does not parse.
    pub fn with_locator_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.locator_url =
            Url::parse(url).map_err(|e| ConfigError::InvalidUrl("locator_url".to_string(), e))?;
        Ok(self)
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn with_token_signature(mut self, signature: impl Into<String>) -> Self {
        self.token_signature = Some(SecretString::from(signature.into()));
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Returns the configured token signature, if any.
    #[must_use]
    pub fn token_signature(&self) -> Option<&str> {
        self.token_signature
            .as_ref()
            .map(|signature| signature.expose_secret())
    }
}

fn default_user_agent() -> String {
    format!("brewpass/{}", env!("CARGO_PKG_VERSION"))
}

/// Parse a base URL, appending a trailing `/` so relative paths join beneath it.
fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    };
    Url::parse(&normalized).map_err(|e| ConfigError::InvalidUrl(var_name.to_string(), e))
}

fn parse_static_url(value: &str) -> Url {
    Url::parse(value).expect("built-in default URL is valid")
}
