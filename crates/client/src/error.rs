//! Errors surfaced by the Brewpass client.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur when talking to the commerce API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// `login` was called before client credentials were set.
    #[error("Client credentials not set - call set_credentials before login")]
    AuthConfiguration,

    /// The token endpoint answered with a non-success status.
    #[error("Authentication failed: HTTP {status}: {body}")]
    AuthFailure { status: u16, body: String },

    /// An authenticated operation was attempted without a session token.
    #[error("Not authenticated - login or set a token first")]
    NotAuthenticated,

    /// An API endpoint answered with a non-success status.
    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the JSON we expected.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A configured or derived URL was invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A value cannot be used as a single URL path segment.
    #[error("Invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The token signer could not produce a signature.
    #[error("Token signature unavailable: {0}")]
    Signature(String),
}

impl ClientError {
    /// HTTP status carried by `AuthFailure` and `Api` errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::AuthFailure { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
