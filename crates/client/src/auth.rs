//! OAuth password-grant authentication.
//!
//! Exchanges an account's username and password for a bearer token. The
//! token request carries a `sig` query parameter produced by a
//! [`TokenSigner`]; the signing algorithm belongs to the provider and is not
//! implemented here.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::Credentials;
use crate::error::ClientError;

/// Header carrying the client id on the token request.
const API_KEY_HEADER: &str = "X-Api-Key";

/// Produces the signature the token endpoint expects in its `sig` parameter.
pub trait TokenSigner: Send + Sync {
    /// Sign a token request for `credentials` made at `timestamp` (unix seconds).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Signature` if no signature can be produced.
    fn sign(&self, credentials: &Credentials, timestamp: i64) -> Result<String, ClientError>;
}

/// Signer returning a precomputed, caller-supplied signature.
#[derive(Clone)]
pub struct StaticSigner {
    signature: SecretString,
}

impl StaticSigner {
    #[must_use]
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: SecretString::from(signature.into()),
        }
    }
}

impl std::fmt::Debug for StaticSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSigner")
            .field("signature", &"[REDACTED]")
            .finish()
    }
}

impl TokenSigner for StaticSigner {
    fn sign(&self, _credentials: &Credentials, _timestamp: i64) -> Result<String, ClientError> {
        Ok(self.signature.expose_secret().to_string())
    }
}

/// Signer used when none was configured. Always refuses.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingSigner;

impl TokenSigner for MissingSigner {
    fn sign(&self, _credentials: &Credentials, _timestamp: i64) -> Result<String, ClientError> {
        Err(ClientError::Signature(
            "no token signer configured".to_string(),
        ))
    }
}

/// Token payload returned by a successful login.
///
/// Implements `Debug` manually to redact the tokens.
#[derive(Clone)]
pub struct TokenPayload {
    pub access_token: SecretString,
    pub token_type: Option<String>,
    /// Token lifetime in seconds.
    pub expires_in: Option<i64>,
    pub refresh_token: Option<SecretString>,
    pub scope: Option<String>,
    /// Any further fields the provider returned.
    pub extra: HashMap<String, serde_json::Value>,
}

impl std::fmt::Debug for TokenPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPayload")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("scope", &self.scope)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Response from the token endpoint.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

impl From<TokenResponse> for TokenPayload {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: SecretString::from(response.access_token),
            token_type: response.token_type,
            expires_in: response.expires_in,
            refresh_token: response.refresh_token.map(SecretString::from),
            scope: response.scope,
            extra: response.extra,
        }
    }
}

/// Query parameters of the token request, besides the signature.
pub(crate) struct TokenQuery<'a> {
    pub market: &'a str,
    pub platform: &'a str,
}

/// Request a bearer token with the password grant.
///
/// # Errors
///
/// Returns `ClientError::Signature` if the signer refuses,
/// `ClientError::AuthFailure` on a non-success status, and
/// `ClientError::Decode` if the success body has no `access_token`.
#[instrument(skip(client, signer, credentials, password, query), fields(client_id = %credentials.client_id, username = %username))]
pub(crate) async fn password_grant(
    client: &reqwest::Client,
    token_url: &Url,
    signer: &dyn TokenSigner,
    credentials: &Credentials,
    query: &TokenQuery<'_>,
    username: &str,
    password: &SecretString,
) -> Result<TokenPayload, ClientError> {
    let signature = signer.sign(credentials, chrono::Utc::now().timestamp())?;

    let mut url = token_url.clone();
    url.query_pairs_mut()
        .append_pair("sig", &signature)
        .append_pair("market", query.market)
        .append_pair("platform", query.platform);

    let params = [
        ("grant_type", "password"),
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.expose_secret()),
        ("username", username),
        ("password", password.expose_secret()),
    ];

    let response = client
        .post(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .header(API_KEY_HEADER, credentials.client_id.as_str())
        .form(&params)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!(status = status.as_u16(), "Token request rejected");
        return Err(ClientError::AuthFailure {
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = serde_json::from_str(&body)?;
    debug!(expires_in = ?token.expires_in, "Token obtained");

    Ok(token.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_static_signer_returns_value() {
        let signer = StaticSigner::new("abc123");
        let credentials = Credentials::new("id", "secret");
        assert_eq!(signer.sign(&credentials, 0).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_signer_refuses() {
        let credentials = Credentials::new("id", "secret");
        let result = MissingSigner.sign(&credentials, 0);
        assert!(matches!(result, Err(ClientError::Signature(_))));
    }

    #[test]
    fn test_token_response_keeps_extra_fields() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token":"T","expires_in":3600,"scope":"test_scope","uid":"42"}"#,
        )
        .unwrap();
        let payload = TokenPayload::from(response);

        assert_eq!(payload.access_token.expose_secret(), "T");
        assert_eq!(payload.expires_in, Some(3600));
        assert_eq!(payload.scope.as_deref(), Some("test_scope"));
        assert_eq!(payload.extra.get("uid"), Some(&serde_json::json!("42")));
        assert!(payload.refresh_token.is_none());
    }

    #[test]
    fn test_token_response_requires_access_token() {
        let result = serde_json::from_str::<TokenResponse>(r#"{"token_type":"bearer"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_payload_debug_redacts_tokens() {
        let payload = TokenPayload::from(
            serde_json::from_str::<TokenResponse>(
                r#"{"access_token":"very-secret-token","refresh_token":"also-secret"}"#,
            )
            .unwrap(),
        );
        let debug = format!("{payload:?}");
        assert!(!debug.contains("very-secret-token"));
        assert!(!debug.contains("also-secret"));
    }
}
