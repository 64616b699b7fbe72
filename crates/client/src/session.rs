//! Per-client session state.

use secrecy::{ExposeSecret, SecretString};

use crate::config::Credentials;

/// Credentials and bearer token held by one client instance.
///
/// Starts empty unless the configuration carries credentials. The token is
/// set by a successful login or by direct assignment and lives until the
/// client is dropped.
#[derive(Clone, Default)]
pub struct Session {
    credentials: Option<Credentials>,
    token: Option<SecretString>,
}

impl Session {
    #[must_use]
    pub const fn new(credentials: Option<Credentials>) -> Self {
        Self {
            credentials,
            token: None,
        }
    }

    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    pub fn set_token(&mut self, token: SecretString) {
        self.token = Some(token);
    }

    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token, if one is present.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_ref().map(|token| token.expose_secret())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.credentials)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
