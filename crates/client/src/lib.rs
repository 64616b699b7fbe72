//! Brewpass Client - commerce API binding.
//!
//! A thin, direct client for a coffee-chain commerce API: store locator,
//! registered cards, rewards, and reordering (price then submit).
//!
//! # Architecture
//!
//! - [`BrewpassClient`] holds the configuration and the session (client
//!   credentials and bearer token) behind an `Arc`, so clones share one login
//! - Every operation is a single round trip through one request path; there
//!   are no retries and no caching
//! - Upstream JSON is mapped into the plain records of `brewpass-core`
//!
//! # Example
//!
//! ```rust,no_run
//! use brewpass_client::{BrewpassClient, ClientConfig};
//! use secrecy::SecretString;
//!
//! # async fn run() -> Result<(), brewpass_client::ClientError> {
//! let config = ClientConfig::from_env()?.with_token_signature("precomputed-sig");
//! let client = BrewpassClient::new(config)?;
//!
//! client
//!     .set_credentials("client-id", "client-secret")
//!     .await
//!     .login("user@example.com", &SecretString::from("password"))
//!     .await?;
//!
//! let stores = client.nearby_stores(49.1, -122.6, 5, 3).await?;
//! # let _ = stores;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod account;
pub mod auth;
pub mod client;
pub mod config;
mod conversions;
pub mod error;
mod orders;
pub mod session;
mod stores;

pub use auth::{MissingSigner, StaticSigner, TokenPayload, TokenSigner};
pub use client::BrewpassClient;
pub use config::{ClientConfig, ConfigError, Credentials};
pub use error::ClientError;
pub use session::Session;

pub use reqwest::Method;

pub use brewpass_core as types;
