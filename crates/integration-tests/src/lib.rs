//! Integration tests for Brewpass.
//!
//! Each test starts a `wiremock` server standing in for the commerce API and
//! the public store locator, then drives a real [`BrewpassClient`] against it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p brewpass-integration-tests
//! ```
//!
//! Set `RUST_LOG=brewpass_client=debug` to see the client's tracing output.

use brewpass_client::{BrewpassClient, ClientConfig, StaticSigner};
use wiremock::MockServer;

/// Path prefix the mock API is mounted under.
pub const API_PREFIX: &str = "/v1";

/// Path of the mock public locator.
pub const LOCATOR_PATH: &str = "/bff/locations";

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const SIGNATURE: &str = "test-signature";
pub const ACCESS_TOKEN: &str = "T";

/// Full mock path of an API endpoint, e.g. `api_path("me/cards")`.
#[must_use]
pub fn api_path(endpoint: &str) -> String {
    format!("{API_PREFIX}/{endpoint}")
}

/// Install a test-writer tracing subscriber. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Configuration pointing both the API and the locator at `server`.
///
/// # Panics
///
/// Panics if the mock server URI is not a valid base URL.
#[must_use]
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default()
        .with_api_base(&format!("{}{API_PREFIX}", server.uri()))
        .and_then(|config| config.with_locator_url(&format!("{}{LOCATOR_PATH}", server.uri())))
        .expect("mock server URI is a valid base")
}

/// Client for `server` with a static token signer and no session.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn client_for(server: &MockServer) -> BrewpassClient {
    init_tracing();
    BrewpassClient::with_signer(config_for(server), StaticSigner::new(SIGNATURE))
        .expect("client builds")
}

/// Client for `server` that already holds [`ACCESS_TOKEN`].
pub async fn authed_client_for(server: &MockServer) -> BrewpassClient {
    let client = client_for(server);
    client.set_token(ACCESS_TOKEN).await;
    client
}

/// Canned provider payloads.
pub mod fixtures {
    use serde_json::{Value, json};

    #[must_use]
    pub fn token_response() -> Value {
        json!({
            "access_token": super::ACCESS_TOKEN,
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "R",
            "scope": "test_scope"
        })
    }

    #[must_use]
    pub fn nearby_stores() -> Value {
        json!({
            "stores": [
                {
                    "distance": 0.4,
                    "store": {
                        "id": "1001",
                        "name": "Main & 5th",
                        "storeNumber": "12345-67890",
                        "address": {
                            "streetAddressLine1": "500 Main St",
                            "city": "Langley",
                            "countrySubdivisionCode": "BC",
                            "postalCode": "V3A 1A1",
                            "countryCode": "CA"
                        }
                    }
                },
                {
                    "distance": 1.2,
                    "store": {
                        "id": 1002,
                        "name": "Willowbrook",
                        "storeNumber": "22222-33333"
                    }
                }
            ]
        })
    }

    #[must_use]
    pub fn located_stores() -> Value {
        json!({
            "stores": [
                {
                    "distance": 0.1,
                    "store": {
                        "id": "2001",
                        "name": "Pike Place",
                        "storeNumber": "10001-1",
                        "address": {
                            "streetAddressLine1": "1912 Pike Pl",
                            "city": "Seattle",
                            "countrySubdivisionCode": "WA",
                            "postalCode": "98101",
                            "countryCode": "US"
                        },
                        "mobileOrdering": { "availability": "READY" },
                        "schedule": [
                            { "dayName": "Today", "hours": "6:00 AM to 9:00 PM" },
                            { "dayName": "Tomorrow", "hours": "6:00 AM to 8:00 PM" }
                        ]
                    }
                },
                {
                    "distance": 0.9,
                    "store": {
                        "id": "2002",
                        "name": "1st & Pike",
                        "mobileOrdering": { "availability": "UNAVAILABLE" }
                    }
                }
            ]
        })
    }

    #[must_use]
    pub fn cards() -> Value {
        json!([
            { "cardId": "C1", "cardNumber": "****1234", "nickname": "Daily", "balance": 12.5 },
            { "cardId": "C2", "cardNumber": "****9876", "balance": "0.75" }
        ])
    }

    #[must_use]
    pub fn order_history() -> Value {
        json!({
            "orderHistoryItems": [
                {
                    "basket": {
                        "id": "basket-1",
                        "preparation": "InStore",
                        "items": [
                            {
                                "quantity": 2,
                                "commerce": { "sku": "11022328" },
                                "product": { "name": "Caffe Latte" }
                            },
                            {
                                "quantity": 1,
                                "commerce": { "sku": "11029999" },
                                "product": { "name": "Butter Croissant" }
                            }
                        ]
                    }
                }
            ]
        })
    }

    #[must_use]
    pub fn priced_order() -> Value {
        json!({
            "orderToken": "order-token-abc",
            "signature": "pricing-signature-xyz",
            "summary": { "totalAmount": 13.45 },
            "store": { "storeNumber": "12345-67890" }
        })
    }

    #[must_use]
    pub fn order_confirmation() -> Value {
        json!({
            "orderId": "confirmation-1",
            "status": "Submitted"
        })
    }

    #[must_use]
    pub fn rewards() -> Value {
        json!({
            "currentLevel": "Gold",
            "starsBalance": 142,
            "freeDrinks": 1
        })
    }
}
