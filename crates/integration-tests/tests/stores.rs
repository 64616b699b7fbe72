//! Integration tests for the authenticated store search and the public locator.

use serde_json::json;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use brewpass_client::ClientError;
use brewpass_client::types::{StoreId, StoreNumber};
use brewpass_integration_tests::{LOCATOR_PATH, api_path, authed_client_for, client_for, fixtures};

// =============================================================================
// Nearby Stores
// =============================================================================

#[tokio::test]
async fn test_nearby_stores_maps_reduced_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("stores/nearby")))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::nearby_stores()))
        .mount(&server)
        .await;

    let client = authed_client_for(&server).await;
    let stores = client
        .nearby_stores(49.1, -122.6, 5, 3)
        .await
        .expect("stores fetched");

    assert_eq!(stores.len(), 2);

    let first = stores.first().expect("first store");
    assert_eq!(first.id, Some(StoreId::new("1001")));
    assert_eq!(first.name.as_deref(), Some("Main & 5th"));
    assert_eq!(first.store_number, Some(StoreNumber::new("12345-67890")));
    assert_eq!(first.distance, Some(0.4));
    assert_eq!(
        first.address_line().as_deref(),
        Some("500 Main St, Langley, BC, V3A 1A1")
    );
    // Only the locator reports these.
    assert_eq!(first.mobile_ordering, None);
    assert_eq!(first.hours_today, None);

    let second = stores.get(1).expect("second store");
    assert_eq!(second.id, Some(StoreId::new("1002")));
    assert!(second.address.is_none());
}

#[tokio::test]
async fn test_nearby_stores_empty_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("stores/nearby")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = authed_client_for(&server).await;
    let stores = client
        .nearby_stores(0.0, 0.0, 10, 1)
        .await
        .expect("stores fetched");
    assert!(stores.is_empty());
}

#[tokio::test]
async fn test_nearby_stores_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("stores/nearby")))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad latlng"))
        .mount(&server)
        .await;

    let client = authed_client_for(&server).await;
    let err = client
        .nearby_stores(999.0, 999.0, 5, 3)
        .await
        .expect_err("request rejected");
    assert_eq!(err.status(), Some(400));
}

// =============================================================================
// Locator
// =============================================================================

#[tokio::test]
async fn test_stores_by_address_needs_no_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LOCATOR_PATH))
        .and(query_param("place", "1912 Pike Pl, Seattle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::located_stores()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let stores = client
        .stores_by_address("1912 Pike Pl, Seattle")
        .await
        .expect("stores located");

    assert_eq!(stores.len(), 2);

    let pike = stores.first().expect("first store");
    assert_eq!(pike.name.as_deref(), Some("Pike Place"));
    assert_eq!(pike.mobile_ordering, Some(true));
    assert_eq!(pike.hours_today.as_deref(), Some("6:00 AM to 9:00 PM"));
    assert_eq!(pike.distance, Some(0.1));

    let other = stores.get(1).expect("second store");
    assert_eq!(other.mobile_ordering, Some(false));
    assert_eq!(other.hours_today, None);

    let received = server.received_requests().await.expect("recording enabled");
    let request = received.first().expect("one request");
    assert!(!request.headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_stores_by_address_accepts_bare_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LOCATOR_PATH))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "store": { "id": "9", "name": "Kiosk" } }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let stores = client
        .stores_by_address("anywhere")
        .await
        .expect("stores located");

    assert_eq!(stores.len(), 1);
    assert_eq!(
        stores.first().and_then(|store| store.name.as_deref()),
        Some("Kiosk")
    );
}

#[tokio::test]
async fn test_stores_by_address_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LOCATOR_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .stores_by_address("anywhere")
        .await
        .expect_err("locator rejected");

    assert!(matches!(err, ClientError::Api { status: 429, .. }));
}
