//! Integration tests for registered cards and rewards.

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use brewpass_client::types::CardId;
use brewpass_integration_tests::{api_path, authed_client_for, fixtures};

#[tokio::test]
async fn test_cards_maps_balances() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("me/cards")))
        .and(header("authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::cards()))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client_for(&server).await;
    let cards = client.cards().await.expect("cards fetched");

    assert_eq!(cards.len(), 2);

    let daily = cards.first().expect("first card");
    assert_eq!(daily.id, Some(CardId::new("C1")));
    assert_eq!(daily.nickname.as_deref(), Some("Daily"));
    assert_eq!(daily.balance, Some(Decimal::new(125, 1)));

    let spare = cards.get(1).expect("second card");
    assert_eq!(spare.balance, Some(Decimal::new(75, 2)));
    assert!(!spare.covers(Decimal::ONE));
}

#[tokio::test]
async fn test_cards_non_array_payload_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("me/cards")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "no cards" })),
        )
        .mount(&server)
        .await;

    let client = authed_client_for(&server).await;
    let cards = client.cards().await.expect("cards fetched");
    assert!(cards.is_empty());
}

#[tokio::test]
async fn test_rewards_returns_payload_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("me/rewards")))
        .and(query_param("locale", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::rewards()))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client_for(&server).await;
    let rewards = client.rewards().await.expect("rewards fetched");

    assert_eq!(rewards, fixtures::rewards());
}
