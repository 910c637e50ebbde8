// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the marketplace HTTP API
//!
//! Boots real servers on OS-assigned ports. Most tests leave every backing
//! service unconfigured to exercise the degraded-mode paths; the mint
//! round-trip runs against a wiremock store.

use api::{Server, ServerConfig, ShutdownConfig};
use axum::http::StatusCode;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path},
};

const CREATOR: &str = "0xcccccccccccccccccccccccccccccccccccccccc";

async fn boot(config: ServerConfig) -> std::net::SocketAddr {
    let (addr, _token) = Server::new(config, ShutdownConfig::default())
        .expect("Failed to create server")
        .run_for_testing()
        .await
        .expect("Failed to start test server");
    addr
}

#[tokio::test]
async fn unconfigured_server_serves_fallback_catalog() {
    let addr = boot(ServerConfig::for_testing()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/v1/assets"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let assets: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(assets.as_array().map(Vec::len), Some(4));
    assert_eq!(assets[0]["id"], "fallback-001");

    let stats: serde_json::Value = client
        .get(format!("http://{addr}/v1/stats"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(stats["total_assets"], 4);
}

#[tokio::test]
async fn fallback_asset_resolves_by_id_and_unknown_is_not_found() {
    let addr = boot(ServerConfig::for_testing()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/v1/assets/fallback-002"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let asset: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(asset["name"], "Mono No. 7");

    let response = client
        .get(format!("http://{addr}/v1/assets/no-such-asset"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.text().await.expect("Failed to read response");
    assert!(body.contains("Not found"));
}

#[tokio::test]
async fn minting_with_blank_name_is_rejected() {
    let addr = boot(ServerConfig::for_testing()).await;
    let client = reqwest::Client::new();

    let draft = json!({
        "name": "   ",
        "description": "no name",
        "category": "art",
        "image_url": null,
        "price": 1.0,
        "royalty_percent": 5.0,
        "creator_wallet": CREATOR,
    });

    let response = client
        .post(format!("http://{addr}/v1/assets"))
        .json(&draft)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.text().await.expect("Failed to read response");
    assert!(body.contains("Validation error"));
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let addr = boot(ServerConfig::for_testing()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/v1/assets"))
        .header("content-type", "application/json")
        .body("{\"name\": \"Broken\",")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.text().await.expect("Failed to read response");
    assert!(body.contains("Invalid JSON request"));
}

#[tokio::test]
async fn write_on_unconfigured_store_is_bad_gateway() {
    let addr = boot(ServerConfig::for_testing()).await;
    let client = reqwest::Client::new();

    let bid = json!({
        "bidder_wallet": "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
        "amount": 1.5,
    });

    let response = client
        .post(format!("http://{addr}/v1/assets/fallback-001/bids"))
        .json(&bid)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response.text().await.expect("Failed to read response");
    assert!(body.contains("Upstream write failed"));
}

#[tokio::test]
async fn connection_test_updates_status_and_health() {
    let addr = boot(ServerConfig::for_testing()).await;
    let client = reqwest::Client::new();

    // Before any test round the snapshot is empty
    let health: serde_json::Value = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(health["status"], "ok");
    assert_eq!(health["connections_tested"], false);

    // Unconfigured services report as such without network traffic
    let tested: serde_json::Value = client
        .post(format!("http://{addr}/v1/status/test"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(tested["store"]["configured"], false);
    assert_eq!(tested["chain"]["configured"], false);
    assert_eq!(tested["pinning"]["configured"], false);
    assert_eq!(tested["wallet_configured"], false);
    assert_eq!(tested["testing"], false);
    assert!(!tested["last_tested"].is_null());

    // The cached snapshot and the health flag both reflect the round
    let status: serde_json::Value = client
        .get(format!("http://{addr}/v1/status"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(!status["last_tested"].is_null());

    let health: serde_json::Value = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(health["connections_tested"], true);
}

#[tokio::test]
async fn rate_limited_routes_return_too_many_requests() {
    let mut config = ServerConfig::for_testing();
    config.rate_limiting.enabled = true;
    config.rate_limiting.requests_per_minute = 2;
    let addr = boot(config).await;
    let client = reqwest::Client::new();

    for _ in 0..2 {
        let response = client
            .get(format!("http://{addr}/v1/stats"))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = client
        .get(format!("http://{addr}/v1/stats"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Monitoring endpoints are exempt
    let response = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn mint_round_trip_persists_through_store() {
    let mock_store = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/assets"))
        .and(header("prefer", "return=representation"))
        .and(body_string_contains("Glass Tide"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": "asset-77",
            "name": "Glass Tide",
            "description": "fresh mint",
            "category": "art",
            "image_url": null,
            "price": 3.2,
            "royalty_percent": 5.0,
            "owner_wallet": CREATOR,
            "creator_wallet": CREATOR,
            "is_listed": true,
            "created_at": "2026-02-01T09:00:00Z",
        }])))
        .mount(&mock_store)
        .await;
    // Relations joined after the insert
    for table in ["users", "bids", "activities", "price_history"] {
        Mock::given(method("GET"))
            .and(path(format!("/rest/v1/{table}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_store)
            .await;
    }
    // Best-effort bookkeeping inserts
    for table in ["activities", "price_history"] {
        Mock::given(method("POST"))
            .and(path(format!("/rest/v1/{table}")))
            .respond_with(ResponseTemplate::new(201))
            .mount(&mock_store)
            .await;
    }

    let mut config = ServerConfig::for_testing();
    config.services.store.url = mock_store.uri();
    config.services.store.anon_key = "test-anon-key".to_string();
    let addr = boot(config).await;
    let client = reqwest::Client::new();

    let draft = json!({
        "name": "Glass Tide",
        "description": "fresh mint",
        "category": "art",
        "image_url": null,
        "price": 3.2,
        "royalty_percent": 5.0,
        "creator_wallet": CREATOR,
    });

    let response = client
        .post(format!("http://{addr}/v1/assets"))
        .json(&draft)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let asset: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(asset["id"], "asset-77");
    assert_eq!(asset["owner"]["wallet_address"], CREATOR);
    assert_eq!(asset["is_listed"], true);
}

#[tokio::test]
async fn docs_and_metrics_are_served() {
    let addr = boot(ServerConfig::for_testing()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/api-docs/openapi.json"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let document: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(document["paths"]["/v1/assets"].is_object());

    let response = client
        .get(format!("http://{addr}/docs"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .text()
            .await
            .expect("Failed to read response")
            .contains("swagger-ui")
    );

    let response = client
        .get(format!("http://{addr}/metrics"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("Failed to read response");
    assert!(body.contains("marketplace_api_http_requests_total"));
}
