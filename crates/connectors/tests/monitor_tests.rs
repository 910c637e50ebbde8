// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the connection monitor
//!
//! Covers the aggregate probe cycle: mixed service states, unconfigured
//! short-circuits, idempotent repeat cycles, and the in-flight guard.

use std::{sync::Arc, time::Duration};

use connectors::{
    ChainClient, ChainConfig, ConnectionMonitor, PinningClient, PinningConfig, StoreClient,
    StoreConfig,
};
use serde_json::json;
use service_client::RecordingSink;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, path_regex},
};

fn build_monitor(
    store: StoreConfig,
    chain: ChainConfig,
    pinning: PinningConfig,
    wallet_configured: bool,
) -> ConnectionMonitor {
    let store = StoreClient::new(store, Arc::new(RecordingSink::new())).unwrap();
    let chain = ChainClient::new(chain).unwrap();
    let pinning = PinningClient::new(pinning).unwrap();
    ConnectionMonitor::new(store, chain, pinning, wallet_configured)
}

async fn mount_healthy_chain(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/rpc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": "0xf4240",
        })))
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/price"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ethereum": {"usd": 3200.0}})),
        )
        .mount(mock_server)
        .await;
}

fn chain_config(base_url: &str) -> ChainConfig {
    ChainConfig {
        rpc_url: format!("{base_url}/rpc"),
        price_url: format!("{base_url}/price"),
        timeout_seconds: 5,
    }
}

fn pinning_config(base_url: &str) -> PinningConfig {
    PinningConfig {
        base_url: base_url.to_string(),
        jwt: "test-jwt".to_string(),
        timeout_seconds: 5,
    }
}

#[tokio::test]
async fn mixed_states_merge_into_one_snapshot() {
    let mock_server = MockServer::start().await;
    mount_healthy_chain(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/data/testAuthentication"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    // Reachable URL but no anon key: the store must stay silent.
    Mock::given(method("GET"))
        .and(path_regex(r"^/rest/v1/.*$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;
    let store_config = StoreConfig {
        base_url: mock_server.uri(),
        anon_key: String::new(),
        timeout_seconds: 5,
    };

    let monitor = build_monitor(
        store_config,
        chain_config(&mock_server.uri()),
        pinning_config(&mock_server.uri()),
        true,
    );

    let snapshot = monitor.test_all().await;

    let store = snapshot.store.unwrap();
    assert!(!store.configured);
    assert!(!store.connected);
    assert!(store.latency_ms.is_none());

    let chain = snapshot.chain.unwrap();
    assert!(chain.configured);
    assert!(chain.connected);
    assert_eq!(chain.block_number, Some(1_000_000));
    assert_eq!(chain.reference_price_usd, Some(3200.0));

    let pinning = snapshot.pinning.unwrap();
    assert!(pinning.configured);
    assert!(!pinning.connected);
    assert_eq!(pinning.error.as_deref(), Some("401 unauthorized"));

    assert!(snapshot.wallet_configured);
    assert!(snapshot.last_tested.is_some());
    assert!(!monitor.is_testing());
}

#[tokio::test]
async fn repeated_cycles_agree_when_nothing_changed() {
    let mock_server = MockServer::start().await;
    mount_healthy_chain(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/data/testAuthentication"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/rest/v1/[a-z_]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    let store_config = StoreConfig {
        base_url: mock_server.uri(),
        anon_key: "test-anon-key".to_string(),
        timeout_seconds: 5,
    };

    let monitor = build_monitor(
        store_config,
        chain_config(&mock_server.uri()),
        pinning_config(&mock_server.uri()),
        false,
    );

    let first = monitor.test_all().await;
    let second = monitor.test_all().await;

    let (first_store, second_store) = (first.store.unwrap(), second.store.unwrap());
    assert_eq!(first_store.connected, second_store.connected);
    assert_eq!(first_store.error, second_store.error);

    let (first_chain, second_chain) = (first.chain.unwrap(), second.chain.unwrap());
    assert_eq!(first_chain.connected, second_chain.connected);
    assert_eq!(first_chain.block_number, second_chain.block_number);

    let (first_pin, second_pin) = (first.pinning.unwrap(), second.pinning.unwrap());
    assert_eq!(first_pin.connected, second_pin.connected);
    assert_eq!(first_pin.error, second_pin.error);
}

#[tokio::test]
async fn every_connector_failing_still_yields_complete_snapshot() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rpc"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/testAuthentication"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/rest/v1/.*$"))
        .respond_with(ResponseTemplate::new(500).set_body_string("everything is broken"))
        .mount(&mock_server)
        .await;
    let store_config = StoreConfig {
        base_url: mock_server.uri(),
        anon_key: "test-anon-key".to_string(),
        timeout_seconds: 5,
    };

    let monitor = build_monitor(
        store_config,
        chain_config(&mock_server.uri()),
        pinning_config(&mock_server.uri()),
        false,
    );

    let snapshot = monitor.test_all().await;
    for report in [
        snapshot.store.unwrap(),
        snapshot.chain.unwrap(),
        snapshot.pinning.unwrap(),
    ] {
        assert!(report.configured);
        assert!(!report.connected);
        assert!(report.error.is_some());
    }
    assert!(snapshot.last_tested.is_some());
}

#[tokio::test]
async fn in_flight_cycle_turns_reentry_into_noop() {
    let mock_server = MockServer::start().await;
    mount_healthy_chain(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/data/testAuthentication"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/rest/v1/[a-z_]+$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&mock_server)
        .await;
    let store_config = StoreConfig {
        base_url: mock_server.uri(),
        anon_key: "test-anon-key".to_string(),
        timeout_seconds: 5,
    };

    let monitor = Arc::new(build_monitor(
        store_config,
        chain_config(&mock_server.uri()),
        pinning_config(&mock_server.uri()),
        true,
    ));

    let slow = {
        let monitor = Arc::clone(&monitor);
        tokio::spawn(async move { monitor.test_all().await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    // The first cycle is still probing tables; re-entry must not start a
    // second cycle and returns the (still empty) current snapshot.
    assert!(monitor.is_testing());
    let noop = monitor.test_all().await;
    assert!(!noop.has_been_tested());

    let published = slow.await.unwrap();
    assert!(published.has_been_tested());
    assert!(published.store.unwrap().connected);
    assert!(monitor.current().await.has_been_tested());
    assert!(!monitor.is_testing());
}

#[tokio::test]
async fn dropping_a_cycle_mid_flight_releases_the_guard() {
    let mock_server = MockServer::start().await;
    mount_healthy_chain(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/data/testAuthentication"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/rest/v1/[a-z_]+$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(250)),
        )
        .mount(&mock_server)
        .await;
    let store_config = StoreConfig {
        base_url: mock_server.uri(),
        anon_key: "test-anon-key".to_string(),
        timeout_seconds: 5,
    };

    let monitor = build_monitor(
        store_config,
        chain_config(&mock_server.uri()),
        pinning_config(&mock_server.uri()),
        true,
    );

    // A request timeout or client disconnect drops the cycle future while
    // the store tables are still being probed.
    let abandoned = tokio::time::timeout(Duration::from_millis(100), monitor.test_all()).await;
    assert!(abandoned.is_err());

    // The abandoned cycle published nothing and freed the in-flight flag.
    assert!(!monitor.is_testing());
    assert!(!monitor.current().await.has_been_tested());

    let published = monitor.test_all().await;
    assert!(published.has_been_tested());
    assert!(published.store.unwrap().connected);
    assert!(!monitor.is_testing());
}
