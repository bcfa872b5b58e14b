// Integration tests for `NetworkClient` using wiremock.
#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unipress_api::network::types::{DeviceDetailsResponse, Page, SiteResponse};
use unipress_api::{Error, NetworkClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, NetworkClient) {
    let server = MockServer::start().await;
    let client = NetworkClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_sites() {
    let (server, client) = setup().await;

    let body = json!({
        "offset": 0,
        "limit": 25,
        "count": 2,
        "totalCount": 2,
        "data": [
            { "id": "site-a", "name": "Main", "internalReference": "default" },
            { "id": "site-b", "name": "Remote", "internalReference": "site2" },
        ]
    });

    Mock::given(method("GET"))
        .and(path("/proxy/network/integration/v1/sites"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page: Page<SiteResponse> = client.list_sites(0, 25).await.unwrap();

    assert_eq!(page.total_count, 2);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].name.as_deref(), Some("Main"));
    assert_eq!(page.data[0].internal_reference.as_deref(), Some("default"));
    assert_eq!(page.data[1].id, "site-b");
}

#[tokio::test]
async fn test_paginate_all_multiple_pages() {
    let (server, client) = setup().await;

    let first = json!({
        "offset": 0,
        "limit": 2,
        "count": 2,
        "totalCount": 3,
        "data": [
            { "id": "site-a", "name": "One" },
            { "id": "site-b", "name": "Two" },
        ]
    });
    let second = json!({
        "offset": 2,
        "limit": 2,
        "count": 1,
        "totalCount": 3,
        "data": [
            { "id": "site-c", "name": "Three" },
        ]
    });

    Mock::given(method("GET"))
        .and(path("/proxy/network/integration/v1/sites"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&first))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/proxy/network/integration/v1/sites"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&second))
        .mount(&server)
        .await;

    let sites = client
        .paginate_all(2, |offset, limit| client.list_sites(offset, limit))
        .await
        .unwrap();

    assert_eq!(sites.len(), 3);
    assert_eq!(sites[2].id, "site-c");
}

#[tokio::test]
async fn test_get_device_keeps_port_table() {
    let (server, client) = setup().await;

    let body = json!({
        "id": "device-1",
        "macAddress": "aa:bb:cc:dd:ee:ff",
        "ipAddress": "192.168.1.10",
        "name": "USW-Pro-24",
        "model": "USW-Pro-24-PoE",
        "state": "ONLINE",
        "firmwareVersion": "7.1.26",
        "port_table": [
            { "port_idx": 1, "name": "Port 1", "poe_enable": true },
            { "port_idx": 2, "name": "Port 2", "poe_enable": false },
        ],
        "serialNumber": "SN-1234"
    });

    Mock::given(method("GET"))
        .and(path("/proxy/network/integration/v1/sites/site-1/devices/device-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let device: DeviceDetailsResponse = client.get_device("site-1", "device-1").await.unwrap();

    assert_eq!(device.id, "device-1");
    assert_eq!(device.state.as_deref(), Some("ONLINE"));
    assert_eq!(device.port_table.len(), 2);
    assert_eq!(device.port_table[0]["poe_enable"], json!(true));
    // Unmodeled fields land in `extra`
    assert_eq!(device.extra["serialNumber"], json!("SN-1234"));
}

#[tokio::test]
async fn test_restart_device_accepted() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(
            "/proxy/network/integration/v1/sites/site-1/devices/device-1/actions",
        ))
        .and(body_json(json!({ "action": "RESTART" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "OK" })))
        .expect(1)
        .mount(&server)
        .await;

    let accepted = client.restart_device("site-1", "device-1").await.unwrap();

    assert!(accepted);
    server.verify().await;
}

#[tokio::test]
async fn test_restart_device_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(
            "/proxy/network/integration/v1/sites/site-1/devices/device-1/actions",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ERROR" })))
        .mount(&server)
        .await;

    let accepted = client.restart_device("site-1", "device-1").await.unwrap();

    assert!(!accepted);
}

#[tokio::test]
async fn test_power_cycle_port() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(
            "/proxy/network/integration/v1/sites/site-1/devices/device-1/interfaces/ports/3/actions",
        ))
        .and(body_json(json!({ "action": "POWER_CYCLE" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.power_cycle_port("site-1", "device-1", 3).await.unwrap();

    server.verify().await;
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_401_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_sites(0, 25).await;

    assert!(
        matches!(result, Err(Error::InvalidApiKey)),
        "expected InvalidApiKey, got: {result:?}"
    );
}

#[tokio::test]
async fn test_error_404_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(
            "/proxy/network/integration/v1/sites/site-1/devices/device-9",
        ))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found" })))
        .mount(&server)
        .await;

    let result = client.get_device("site-1", "device-9").await;

    match result {
        Err(Error::Api {
            status,
            ref message,
            ..
        }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not found");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_500_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.list_sites(0, 25).await;

    match result {
        Err(Error::Api {
            status, ref code, ..
        }) => {
            assert_eq!(status, 500);
            assert!(code.is_none());
        }
        other => panic!("expected Api 500 error, got: {other:?}"),
    }
}
