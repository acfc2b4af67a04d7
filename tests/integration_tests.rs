// Integration tests: HTTP endpoints
#![cfg(unix)]

mod common;

use axum::body::Bytes;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use common::{FakeHdc, HEALTHY_DEVICE};
use hdc_mcp::routes;
use serde_json::{Value, json};
use std::sync::Arc;

fn test_server(fake: &FakeHdc) -> TestServer {
    TestServer::new(routes::app(Arc::new(fake.dispatcher())))
}

#[tokio::test]
async fn test_version_endpoint() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let server = test_server(&fake);
    let response = server.get("/version").await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json.get("name").and_then(|v| v.as_str()), Some("hdc-mcp"));
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_tools_endpoint() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let server = test_server(&fake);
    let response = server.get("/api/tools").await;
    response.assert_status_ok();
    let json: Value = response.json();
    let tools = json["tools"].as_array().unwrap();
    assert!(tools.iter().any(|t| t["name"] == "hdc_list_devices"));
}

#[tokio::test]
async fn test_mcp_tools_call() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let server = test_server(&fake);
    let response = server
        .post("/mcp")
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": "hdc_list_devices", "arguments": {} }
        }))
        .await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["id"], 1);
    assert_eq!(
        json["result"]["content"][0]["text"],
        "Connected devices:\n- DEV1 (USB) - Connected [localhost]"
    );
}

#[tokio::test]
async fn test_mcp_notification_accepted() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let server = test_server(&fake);
    let response = server
        .post("/mcp")
        .json(&json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
        .await;
    response.assert_status(StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_mcp_malformed_body() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let server = test_server(&fake);
    let response = server
        .post("/mcp")
        .bytes(Bytes::from_static(b"{oops"))
        .content_type("application/json")
        .await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["error"]["code"], -32700);
    assert_eq!(json["id"], Value::Null);
}

fn origin(value: &'static str) -> (HeaderName, HeaderValue) {
    (HeaderName::from_static("origin"), HeaderValue::from_static(value))
}

#[tokio::test]
async fn test_mcp_rejects_text_plain_cross_origin() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let server = test_server(&fake);
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": { "name": "hdc_reboot_device", "arguments": { "deviceId": "DEV1" } }
    });
    let (name, value) = origin("https://evil.example");
    let response = server
        .post("/mcp")
        .add_header(name, value)
        .text(body.to_string())
        .await;
    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(response.headers().get("access-control-allow-origin").is_none());
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_mcp_has_no_cors_but_reads_do() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let server = test_server(&fake);

    let (name, value) = origin("https://evil.example");
    let response = server
        .post("/mcp")
        .add_header(name, value)
        .json(&json!({ "jsonrpc": "2.0", "id": 1, "method": "ping" }))
        .await;
    response.assert_status_ok();
    assert!(response.headers().get("access-control-allow-origin").is_none());

    let (name, value) = origin("https://dashboard.example");
    let response = server.get("/version").add_header(name, value).await;
    response.assert_status_ok();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
