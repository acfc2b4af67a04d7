// Tool dispatch: rendering, argument validation, error responses
#![cfg(unix)]

mod common;

use common::{FakeHdc, HEALTHY_DEVICE};
use serde_json::json;

#[tokio::test]
async fn test_unknown_tool_is_error_response() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch("hdc_does_not_exist", &json!({}))
        .await;
    assert!(resp.is_error());
    assert_eq!(resp.first_text(), "Error: unknown tool: hdc_does_not_exist");
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_get_version() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch("hdc_get_version", &json!({}))
        .await;
    assert!(!resp.is_error());
    assert_eq!(resp.first_text(), "HDC Version: Ver: 2.0.0a");
}

#[tokio::test]
async fn test_list_devices_rendering() {
    let fake = FakeHdc::new("printf '1234ABCD\\tUSB\\tConnected\\n5678EFGH\\tTCP\\tOffline\\n'");
    let resp = fake
        .dispatcher()
        .dispatch("hdc_list_devices", &serde_json::Value::Null)
        .await;
    assert_eq!(
        resp.first_text(),
        "Connected devices:\n- 1234ABCD (USB) - Connected\n- 5678EFGH (TCP) - Disconnected"
    );
}

#[tokio::test]
async fn test_list_devices_none_connected() {
    let fake = FakeHdc::new("echo '[Empty]'");
    let resp = fake
        .dispatcher()
        .dispatch("hdc_list_devices", &json!({}))
        .await;
    assert_eq!(resp.first_text(), "No devices connected");
}

#[tokio::test]
async fn test_device_info_rendering() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch("hdc_get_device_info", &json!({ "deviceId": "DEV1" }))
        .await;
    assert!(!resp.is_error());
    let text = resp.first_text();
    assert!(text.starts_with("Device Information:\nName: Mate 60\nBrand: HUAWEI\n"));
    assert!(text.contains("Resolution: 1260x2720\n"));
    assert!(text.contains("IP Address: 192.168.1.23\n"));
    assert!(text.contains("Battery: 85%\n"));
    assert!(text.ends_with("Temperature: 36.5°C"));
}

#[tokio::test]
async fn test_device_info_failure_is_error_response() {
    let body = HEALTHY_DEVICE.replace(
        r#"printf 'capacity: 85\ntemperature: 365\n'"#,
        "exit 1",
    );
    let fake = FakeHdc::new(&body);
    let resp = fake
        .dispatcher()
        .dispatch("hdc_get_device_info", &json!({ "deviceId": "DEV1" }))
        .await;
    assert!(resp.is_error());
    assert!(
        resp.first_text()
            .starts_with("Error: failed to get device info for DEV1")
    );
    assert!(!resp.first_text().contains("Mate 60"));
}

#[tokio::test]
async fn test_start_app_default_ability() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch(
            "hdc_start_app",
            &json!({ "deviceId": "DEV1", "bundleName": "com.example.app" }),
        )
        .await;
    assert_eq!(resp.first_text(), "Start app result: ok");
    assert_eq!(
        fake.calls(),
        vec!["-t DEV1 shell aa start -a MainAbility -b com.example.app"]
    );
}

#[tokio::test]
async fn test_missing_required_argument_not_executed() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch("hdc_uninstall_app", &json!({ "deviceId": "DEV1" }))
        .await;
    assert!(resp.is_error());
    assert_eq!(
        resp.first_text(),
        "Error: missing required argument: bundleName"
    );
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_ill_typed_argument_rejected() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch(
            "hdc_ui_click",
            &json!({ "deviceId": "DEV1", "x": "left", "y": 10 }),
        )
        .await;
    assert!(resp.is_error());
    assert!(resp.first_text().contains("invalid argument x"));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_execution_failure_is_error_response() {
    let fake = FakeHdc::new("echo '[Fail]Not any installation package was found'");
    let resp = fake
        .dispatcher()
        .dispatch(
            "hdc_install_app",
            &json!({ "deviceId": "DEV1", "appPath": "/tmp/missing.hap" }),
        )
        .await;
    assert!(resp.is_error());
    assert!(resp.first_text().contains("Not any installation package"));
}

#[tokio::test]
async fn test_list_apps_rendering() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch("hdc_list_apps", &json!({ "deviceId": "DEV1" }))
        .await;
    assert_eq!(
        resp.first_text(),
        "Installed apps:\n- com.example.app v1.0.0 (Example) [Debuggable]\n- com.example.other vUnknown"
    );
}

#[tokio::test]
async fn test_get_logs_lines_as_string() {
    let fake = FakeHdc::new("printf 'a\\nb\\nc\\n'");
    let resp = fake
        .dispatcher()
        .dispatch(
            "hdc_get_logs",
            &json!({ "deviceId": "DEV1", "lines": "2" }),
        )
        .await;
    assert_eq!(resp.first_text(), "Device logs:\nb\nc");
    assert_eq!(fake.calls(), vec!["-t DEV1 shell hilog -x -z 2"]);
}

#[tokio::test]
async fn test_take_screenshot_rendering() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch(
            "hdc_take_screenshot",
            &json!({ "deviceId": "DEV1", "savePath": "/tmp/screen.jpeg" }),
        )
        .await;
    assert_eq!(resp.first_text(), "Screenshot saved: /tmp/screen.jpeg");
}

#[tokio::test]
async fn test_swipe_direction_unknown_name() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch(
            "hdc_ui_swipe_direction",
            &json!({ "deviceId": "DEV1", "direction": "sideways" }),
        )
        .await;
    assert!(resp.is_error());
    assert!(resp.first_text().contains("direction"));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_input_text_is_quoted_for_device_shell() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch(
            "hdc_ui_input_text",
            &json!({ "deviceId": "DEV1", "x": 100, "y": 200, "text": "hello world" }),
        )
        .await;
    assert!(!resp.is_error());
    assert_eq!(
        fake.calls(),
        vec!["-t DEV1 shell uitest uiInput inputText 100 200 'hello world'"]
    );
}

#[tokio::test]
async fn test_ui_click_renders_result_or_error() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch("hdc_ui_click", &json!({ "deviceId": "DEV1", "x": 1, "y": 2 }))
        .await;
    assert!(!resp.is_error());
    assert_eq!(resp.first_text(), "UI result: Clicked at (1, 2): ok");

    let fake = FakeHdc::new("echo 'uitest: no such window' >&2; exit 1");
    let resp = fake
        .dispatcher()
        .dispatch("hdc_ui_click", &json!({ "deviceId": "DEV1", "x": 1, "y": 2 }))
        .await;
    assert!(resp.is_error());
    assert!(resp.first_text().contains("no such window"));
}

#[tokio::test]
async fn test_input_text_whitespace_is_typed() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch(
            "hdc_ui_input_text",
            &json!({ "deviceId": "DEV1", "x": 1, "y": 2, "text": " " }),
        )
        .await;
    assert!(!resp.is_error(), "{}", resp.first_text());
    assert_eq!(
        fake.calls(),
        vec!["-t DEV1 shell uitest uiInput inputText 1 2 ' '"]
    );
}

#[tokio::test]
async fn test_blank_device_id_still_rejected() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch(
            "hdc_ui_input_text",
            &json!({ "deviceId": " ", "x": 1, "y": 2, "text": "a" }),
        )
        .await;
    assert!(resp.is_error());
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_key_event_numeric_codes() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake
        .dispatcher()
        .dispatch(
            "hdc_ui_key_event",
            &json!({ "deviceId": "DEV1", "keyId": 2072, "keyId2": 2038 }),
        )
        .await;
    assert!(!resp.is_error());
    assert_eq!(
        fake.calls(),
        vec!["-t DEV1 shell uitest uiInput keyEvent 2072 2038"]
    );
}

#[tokio::test]
async fn test_documentation_tool_spawns_nothing() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let resp = fake.dispatcher().dispatch("hdc_aa_tool", &json!({})).await;
    assert!(!resp.is_error());
    assert!(resp.first_text().contains("aa start -a"));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_tools_listing_schema() {
    let fake = FakeHdc::new(HEALTHY_DEVICE);
    let tools = fake.dispatcher().tools();
    let start = tools
        .iter()
        .find(|t| t["name"] == "hdc_start_app")
        .expect("hdc_start_app listed");
    assert_eq!(start["inputSchema"]["type"], "object");
    assert_eq!(
        start["inputSchema"]["required"],
        json!(["deviceId", "bundleName"])
    );
    assert!(start["inputSchema"]["properties"]["abilityName"].is_object());
}
