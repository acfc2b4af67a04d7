// Model serialization tests (JSON camelCase)

use hdc_mcp::models::*;

#[test]
fn test_device_serialization_camel_case() {
    let device = Device {
        connect_key: "1234ABCD".into(),
        connection_type: ConnectionType::Usb,
        status: DeviceStatus::Connected,
        device_name: None,
    };
    let json = serde_json::to_value(&device).unwrap();
    assert_eq!(json["connectKey"], "1234ABCD");
    assert_eq!(json["connectionType"], "USB");
    assert_eq!(json["status"], "Connected");
    assert!(json.get("deviceName").is_none());
}

#[test]
fn test_unknown_connection_type_deserializes() {
    let device: Device = serde_json::from_str(
        r#"{"connectKey":"x","connectionType":"BT","status":"Connected"}"#,
    )
    .unwrap();
    assert_eq!(device.connection_type, ConnectionType::Unknown);
}

#[test]
fn test_status_from_hdc_variants() {
    assert_eq!(DeviceStatus::from_hdc("Connected"), DeviceStatus::Connected);
    assert_eq!(DeviceStatus::from_hdc("Offline"), DeviceStatus::Disconnected);
    assert_eq!(DeviceStatus::from_hdc("Unauthorized"), DeviceStatus::Unknown);
    assert_eq!(ConnectionType::from_hdc("usb"), ConnectionType::Usb);
}

#[test]
fn test_device_info_serialization() {
    let info = DeviceInfo {
        name: "Mate 60".into(),
        brand: "HUAWEI".into(),
        model: "ALN-AL00".into(),
        version: "5.0.0".into(),
        api_version: "12".into(),
        cpu_arch: "arm64-v8a".into(),
        resolution: "1260x2720".into(),
        ip_address: UNKNOWN.into(),
        battery: 85,
        temperature: 36.5,
    };
    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["apiVersion"], "12");
    assert_eq!(json["cpuArch"], "arm64-v8a");
    assert_eq!(json["ipAddress"], "Unknown");
    assert_eq!(json["temperature"], 36.5);
}

#[test]
fn test_ui_result_skips_absent_fields() {
    let result = UiOperationResult::ok("Swiped up").toward(SwipeDirection::Up);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["direction"], "up");
    assert!(json.get("x").is_none());
    assert!(json.get("text").is_none());
}

#[test]
fn test_swipe_direction_codes() {
    assert_eq!(SwipeDirection::Left.code(), 0);
    assert_eq!(SwipeDirection::Right.code(), 1);
    assert_eq!(SwipeDirection::Up.code(), 2);
    assert_eq!(SwipeDirection::Down.code(), 3);
    assert_eq!(SwipeDirection::from_name("DOWN"), Some(SwipeDirection::Down));
    assert_eq!(SwipeDirection::from_name("diagonal"), None);
}

#[test]
fn test_app_record_defaults() {
    let app: AppRecord = serde_json::from_str(r#"{"bundleName":"com.example"}"#).unwrap();
    assert_eq!(app.bundle_name, "com.example");
    assert!(app.version.is_none());
    assert!(!app.debuggable);
}
