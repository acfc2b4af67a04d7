// Connected device models (hdc list targets -v)

use serde::{Deserialize, Serialize};

/// Transport hdc uses to reach the device; serializes as printed by hdc ("USB", "TCP").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectionType {
    Usb,
    Tcp,
    #[serde(other)]
    Unknown,
}

impl ConnectionType {
    /// Parse the connection column of `list targets -v` (e.g. "USB", "TCP").
    pub fn from_hdc(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "USB" => ConnectionType::Usb,
            "TCP" => ConnectionType::Tcp,
            _ => ConnectionType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionType::Usb => "USB",
            ConnectionType::Tcp => "TCP",
            ConnectionType::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    Connected,
    Disconnected,
    #[serde(other)]
    Unknown,
}

impl DeviceStatus {
    /// Parse the status column of `list targets -v`. "Offline" is reported as disconnected.
    pub fn from_hdc(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "connected" => DeviceStatus::Connected,
            "disconnected" | "offline" => DeviceStatus::Disconnected,
            _ => DeviceStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Connected => "Connected",
            DeviceStatus::Disconnected => "Disconnected",
            DeviceStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub connect_key: String,
    pub connection_type: ConnectionType,
    pub status: DeviceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}
