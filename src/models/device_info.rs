// Composite device identity and health

use serde::{Deserialize, Serialize};

/// Placeholder for string fields whose source output could not be parsed.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub version: String,
    pub api_version: String,
    pub cpu_arch: String,
    /// "WxH", or "Unknown".
    pub resolution: String,
    pub ip_address: String,
    /// Percent, 0..=100.
    pub battery: u8,
    /// Degrees Celsius.
    pub temperature: f64,
}
