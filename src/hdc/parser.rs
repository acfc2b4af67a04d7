// Parse hdc text output into models. Every parser is total: bad input degrades to a
// sentinel ("Unknown" / 0 / absent column) instead of failing.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{AppRecord, ConnectionType, Device, DeviceStatus, UNKNOWN};

static RESOLUTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)x(\d+)").expect("resolution regex must compile"));
static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"inet addr:(\d+\.\d+\.\d+\.\d+)").expect("ipv4 regex must compile")
});
static CAPACITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"capacity:\s*(\d+)").expect("capacity regex must compile"));
static TEMPERATURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"temperature:\s*(\d+)").expect("temperature regex must compile")
});

/// Printed by `list targets` when no device is attached.
const EMPTY_LISTING: &str = "[Empty]";

/// Split output into whitespace-separated columns, one row per non-empty line.
pub fn split_columns(output: &str) -> Vec<Vec<&str>> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split_whitespace().collect())
        .collect()
}

/// `list targets -v`: `connectKey connectionType status [deviceName]`.
pub fn parse_device_list(output: &str) -> Vec<Device> {
    split_columns(output)
        .into_iter()
        .filter(|cols| cols.first() != Some(&EMPTY_LISTING))
        .map(|cols| Device {
            connect_key: cols[0].to_string(),
            connection_type: cols
                .get(1)
                .map(|c| ConnectionType::from_hdc(c))
                .unwrap_or(ConnectionType::Unknown),
            status: cols
                .get(2)
                .map(|s| DeviceStatus::from_hdc(s))
                .unwrap_or(DeviceStatus::Unknown),
            device_name: cols.get(3).map(|s| s.to_string()),
        })
        .collect()
}

/// App listing: `bundleName version label debuggable`. Per-user headers (`ID: 100:`) are
/// skipped.
pub fn parse_app_list(output: &str) -> Vec<AppRecord> {
    split_columns(output)
        .into_iter()
        .filter(|cols| cols.first() != Some(&"ID:"))
        .map(|cols| AppRecord {
            bundle_name: cols[0].to_string(),
            version: cols.get(1).map(|s| s.to_string()),
            label: cols.get(2).map(|s| s.to_string()),
            debuggable: cols.get(3) == Some(&"true"),
        })
        .collect()
}

/// One property per call: the whole trimmed output is the value.
pub fn parse_scalar(output: &str) -> String {
    let value = output.trim();
    if value.is_empty() {
        UNKNOWN.into()
    } else {
        value.to_string()
    }
}

/// First `WxH` in a RenderService screen dump.
pub fn parse_resolution(output: &str) -> String {
    RESOLUTION_RE
        .captures(output)
        .map(|c| format!("{}x{}", &c[1], &c[2]))
        .unwrap_or_else(|| UNKNOWN.into())
}

/// IPv4 address following `inet addr:` in ifconfig output.
pub fn parse_ip_address(output: &str) -> String {
    IPV4_RE
        .captures(output)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| UNKNOWN.into())
}

/// Battery percentage from a BatteryService dump, clamped to 0..=100.
pub fn parse_battery(output: &str) -> u8 {
    CAPACITY_RE
        .captures(output)
        .and_then(|c| c[1].parse::<u64>().ok())
        .map(|v| v.min(100) as u8)
        .unwrap_or(0)
}

/// Battery temperature in °C; the dump reports tenths of a degree.
pub fn parse_temperature(output: &str) -> f64 {
    TEMPERATURE_RE
        .captures(output)
        .and_then(|c| c[1].parse::<u64>().ok())
        .map(|v| v as f64 / 10.0)
        .unwrap_or(0.0)
}

/// Keep only the last `n` lines of `output`.
pub fn tail_lines(output: &str, n: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
