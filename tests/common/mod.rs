// Shared test helpers: fake hdc executables backed by shell scripts

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use hdc_mcp::dispatcher::Dispatcher;
use hdc_mcp::hdc::HdcClient;
use tempfile::TempDir;

/// A throwaway `hdc` script. Every invocation appends its arguments to `calls.log`.
pub struct FakeHdc {
    pub dir: TempDir,
    pub path: PathBuf,
    pub log: PathBuf,
}

impl FakeHdc {
    /// `body` runs after logging; it typically matches on `"$*"`.
    pub fn new(body: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hdc");
        let log = dir.path().join("calls.log");
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$*\" >> '{}'\n{}\n",
            log.display(),
            body
        );
        std::fs::write(&path, script).unwrap();
        set_executable(&path);
        Self { dir, path, log }
    }

    pub fn client(&self) -> HdcClient {
        HdcClient::new(&self.path, Some(std::time::Duration::from_secs(10)))
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(Arc::new(self.client()))
    }

    /// Argument lines of every invocation so far, in order.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(unix)]
pub fn set_executable(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// Script body emulating a healthy device `DEV1`.
pub const HEALTHY_DEVICE: &str = r#"
case "$*" in
  "-v") echo "Ver: 2.0.0a" ;;
  "list targets -v") printf 'DEV1\tUSB\tConnected\tlocalhost\n' ;;
  *"param get const.product.name") echo "Mate 60" ;;
  *"param get const.product.brand") echo "HUAWEI" ;;
  *"param get const.product.model") echo "ALN-AL00" ;;
  *"param get const.product.software.version") echo "HarmonyOS 5.0.0" ;;
  *"param get const.ohos.apiversion") echo "12" ;;
  *"param get const.product.cpu.abilist") echo "arm64-v8a" ;;
  *"hidumper -s RenderService -a screen") echo "screen[0]: id=0, powerstatus=POWER_STATUS_ON, render size: 1260x2720" ;;
  *"ifconfig wlan0") printf 'wlan0   Link encap:Ethernet\n        inet addr:192.168.1.23  Bcast:192.168.1.255\n' ;;
  *"hidumper -s BatteryService -a -i") printf 'capacity: 85\ntemperature: 365\n' ;;
  *"bm dump -a") printf 'ID: 100:\n    com.example.app 1.0.0 Example true\n    com.example.other\n' ;;
  *) echo "ok" ;;
esac
"#;

#[cfg(not(unix))]
pub fn set_executable(_path: &std::path::Path) {}
