// Device operations via the hdc command-line tool

pub mod command;
mod device_info;
pub mod executor;
pub mod parser;
pub mod resolver;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{instrument, warn};

use crate::config::HdcConfig;
use crate::error::{HdcError, HdcResult};
use crate::models::{AppRecord, Device, SwipeDirection, UiOperationResult};
use command::{CommandArgs, CommandBuilder, Verb};
use executor::ProcessExecutor;

/// Accepted swipe/fling/drag speed range for uitest, px/s.
pub const VELOCITY_RANGE: std::ops::RangeInclusive<u32> = 200..=40_000;

/// Device directory used for screenshots before they are pulled to the host.
const REMOTE_TMP_DIR: &str = "/data/local/tmp";

/// Start and end points of a swipe, fling or drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    pub from_x: u32,
    pub from_y: u32,
    pub to_x: u32,
    pub to_y: u32,
    pub velocity: Option<u32>,
    pub step_length: Option<u32>,
}

impl Gesture {
    fn args(&self) -> HdcResult<CommandArgs> {
        Ok(CommandArgs::new()
            .with("fromX", self.from_x)
            .with("fromY", self.from_y)
            .with("toX", self.to_x)
            .with("toY", self.to_y)
            .with_opt("velocity", check_velocity(self.velocity)?)
            .with_opt("stepLength", self.step_length))
    }
}

fn check_velocity(velocity: Option<u32>) -> HdcResult<Option<u32>> {
    match velocity {
        Some(v) if !VELOCITY_RANGE.contains(&v) => Err(HdcError::invalid(
            "velocity",
            format!(
                "must be within {}..={} px/s, got {}",
                VELOCITY_RANGE.start(),
                VELOCITY_RANGE.end(),
                v
            ),
        )),
        other => Ok(other),
    }
}

/// Client for one resolved hdc executable. Holds no mutable state; every call spawns a
/// fresh process.
pub struct HdcClient {
    builder: CommandBuilder,
    executor: ProcessExecutor,
    default_ability: String,
    default_log_lines: u32,
}

impl HdcClient {
    pub fn new(executable: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            builder: CommandBuilder::new(executable),
            executor: ProcessExecutor::new(timeout),
            default_ability: command::DEFAULT_ABILITY.into(),
            default_log_lines: command::DEFAULT_LOG_LINES,
        }
    }

    pub fn from_config(executable: impl Into<PathBuf>, config: &HdcConfig) -> Self {
        let timeout = (config.command_timeout_ms > 0)
            .then(|| Duration::from_millis(config.command_timeout_ms));
        Self {
            default_ability: config.default_ability.clone(),
            default_log_lines: config.default_log_lines,
            ..Self::new(executable, timeout)
        }
    }

    pub fn executable(&self) -> &Path {
        self.builder.program()
    }

    async fn run(
        &self,
        verb: Verb,
        device: Option<&str>,
        args: &CommandArgs,
    ) -> HdcResult<String> {
        let line = self.builder.build(verb, device, args)?;
        self.executor.run(&line).await
    }

    async fn run_on(&self, verb: Verb, device: &str, args: CommandArgs) -> HdcResult<String> {
        self.run(verb, Some(device), &args).await
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "get_version"))]
    pub async fn get_version(&self) -> HdcResult<String> {
        let out = self.run(Verb::Version, None, &CommandArgs::new()).await?;
        Ok(out.trim().to_string())
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "list_devices"))]
    pub async fn list_devices(&self) -> HdcResult<Vec<Device>> {
        let out = self.run(Verb::ListDevices, None, &CommandArgs::new()).await?;
        Ok(parser::parse_device_list(&out))
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "install_app"))]
    pub async fn install_app(&self, device: &str, app_path: &str) -> HdcResult<String> {
        self.run_on(Verb::Install, device, CommandArgs::new().with("appPath", app_path))
            .await
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "uninstall_app"))]
    pub async fn uninstall_app(&self, device: &str, bundle_name: &str) -> HdcResult<String> {
        self.run_on(
            Verb::Uninstall,
            device,
            CommandArgs::new().with("bundleName", bundle_name),
        )
        .await
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "list_apps"))]
    pub async fn list_apps(&self, device: &str) -> HdcResult<Vec<AppRecord>> {
        let out = self.run_on(Verb::ListApps, device, CommandArgs::new()).await?;
        Ok(parser::parse_app_list(&out))
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "start_app"))]
    pub async fn start_app(
        &self,
        device: &str,
        bundle_name: &str,
        ability_name: Option<&str>,
    ) -> HdcResult<String> {
        let ability = ability_name.unwrap_or(&self.default_ability);
        let args = CommandArgs::new()
            .with("bundleName", bundle_name)
            .with("abilityName", ability);
        self.run_on(Verb::StartApp, device, args).await
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "stop_app"))]
    pub async fn stop_app(&self, device: &str, bundle_name: &str) -> HdcResult<String> {
        self.run_on(
            Verb::StopApp,
            device,
            CommandArgs::new().with("bundleName", bundle_name),
        )
        .await
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "clear_app_data"))]
    pub async fn clear_app_data(&self, device: &str, bundle_name: &str) -> HdcResult<String> {
        self.run_on(
            Verb::ClearAppData,
            device,
            CommandArgs::new().with("bundleName", bundle_name),
        )
        .await
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "push_file"))]
    pub async fn push_file(
        &self,
        device: &str,
        local_path: &str,
        remote_path: &str,
    ) -> HdcResult<String> {
        let args = CommandArgs::new()
            .with("localPath", local_path)
            .with("remotePath", remote_path);
        self.run_on(Verb::PushFile, device, args).await
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "pull_file"))]
    pub async fn pull_file(
        &self,
        device: &str,
        remote_path: &str,
        local_path: &str,
    ) -> HdcResult<String> {
        let args = CommandArgs::new()
            .with("remotePath", remote_path)
            .with("localPath", local_path);
        self.run_on(Verb::PullFile, device, args).await
    }

    /// Capture the screen to a temporary device file, pull it to `save_path`, then remove
    /// the device copy. Returns the local path.
    #[instrument(skip(self), fields(client = "hdc", operation = "take_screenshot"))]
    pub async fn take_screenshot(&self, device: &str, save_path: &str) -> HdcResult<String> {
        let remote = format!(
            "{}/hdc_mcp_{}.jpeg",
            REMOTE_TMP_DIR,
            chrono::Utc::now().timestamp_millis()
        );
        self.run_on(
            Verb::Snapshot,
            device,
            CommandArgs::new().with("remotePath", &remote),
        )
        .await?;
        let pulled = self.pull_file(device, &remote, save_path).await;
        if let Err(e) = self
            .run_on(
                Verb::RemoveRemote,
                device,
                CommandArgs::new().with("remotePath", &remote),
            )
            .await
        {
            warn!(remote = %remote, error = %e, "failed to remove temporary screenshot");
        }
        pulled?;
        Ok(save_path.to_string())
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "reboot_device"))]
    pub async fn reboot_device(&self, device: &str) -> HdcResult<String> {
        self.run_on(Verb::Reboot, device, CommandArgs::new()).await
    }

    /// Last `lines` hilog lines, optionally filtered by tag.
    #[instrument(skip(self), fields(client = "hdc", operation = "get_logs"))]
    pub async fn get_logs(
        &self,
        device: &str,
        tag: Option<&str>,
        lines: Option<u32>,
    ) -> HdcResult<String> {
        let lines = lines.unwrap_or(self.default_log_lines);
        if lines == 0 {
            return Err(HdcError::invalid("lines", "must be > 0"));
        }
        let args = CommandArgs::new()
            .with("lines", lines)
            .with_opt("tag", tag);
        let out = self.run_on(Verb::Logs, device, args).await?;
        Ok(parser::tail_lines(&out, lines as usize))
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "get_ui_hierarchy"))]
    pub async fn get_ui_hierarchy(&self, device: &str) -> HdcResult<String> {
        self.run_on(Verb::UiDump, device, CommandArgs::new()).await
    }

    async fn tap(
        &self,
        verb: Verb,
        label: &str,
        device: &str,
        x: u32,
        y: u32,
    ) -> HdcResult<UiOperationResult> {
        let out = self
            .run_on(verb, device, CommandArgs::new().with("x", x).with("y", y))
            .await?;
        let summary = format!("{} at ({}, {})", label, x, y);
        Ok(UiOperationResult::ok(ui_message(&summary, &out)).at(x, y))
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "click"))]
    pub async fn click(&self, device: &str, x: u32, y: u32) -> HdcResult<UiOperationResult> {
        self.tap(Verb::UiClick, "Clicked", device, x, y).await
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "double_click"))]
    pub async fn double_click(
        &self,
        device: &str,
        x: u32,
        y: u32,
    ) -> HdcResult<UiOperationResult> {
        self.tap(Verb::UiDoubleClick, "Double-clicked", device, x, y).await
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "long_click"))]
    pub async fn long_click(
        &self,
        device: &str,
        x: u32,
        y: u32,
    ) -> HdcResult<UiOperationResult> {
        self.tap(Verb::UiLongClick, "Long-pressed", device, x, y).await
    }

    async fn gesture(
        &self,
        verb: Verb,
        label: &str,
        device: &str,
        g: Gesture,
    ) -> HdcResult<UiOperationResult> {
        let out = self.run_on(verb, device, g.args()?).await?;
        let summary = format!(
            "{} from ({}, {}) to ({}, {})",
            label, g.from_x, g.from_y, g.to_x, g.to_y
        );
        Ok(UiOperationResult::ok(ui_message(&summary, &out)).at(g.to_x, g.to_y))
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "swipe"))]
    pub async fn swipe(&self, device: &str, gesture: Gesture) -> HdcResult<UiOperationResult> {
        self.gesture(Verb::UiSwipe, "Swiped", device, gesture).await
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "fling"))]
    pub async fn fling(&self, device: &str, gesture: Gesture) -> HdcResult<UiOperationResult> {
        self.gesture(Verb::UiFling, "Flung", device, gesture).await
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "drag"))]
    pub async fn drag(&self, device: &str, gesture: Gesture) -> HdcResult<UiOperationResult> {
        self.gesture(Verb::UiDrag, "Dragged", device, gesture).await
    }

    #[instrument(skip(self), fields(client = "hdc", operation = "swipe_direction"))]
    pub async fn swipe_direction(
        &self,
        device: &str,
        direction: SwipeDirection,
        velocity: Option<u32>,
        step_length: Option<u32>,
    ) -> HdcResult<UiOperationResult> {
        let args = CommandArgs::new()
            .with("direction", direction.code())
            .with_opt("velocity", check_velocity(velocity)?)
            .with_opt("stepLength", step_length);
        let out = self.run_on(Verb::UiDirectionFling, device, args).await?;
        let summary = format!("Swiped {}", direction.as_str());
        Ok(UiOperationResult::ok(ui_message(&summary, &out)).toward(direction))
    }

    #[instrument(skip(self, text), fields(client = "hdc", operation = "input_text"))]
    pub async fn input_text(
        &self,
        device: &str,
        x: u32,
        y: u32,
        text: &str,
    ) -> HdcResult<UiOperationResult> {
        let args = CommandArgs::new()
            .with("x", x)
            .with("y", y)
            .with("text", text);
        let out = self.run_on(Verb::UiInputText, device, args).await?;
        let summary = format!("Entered text at ({}, {})", x, y);
        Ok(UiOperationResult::ok(ui_message(&summary, &out))
            .at(x, y)
            .with_text(text))
    }

    /// Key ids are uitest key codes or names (`Home`, `Back`); `key2` forms a combination.
    #[instrument(skip(self), fields(client = "hdc", operation = "key_event"))]
    pub async fn key_event(
        &self,
        device: &str,
        key: &str,
        key2: Option<&str>,
    ) -> HdcResult<UiOperationResult> {
        let args = CommandArgs::new()
            .with("keyId", key)
            .with_opt("keyId2", key2);
        let out = self.run_on(Verb::UiKeyEvent, device, args).await?;
        let keys = match key2 {
            Some(k2) => format!("{}+{}", key, k2),
            None => key.to_string(),
        };
        Ok(UiOperationResult::ok(ui_message(&format!("Sent key {}", keys), &out)))
    }

    pub async fn go_home(&self, device: &str) -> HdcResult<UiOperationResult> {
        self.key_event(device, "Home", None).await
    }

    pub async fn go_back(&self, device: &str) -> HdcResult<UiOperationResult> {
        self.key_event(device, "Back", None).await
    }

    /// Ctrl+V.
    pub async fn paste(&self, device: &str) -> HdcResult<UiOperationResult> {
        self.key_event(device, "2072", Some("2038")).await
    }
}

fn ui_message(summary: &str, output: &str) -> String {
    let output = output.trim();
    if output.is_empty() {
        summary.to_string()
    } else {
        format!("{}: {}", summary, output)
    }
}
