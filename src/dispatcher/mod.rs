// Tool-call dispatch: catalog lookup, argument validation, response rendering

mod args;
pub mod catalog;
mod docs;

use std::fmt::Write as _;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{HdcError, HdcResult};
use crate::hdc::{Gesture, HdcClient};
use crate::models::{AppRecord, Device, DeviceInfo, SwipeDirection, UNKNOWN, UiOperationResult};
use args::ToolArgs;
use catalog::{CATALOG, Tool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// Result of `tools/call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text".into(),
                text: text.into(),
            }],
            is_error: None,
        }
    }

    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            is_error: Some(true),
            ..Self::text(format!("Error: {}", message))
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// Text of the first content item, or "" if there is none.
    pub fn first_text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or("")
    }
}

pub struct Dispatcher {
    hdc: Arc<HdcClient>,
}

impl Dispatcher {
    pub fn new(hdc: Arc<HdcClient>) -> Self {
        Self { hdc }
    }

    /// `tools/list` entries, in catalog order.
    pub fn tools(&self) -> Vec<Value> {
        CATALOG.iter().map(|t| t.definition()).collect()
    }

    /// Run one tool. Failures come back as an `isError` response, never as `Err`.
    #[instrument(skip(self, name, arguments), fields(tool = %name))]
    pub async fn dispatch(&self, name: &str, arguments: &Value) -> ToolResponse {
        match self.call(name, arguments).await {
            Ok(text) => {
                debug!("tool call succeeded");
                ToolResponse::text(text)
            }
            Err(e) => {
                warn!(error = %e, "tool call failed");
                ToolResponse::error(e)
            }
        }
    }

    async fn call(&self, name: &str, arguments: &Value) -> HdcResult<String> {
        let spec =
            catalog::find(name).ok_or_else(|| HdcError::UnknownOperation(name.to_string()))?;
        let args = ToolArgs::new(spec, arguments)?;
        let hdc = &self.hdc;

        let text = match spec.tool {
            Tool::GetVersion => format!("HDC Version: {}", hdc.get_version().await?),
            Tool::ListDevices => render_devices(&hdc.list_devices().await?),
            Tool::GetDeviceInfo => {
                render_device_info(&hdc.get_device_info(args.str("deviceId")?).await?)
            }
            Tool::InstallApp => {
                let out = hdc
                    .install_app(args.str("deviceId")?, args.str("appPath")?)
                    .await?;
                format!("Install result: {}", out)
            }
            Tool::UninstallApp => {
                let out = hdc
                    .uninstall_app(args.str("deviceId")?, args.str("bundleName")?)
                    .await?;
                format!("Uninstall result: {}", out)
            }
            Tool::ListApps => render_apps(&hdc.list_apps(args.str("deviceId")?).await?),
            Tool::StartApp => {
                let out = hdc
                    .start_app(
                        args.str("deviceId")?,
                        args.str("bundleName")?,
                        args.opt_str("abilityName")?,
                    )
                    .await?;
                format!("Start app result: {}", out)
            }
            Tool::StopApp => {
                let out = hdc
                    .stop_app(args.str("deviceId")?, args.str("bundleName")?)
                    .await?;
                format!("Stop app result: {}", out)
            }
            Tool::ClearAppData => {
                let out = hdc
                    .clear_app_data(args.str("deviceId")?, args.str("bundleName")?)
                    .await?;
                format!("Clear app data result: {}", out)
            }
            Tool::PushFile => {
                let out = hdc
                    .push_file(
                        args.str("deviceId")?,
                        args.str("localPath")?,
                        args.str("remotePath")?,
                    )
                    .await?;
                format!("Push file result: {}", out)
            }
            Tool::PullFile => {
                let out = hdc
                    .pull_file(
                        args.str("deviceId")?,
                        args.str("remotePath")?,
                        args.str("localPath")?,
                    )
                    .await?;
                format!("Pull file result: {}", out)
            }
            Tool::TakeScreenshot => {
                let saved = hdc
                    .take_screenshot(args.str("deviceId")?, args.str("savePath")?)
                    .await?;
                format!("Screenshot saved: {}", saved)
            }
            Tool::RebootDevice => {
                let out = hdc.reboot_device(args.str("deviceId")?).await?;
                format!("Reboot result: {}", out)
            }
            Tool::GetLogs => {
                let logs = hdc
                    .get_logs(
                        args.str("deviceId")?,
                        args.opt_text("tag")?,
                        args.opt_u32("lines")?,
                    )
                    .await?;
                format!("Device logs:\n{}", logs)
            }
            Tool::GetUiHierarchy => {
                let layout = hdc.get_ui_hierarchy(args.str("deviceId")?).await?;
                format!("UI hierarchy:\n{}", layout)
            }
            Tool::UiClick => render_ui(
                &hdc.click(args.str("deviceId")?, args.u32("x")?, args.u32("y")?)
                    .await?,
            ),
            Tool::UiDoubleClick => render_ui(
                &hdc.double_click(args.str("deviceId")?, args.u32("x")?, args.u32("y")?)
                    .await?,
            ),
            Tool::UiLongClick => render_ui(
                &hdc.long_click(args.str("deviceId")?, args.u32("x")?, args.u32("y")?)
                    .await?,
            ),
            Tool::UiSwipe => {
                render_ui(&hdc.swipe(args.str("deviceId")?, gesture(&args, false)?).await?)
            }
            Tool::UiFling => {
                render_ui(&hdc.fling(args.str("deviceId")?, gesture(&args, true)?).await?)
            }
            Tool::UiDrag => {
                render_ui(&hdc.drag(args.str("deviceId")?, gesture(&args, false)?).await?)
            }
            Tool::UiSwipeDirection => {
                let raw = args.str("direction")?;
                let direction = SwipeDirection::from_name(raw).ok_or_else(|| {
                    HdcError::invalid(
                        "direction",
                        format!("expected left, right, up or down, got {}", raw),
                    )
                })?;
                let result = hdc
                    .swipe_direction(
                        args.str("deviceId")?,
                        direction,
                        args.opt_u32("velocity")?,
                        args.opt_u32("stepLength")?,
                    )
                    .await?;
                render_ui(&result)
            }
            Tool::UiInputText => {
                let result = hdc
                    .input_text(
                        args.str("deviceId")?,
                        args.u32("x")?,
                        args.u32("y")?,
                        args.text("text")?,
                    )
                    .await?;
                render_ui(&result)
            }
            Tool::UiKeyEvent => {
                let key = args.key("keyId")?;
                let key2 = args.opt_key("keyId2")?;
                let result = hdc
                    .key_event(args.str("deviceId")?, &key, key2.as_deref())
                    .await?;
                render_ui(&result)
            }
            Tool::UiGoHome => render_ui(&hdc.go_home(args.str("deviceId")?).await?),
            Tool::UiGoBack => render_ui(&hdc.go_back(args.str("deviceId")?).await?),
            Tool::UiPaste => render_ui(&hdc.paste(args.str("deviceId")?).await?),
            Tool::UiGuide => docs::UI_GUIDE.to_string(),
            Tool::AaGuide => docs::AA_GUIDE.to_string(),
            Tool::BmGuide => docs::BM_GUIDE.to_string(),
            Tool::ParamGuide => docs::PARAM_GUIDE.to_string(),
            Tool::HidumperGuide => docs::HIDUMPER_GUIDE.to_string(),
        };
        Ok(text)
    }
}

fn gesture(args: &ToolArgs<'_>, with_step: bool) -> HdcResult<Gesture> {
    Ok(Gesture {
        from_x: args.u32("fromX")?,
        from_y: args.u32("fromY")?,
        to_x: args.u32("toX")?,
        to_y: args.u32("toY")?,
        velocity: args.opt_u32("velocity")?,
        step_length: if with_step {
            args.opt_u32("stepLength")?
        } else {
            None
        },
    })
}

fn render_devices(devices: &[Device]) -> String {
    if devices.is_empty() {
        return "No devices connected".into();
    }
    let mut out = String::from("Connected devices:");
    for d in devices {
        let _ = write!(
            out,
            "\n- {} ({}) - {}",
            d.connect_key,
            d.connection_type.as_str(),
            d.status.as_str()
        );
        if let Some(name) = &d.device_name {
            let _ = write!(out, " [{}]", name);
        }
    }
    out
}

fn render_apps(apps: &[AppRecord]) -> String {
    if apps.is_empty() {
        return "No apps found".into();
    }
    let mut out = String::from("Installed apps:");
    for app in apps {
        let _ = write!(
            out,
            "\n- {} v{}",
            app.bundle_name,
            app.version.as_deref().unwrap_or(UNKNOWN)
        );
        if let Some(label) = &app.label {
            let _ = write!(out, " ({})", label);
        }
        if app.debuggable {
            out.push_str(" [Debuggable]");
        }
    }
    out
}

fn render_device_info(info: &DeviceInfo) -> String {
    format!(
        "Device Information:\n\
         Name: {}\n\
         Brand: {}\n\
         Model: {}\n\
         Version: {}\n\
         API Version: {}\n\
         CPU Architecture: {}\n\
         Resolution: {}\n\
         IP Address: {}\n\
         Battery: {}%\n\
         Temperature: {}°C",
        info.name,
        info.brand,
        info.model,
        info.version,
        info.api_version,
        info.cpu_arch,
        info.resolution,
        info.ip_address,
        info.battery,
        info.temperature
    )
}

/// Failed uitest commands surface as `ExecutionFailure` before a result is built.
fn render_ui(result: &UiOperationResult) -> String {
    format!("UI result: {}", result.message)
}
