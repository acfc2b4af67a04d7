// Static tool catalog: names, descriptions and input schemas.

use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    /// A key code (integer) or key name (string).
    Key,
}

#[derive(Debug, Clone, Copy)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<u32>,
}

const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Param {
    Param {
        name,
        kind,
        description,
        required: true,
        default: None,
    }
}

const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Param {
    Param {
        name,
        kind,
        description,
        required: false,
        default: None,
    }
}

const fn with_default(param: Param, default: u32) -> Param {
    Param {
        default: Some(default),
        ..param
    }
}

const DEVICE_ID: Param = required("deviceId", ParamKind::String, "Device connect key");
const BUNDLE_NAME: Param = required("bundleName", ParamKind::String, "Application bundle name");
const X: Param = required("x", ParamKind::Integer, "X coordinate");
const Y: Param = required("y", ParamKind::Integer, "Y coordinate");
const FROM_X: Param = required("fromX", ParamKind::Integer, "Start X coordinate");
const FROM_Y: Param = required("fromY", ParamKind::Integer, "Start Y coordinate");
const TO_X: Param = required("toX", ParamKind::Integer, "End X coordinate");
const TO_Y: Param = required("toY", ParamKind::Integer, "End Y coordinate");
const VELOCITY: Param = with_default(
    optional(
        "velocity",
        ParamKind::Integer,
        "Speed in px/s, 200-40000 (default 600)",
    ),
    600,
);
const STEP_LENGTH: Param = optional(
    "stepLength",
    ParamKind::Integer,
    "Step length in px (default: distance / 50)",
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    GetVersion,
    ListDevices,
    GetDeviceInfo,
    InstallApp,
    UninstallApp,
    ListApps,
    StartApp,
    StopApp,
    ClearAppData,
    PushFile,
    PullFile,
    TakeScreenshot,
    RebootDevice,
    GetLogs,
    GetUiHierarchy,
    UiClick,
    UiDoubleClick,
    UiLongClick,
    UiSwipe,
    UiFling,
    UiDrag,
    UiSwipeDirection,
    UiInputText,
    UiKeyEvent,
    UiGoHome,
    UiGoBack,
    UiPaste,
    UiGuide,
    AaGuide,
    BmGuide,
    ParamGuide,
    HidumperGuide,
}

#[derive(Debug)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub tool: Tool,
    pub params: &'static [Param],
}

impl ToolSpec {
    pub fn required(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.iter().filter(|p| p.required).map(|p| p.name)
    }

    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for p in self.params {
            let mut prop = match p.kind {
                ParamKind::String => json!({ "type": "string" }),
                ParamKind::Integer => json!({ "type": "integer", "minimum": 0 }),
                ParamKind::Key => json!({ "type": ["integer", "string"] }),
            };
            prop["description"] = Value::from(p.description);
            if let Some(default) = p.default {
                prop["default"] = Value::from(default);
            }
            properties.insert(p.name.to_string(), prop);
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": self.required().collect::<Vec<_>>(),
        })
    }

    /// MCP `tools/list` entry.
    pub fn definition(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

pub static CATALOG: &[ToolSpec] = &[
    ToolSpec {
        name: "hdc_get_version",
        description: "Get the HDC tool version",
        tool: Tool::GetVersion,
        params: &[],
    },
    ToolSpec {
        name: "hdc_list_devices",
        description: "List connected HarmonyOS devices",
        tool: Tool::ListDevices,
        params: &[],
    },
    ToolSpec {
        name: "hdc_get_device_info",
        description: "Get name, brand, model, OS version, API level, CPU architecture, resolution, IP address, battery and temperature of a device",
        tool: Tool::GetDeviceInfo,
        params: &[DEVICE_ID],
    },
    ToolSpec {
        name: "hdc_install_app",
        description: "Install an application on a device",
        tool: Tool::InstallApp,
        params: &[
            DEVICE_ID,
            required("appPath", ParamKind::String, "Local path of the .hap file"),
        ],
    },
    ToolSpec {
        name: "hdc_uninstall_app",
        description: "Uninstall an application from a device",
        tool: Tool::UninstallApp,
        params: &[DEVICE_ID, BUNDLE_NAME],
    },
    ToolSpec {
        name: "hdc_list_apps",
        description: "List applications installed on a device",
        tool: Tool::ListApps,
        params: &[DEVICE_ID],
    },
    ToolSpec {
        name: "hdc_start_app",
        description: "Start an application",
        tool: Tool::StartApp,
        params: &[
            DEVICE_ID,
            BUNDLE_NAME,
            optional(
                "abilityName",
                ParamKind::String,
                "Ability to launch (default MainAbility)",
            ),
        ],
    },
    ToolSpec {
        name: "hdc_stop_app",
        description: "Force-stop an application",
        tool: Tool::StopApp,
        params: &[DEVICE_ID, BUNDLE_NAME],
    },
    ToolSpec {
        name: "hdc_clear_app_data",
        description: "Clear application data",
        tool: Tool::ClearAppData,
        params: &[DEVICE_ID, BUNDLE_NAME],
    },
    ToolSpec {
        name: "hdc_push_file",
        description: "Send a local file to a device",
        tool: Tool::PushFile,
        params: &[
            DEVICE_ID,
            required("localPath", ParamKind::String, "Local file path"),
            required("remotePath", ParamKind::String, "Destination path on the device"),
        ],
    },
    ToolSpec {
        name: "hdc_pull_file",
        description: "Receive a file from a device",
        tool: Tool::PullFile,
        params: &[
            DEVICE_ID,
            required("remotePath", ParamKind::String, "File path on the device"),
            required("localPath", ParamKind::String, "Local destination path"),
        ],
    },
    ToolSpec {
        name: "hdc_take_screenshot",
        description: "Capture the device screen and save it locally",
        tool: Tool::TakeScreenshot,
        params: &[
            DEVICE_ID,
            required("savePath", ParamKind::String, "Local path for the screenshot (.jpeg)"),
        ],
    },
    ToolSpec {
        name: "hdc_reboot_device",
        description: "Reboot a device",
        tool: Tool::RebootDevice,
        params: &[DEVICE_ID],
    },
    ToolSpec {
        name: "hdc_get_logs",
        description: "Get recent device logs",
        tool: Tool::GetLogs,
        params: &[
            DEVICE_ID,
            optional("tag", ParamKind::String, "Log tag filter"),
            with_default(
                optional("lines", ParamKind::Integer, "Number of log lines (default 100)"),
                100,
            ),
        ],
    },
    ToolSpec {
        name: "hdc_get_ui_hierarchy",
        description: "Dump the current UI layout of a device",
        tool: Tool::GetUiHierarchy,
        params: &[DEVICE_ID],
    },
    ToolSpec {
        name: "hdc_ui_click",
        description: "Tap a screen position",
        tool: Tool::UiClick,
        params: &[DEVICE_ID, X, Y],
    },
    ToolSpec {
        name: "hdc_ui_double_click",
        description: "Double-tap a screen position",
        tool: Tool::UiDoubleClick,
        params: &[DEVICE_ID, X, Y],
    },
    ToolSpec {
        name: "hdc_ui_long_click",
        description: "Long-press a screen position",
        tool: Tool::UiLongClick,
        params: &[DEVICE_ID, X, Y],
    },
    ToolSpec {
        name: "hdc_ui_swipe",
        description: "Slow swipe between two points",
        tool: Tool::UiSwipe,
        params: &[DEVICE_ID, FROM_X, FROM_Y, TO_X, TO_Y, VELOCITY],
    },
    ToolSpec {
        name: "hdc_ui_fling",
        description: "Fast fling between two points",
        tool: Tool::UiFling,
        params: &[DEVICE_ID, FROM_X, FROM_Y, TO_X, TO_Y, VELOCITY, STEP_LENGTH],
    },
    ToolSpec {
        name: "hdc_ui_drag",
        description: "Drag between two points",
        tool: Tool::UiDrag,
        params: &[DEVICE_ID, FROM_X, FROM_Y, TO_X, TO_Y, VELOCITY],
    },
    ToolSpec {
        name: "hdc_ui_swipe_direction",
        description: "Fling the screen in a direction (left, right, up, down)",
        tool: Tool::UiSwipeDirection,
        params: &[
            DEVICE_ID,
            required(
                "direction",
                ParamKind::String,
                "One of left, right, up, down",
            ),
            VELOCITY,
            STEP_LENGTH,
        ],
    },
    ToolSpec {
        name: "hdc_ui_input_text",
        description: "Type text into the input field at a position",
        tool: Tool::UiInputText,
        params: &[
            DEVICE_ID,
            X,
            Y,
            required("text", ParamKind::String, "Text to enter"),
        ],
    },
    ToolSpec {
        name: "hdc_ui_key_event",
        description: "Send a key event, optionally as a two-key combination",
        tool: Tool::UiKeyEvent,
        params: &[
            DEVICE_ID,
            required("keyId", ParamKind::Key, "Key code or name (e.g. Home, Back)"),
            optional("keyId2", ParamKind::Key, "Second key for a combination"),
        ],
    },
    ToolSpec {
        name: "hdc_ui_go_home",
        description: "Press the Home key",
        tool: Tool::UiGoHome,
        params: &[DEVICE_ID],
    },
    ToolSpec {
        name: "hdc_ui_go_back",
        description: "Press the Back key",
        tool: Tool::UiGoBack,
        params: &[DEVICE_ID],
    },
    ToolSpec {
        name: "hdc_ui_paste",
        description: "Send the paste key combination",
        tool: Tool::UiPaste,
        params: &[DEVICE_ID],
    },
    ToolSpec {
        name: "hdc_ui_tool",
        description: "Usage guide for HDC UI simulation (uitest uiInput)",
        tool: Tool::UiGuide,
        params: &[],
    },
    ToolSpec {
        name: "hdc_aa_tool",
        description: "Usage guide for the HDC aa tool",
        tool: Tool::AaGuide,
        params: &[],
    },
    ToolSpec {
        name: "hdc_bm_tool",
        description: "Usage guide for the HDC bm tool",
        tool: Tool::BmGuide,
        params: &[],
    },
    ToolSpec {
        name: "hdc_param_tool",
        description: "Usage guide for the HDC param tool",
        tool: Tool::ParamGuide,
        params: &[],
    },
    ToolSpec {
        name: "hdc_hidumper_tool",
        description: "Usage guide for the HDC hidumper tool",
        tool: Tool::HidumperGuide,
        params: &[],
    },
];

pub fn find(name: &str) -> Option<&'static ToolSpec> {
    CATALOG.iter().find(|t| t.name == name)
}
