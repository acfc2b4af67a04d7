// Render hdc verbs + named arguments into a command line.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{HdcError, HdcResult};

/// Ability launched by `start-app` when the caller names none.
pub const DEFAULT_ABILITY: &str = "MainAbility";
/// Swipe/fling/drag speed in px/s when the caller names none.
pub const DEFAULT_VELOCITY: u32 = 600;
/// Log lines returned by `logs` when the caller names none.
pub const DEFAULT_LOG_LINES: u32 = 100;
/// Interface queried for the device IP address.
pub const DEFAULT_INTERFACE: &str = "wlan0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Version,
    ListDevices,
    GetParam,
    DumpScreen,
    DumpNetwork,
    DumpBattery,
    Install,
    Uninstall,
    ListApps,
    StartApp,
    StopApp,
    ClearAppData,
    PushFile,
    PullFile,
    Snapshot,
    RemoveRemote,
    Reboot,
    Logs,
    UiDump,
    UiClick,
    UiDoubleClick,
    UiLongClick,
    UiSwipe,
    UiDrag,
    UiFling,
    UiDirectionFling,
    UiInputText,
    UiKeyEvent,
}

const VERBS: &[(&str, Verb)] = &[
    ("version", Verb::Version),
    ("list-devices", Verb::ListDevices),
    ("get-param", Verb::GetParam),
    ("dump-screen", Verb::DumpScreen),
    ("dump-network", Verb::DumpNetwork),
    ("dump-battery", Verb::DumpBattery),
    ("install", Verb::Install),
    ("uninstall", Verb::Uninstall),
    ("list-apps", Verb::ListApps),
    ("start-app", Verb::StartApp),
    ("stop-app", Verb::StopApp),
    ("clear-app-data", Verb::ClearAppData),
    ("push-file", Verb::PushFile),
    ("pull-file", Verb::PullFile),
    ("snapshot", Verb::Snapshot),
    ("remove-remote", Verb::RemoveRemote),
    ("reboot", Verb::Reboot),
    ("logs", Verb::Logs),
    ("ui-dump", Verb::UiDump),
    ("ui-click", Verb::UiClick),
    ("ui-double-click", Verb::UiDoubleClick),
    ("ui-long-click", Verb::UiLongClick),
    ("ui-swipe", Verb::UiSwipe),
    ("ui-drag", Verb::UiDrag),
    ("ui-fling", Verb::UiFling),
    ("ui-direction-fling", Verb::UiDirectionFling),
    ("ui-input-text", Verb::UiInputText),
    ("ui-key-event", Verb::UiKeyEvent),
];

impl Verb {
    pub fn name(&self) -> &'static str {
        VERBS
            .iter()
            .find(|(_, v)| v == self)
            .map(|(n, _)| *n)
            .unwrap_or("unknown")
    }

    /// Verbs that talk to the hdc server rather than to one device never take `-t`.
    pub fn is_scoped(&self) -> bool {
        !matches!(self, Verb::Version | Verb::ListDevices)
    }
}

impl FromStr for Verb {
    type Err = HdcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VERBS
            .iter()
            .find(|(n, _)| *n == s)
            .map(|(_, v)| *v)
            .ok_or_else(|| HdcError::UnsupportedOperation(s.to_string()))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named arguments for a verb. Values are passed through as text; the builder only orders them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs(BTreeMap<String, String>);

impl CommandArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds the argument only when a value is present.
    pub fn with_opt<T: ToString>(mut self, name: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.insert(name, v);
        }
        self
    }

    pub fn insert(&mut self, name: &str, value: impl ToString) {
        self.0.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> HdcResult<&str> {
        self.get(name)
            .ok_or_else(|| HdcError::MissingArgument(name.to_string()))
    }
}

/// A fully rendered invocation: the executable and its argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Quote `arg` for a POSIX shell unless it only contains characters that need no quoting.
pub fn quote(arg: &str) -> Cow<'_, str> {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-.,/:@%+=".contains(c));
    if safe {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}

/// Joins words into one command string for the device shell, quoting each word.
fn device_shell<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    words
        .into_iter()
        .map(quote)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: PathBuf,
}

impl CommandBuilder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn build(
        &self,
        verb: Verb,
        scope: Option<&str>,
        args: &CommandArgs,
    ) -> HdcResult<CommandLine> {
        let mut argv: Vec<String> = Vec::new();
        if verb.is_scoped()
            && let Some(target) = scope
        {
            argv.push("-t".into());
            argv.push(target.to_string());
        }
        argv.extend(render_verb(verb, args)?);
        Ok(CommandLine {
            program: self.program.clone(),
            args: argv,
        })
    }
}

fn shell(command: String) -> Vec<String> {
    vec!["shell".into(), command]
}

fn ui_input(action: &str, operands: &[&str]) -> Vec<String> {
    let words = ["uitest", "uiInput", action]
        .into_iter()
        .chain(operands.iter().copied());
    shell(device_shell(words))
}

fn render_verb(verb: Verb, args: &CommandArgs) -> HdcResult<Vec<String>> {
    let argv = match verb {
        Verb::Version => vec!["-v".into()],
        Verb::ListDevices => vec!["list".into(), "targets".into(), "-v".into()],
        Verb::GetParam => shell(device_shell(["param", "get", args.require("key")?])),
        Verb::DumpScreen => shell("hidumper -s RenderService -a screen".into()),
        Verb::DumpNetwork => {
            let interface = args.get("interface").unwrap_or(DEFAULT_INTERFACE);
            shell(device_shell(["ifconfig", interface]))
        }
        Verb::DumpBattery => shell("hidumper -s BatteryService -a -i".into()),
        Verb::Install => vec!["install".into(), args.require("appPath")?.to_string()],
        Verb::Uninstall => vec!["uninstall".into(), args.require("bundleName")?.to_string()],
        Verb::ListApps => shell("bm dump -a".into()),
        Verb::StartApp => {
            let bundle = args.require("bundleName")?;
            let ability = args.get("abilityName").unwrap_or(DEFAULT_ABILITY);
            shell(device_shell(["aa", "start", "-a", ability, "-b", bundle]))
        }
        Verb::StopApp => shell(device_shell([
            "aa",
            "force-stop",
            args.require("bundleName")?,
        ])),
        Verb::ClearAppData => shell(device_shell([
            "bm",
            "clean",
            "-n",
            args.require("bundleName")?,
            "-d",
        ])),
        Verb::PushFile => vec![
            "file".into(),
            "send".into(),
            args.require("localPath")?.to_string(),
            args.require("remotePath")?.to_string(),
        ],
        Verb::PullFile => vec![
            "file".into(),
            "recv".into(),
            args.require("remotePath")?.to_string(),
            args.require("localPath")?.to_string(),
        ],
        Verb::Snapshot => shell(device_shell([
            "snapshot_display",
            "-f",
            args.require("remotePath")?,
        ])),
        Verb::RemoveRemote => shell(device_shell(["rm", "-f", args.require("remotePath")?])),
        Verb::Reboot => vec!["target".into(), "boot".into()],
        Verb::Logs => {
            let default_lines = DEFAULT_LOG_LINES.to_string();
            let lines = args.get("lines").unwrap_or(&default_lines);
            let mut words = vec!["hilog", "-x", "-z", lines];
            if let Some(tag) = args.get("tag") {
                words.extend(["-T", tag]);
            }
            shell(device_shell(words))
        }
        Verb::UiDump => shell("uitest dumpLayout".into()),
        Verb::UiClick => ui_input("click", &[args.require("x")?, args.require("y")?]),
        Verb::UiDoubleClick => ui_input("doubleClick", &[args.require("x")?, args.require("y")?]),
        Verb::UiLongClick => ui_input("longClick", &[args.require("x")?, args.require("y")?]),
        Verb::UiSwipe | Verb::UiDrag | Verb::UiFling => {
            let action = match verb {
                Verb::UiSwipe => "swipe",
                Verb::UiDrag => "drag",
                _ => "fling",
            };
            let default_velocity = DEFAULT_VELOCITY.to_string();
            let mut operands = vec![
                args.require("fromX")?,
                args.require("fromY")?,
                args.require("toX")?,
                args.require("toY")?,
                args.get("velocity").unwrap_or(&default_velocity),
            ];
            if verb == Verb::UiFling
                && let Some(step) = args.get("stepLength")
            {
                operands.push(step);
            }
            ui_input(action, &operands)
        }
        Verb::UiDirectionFling => {
            let default_velocity = DEFAULT_VELOCITY.to_string();
            let mut operands = vec![
                args.require("direction")?,
                args.get("velocity").unwrap_or(&default_velocity),
            ];
            if let Some(step) = args.get("stepLength") {
                operands.push(step);
            }
            ui_input("dircFling", &operands)
        }
        Verb::UiInputText => ui_input(
            "inputText",
            &[args.require("x")?, args.require("y")?, args.require("text")?],
        ),
        Verb::UiKeyEvent => {
            let mut operands = vec![args.require("keyId")?];
            if let Some(second) = args.get("keyId2") {
                operands.push(second);
            }
            ui_input("keyEvent", &operands)
        }
    };
    Ok(argv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> CommandBuilder {
        CommandBuilder::new("/usr/local/bin/hdc")
    }

    #[test]
    fn version_is_unscoped_even_with_scope() {
        let line = builder()
            .build(Verb::Version, Some("ABC"), &CommandArgs::new())
            .unwrap();
        assert_eq!(line.args, vec!["-v"]);
    }

    #[test]
    fn scoped_verb_gets_target_prefix() {
        let args = CommandArgs::new().with("bundleName", "com.example.app");
        let line = builder().build(Verb::StopApp, Some("1234ABCD"), &args).unwrap();
        assert_eq!(
            line.args,
            vec!["-t", "1234ABCD", "shell", "aa force-stop com.example.app"]
        );
    }

    #[test]
    fn start_app_embeds_default_ability() {
        let args = CommandArgs::new().with("bundleName", "com.example.app");
        let line = builder().build(Verb::StartApp, Some("dev"), &args).unwrap();
        assert_eq!(
            line.args.last().unwrap(),
            "aa start -a MainAbility -b com.example.app"
        );
    }

    #[test]
    fn input_text_is_quoted_for_device_shell() {
        let args = CommandArgs::new()
            .with("x", 10)
            .with("y", 20)
            .with("text", "it's; rm -rf /");
        let line = builder().build(Verb::UiInputText, None, &args).unwrap();
        assert_eq!(
            line.args,
            vec!["shell", r"uitest uiInput inputText 10 20 'it'\''s; rm -rf /'"]
        );
    }

    #[test]
    fn unknown_verb_is_unsupported() {
        let err = "format-disk".parse::<Verb>().unwrap_err();
        assert!(matches!(err, HdcError::UnsupportedOperation(v) if v == "format-disk"));
        assert_eq!("reboot".parse::<Verb>().unwrap(), Verb::Reboot);
    }

    #[test]
    fn missing_argument_is_reported_by_name() {
        let err = builder()
            .build(Verb::PushFile, Some("dev"), &CommandArgs::new().with("localPath", "a"))
            .unwrap_err();
        assert!(matches!(err, HdcError::MissingArgument(n) if n == "remotePath"));
    }

    #[test]
    fn quote_leaves_safe_tokens_alone() {
        assert_eq!(quote("const.product.name"), "const.product.name");
        assert_eq!(quote(""), "''");
        assert_eq!(quote("a b"), "'a b'");
    }

    #[test]
    fn display_renders_quoted_command_line() {
        let args = CommandArgs::new()
            .with("localPath", "/tmp/my file.txt")
            .with("remotePath", "/data/local/tmp/");
        let line = builder().build(Verb::PushFile, Some("dev"), &args).unwrap();
        assert_eq!(
            line.to_string(),
            "/usr/local/bin/hdc -t dev file send '/tmp/my file.txt' /data/local/tmp/"
        );
    }
}
