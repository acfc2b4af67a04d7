use serde::Deserialize;
use std::path::PathBuf;

use crate::hdc::command::{DEFAULT_ABILITY, DEFAULT_LOG_LINES};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub hdc: HdcConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HdcConfig {
    /// Explicit hdc executable; skips PATH and well-known locations when set.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// SDK root; falls back to the HM_SDK_HOME environment variable.
    #[serde(default)]
    pub sdk_home: Option<PathBuf>,
    /// Deadline per hdc invocation; 0 disables it.
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,
    #[serde(default = "default_ability")]
    pub default_ability: String,
    #[serde(default = "default_log_lines")]
    pub default_log_lines: u32,
}

fn default_command_timeout_ms() -> u64 {
    30_000
}

fn default_ability() -> String {
    DEFAULT_ABILITY.into()
}

fn default_log_lines() -> u32 {
    DEFAULT_LOG_LINES
}

impl Default for HdcConfig {
    fn default() -> Self {
        Self {
            path: None,
            sdk_home: None,
            command_timeout_ms: default_command_timeout_ms(),
            default_ability: default_ability(),
            default_log_lines: default_log_lines(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Stdio,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_transport")]
    pub transport: TransportKind,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_transport() -> TransportKind {
    TransportKind::Stdio
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8765
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load from `CONFIG_FILE`, else `./config.toml`, else built-in defaults.
    /// A `CONFIG_FILE` that cannot be read is an error.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var("CONFIG_FILE") {
            let s = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("reading {}: {}", path, e))?;
            return Self::load_from_str(&s);
        }
        match std::fs::read_to_string("config.toml") {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.hdc.default_ability.trim().is_empty(),
            "hdc.default_ability must be non-empty"
        );
        anyhow::ensure!(
            self.hdc.default_log_lines > 0,
            "hdc.default_log_lines must be > 0, got {}",
            self.hdc.default_log_lines
        );
        if let Some(path) = &self.hdc.path {
            anyhow::ensure!(
                !path.as_os_str().is_empty(),
                "hdc.path must be non-empty when set"
            );
        }
        if self.server.transport == TransportKind::Http {
            anyhow::ensure!(
                self.server.port > 0,
                "server.port must be between 1 and 65535, got {}",
                self.server.port
            );
            anyhow::ensure!(
                !self.server.host.is_empty(),
                "server.host must be non-empty"
            );
        }
        Ok(())
    }
}
