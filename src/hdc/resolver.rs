// Locate the hdc executable once at startup.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{HdcError, HdcResult};

/// Environment variable pointing at the HarmonyOS SDK root.
pub const SDK_HOME_ENV: &str = "HM_SDK_HOME";

const WELL_KNOWN_LOCATIONS: &[&str] = &[
    "/usr/local/bin/hdc",
    "/opt/command-line-tools/sdk/default/openharmony/toolchains/hdc",
];

fn binary_name() -> String {
    format!("hdc{}", std::env::consts::EXE_SUFFIX)
}

/// Search order: explicit path, `PATH`, well-known install locations, then the SDK home.
#[derive(Debug, Clone, Default)]
pub struct ExecutablePathResolver {
    explicit: Option<PathBuf>,
    path_var: Option<OsString>,
    sdk_home: Option<PathBuf>,
    well_known: Vec<PathBuf>,
}

impl ExecutablePathResolver {
    /// Resolver seeded from the process environment, with config overrides.
    pub fn from_env(explicit: Option<&Path>, sdk_home: Option<&Path>) -> Self {
        Self {
            explicit: explicit.map(Path::to_path_buf),
            path_var: std::env::var_os("PATH"),
            sdk_home: sdk_home
                .map(Path::to_path_buf)
                .or_else(|| std::env::var_os(SDK_HOME_ENV).map(PathBuf::from)),
            well_known: WELL_KNOWN_LOCATIONS.iter().map(PathBuf::from).collect(),
        }
    }

    /// Empty resolver; finds nothing until given a source.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_explicit(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    pub fn with_path_var(mut self, path_var: impl Into<OsString>) -> Self {
        self.path_var = Some(path_var.into());
        self
    }

    pub fn with_sdk_home(mut self, sdk_home: impl Into<PathBuf>) -> Self {
        self.sdk_home = Some(sdk_home.into());
        self
    }

    pub fn with_well_known(mut self, locations: Vec<PathBuf>) -> Self {
        self.well_known = locations;
        self
    }

    /// Every location that will be probed, in order. An explicit path short-circuits the rest.
    pub fn candidates(&self) -> Vec<PathBuf> {
        if let Some(explicit) = &self.explicit {
            return vec![explicit.clone()];
        }
        let name = binary_name();
        let mut out: Vec<PathBuf> = self
            .path_var
            .as_ref()
            .map(|p| std::env::split_paths(p).map(|dir| dir.join(&name)).collect())
            .unwrap_or_default();
        out.extend(self.well_known.iter().cloned());
        if let Some(home) = &self.sdk_home {
            out.push(home.join("openharmony").join("toolchains").join(&name));
        }
        out
    }

    pub fn resolve(&self) -> HdcResult<PathBuf> {
        let candidates = self.candidates();
        for candidate in &candidates {
            debug!(candidate = %candidate.display(), "probing for hdc");
            if is_executable(candidate) {
                info!(path = %candidate.display(), "using hdc executable");
                return Ok(candidate.clone());
            }
        }
        Err(HdcError::ExecutableNotFound {
            searched: candidates,
        })
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
