// Domain errors for command building, execution and dispatch

use std::path::PathBuf;

/// Failure of a single hdc operation. Everything except `ExecutableNotFound` is caught by the
/// dispatcher and rendered as an `isError` response.
#[derive(Debug, thiserror::Error)]
pub enum HdcError {
    #[error("hdc executable not found (searched: {}); install the OpenHarmony SDK and add hdc to PATH", format_paths(.searched))]
    ExecutableNotFound { searched: Vec<PathBuf> },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("unknown tool: {0}")]
    UnknownOperation(String),

    #[error("missing required argument: {0}")]
    MissingArgument(String),

    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("hdc command failed ({exit}): {command}: {detail}")]
    ExecutionFailure {
        command: String,
        exit: String,
        detail: String,
    },

    #[error("hdc command timed out after {timeout_ms} ms: {command}")]
    Timeout { command: String, timeout_ms: u64 },

    #[error("failed to get device info for {device}: {source}")]
    AggregationFailure {
        device: String,
        #[source]
        source: Box<HdcError>,
    },
}

impl HdcError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        HdcError::InvalidArgument {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".into();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type HdcResult<T> = Result<T, HdcError>;
