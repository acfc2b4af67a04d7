// Run one hdc command line as a child process and capture its output.

use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::{debug, instrument, warn};

use super::command::CommandLine;
use crate::error::{HdcError, HdcResult};

/// hdc often exits 0 and reports failures on stdout with this prefix.
const FAIL_MARKER: &str = "[Fail]";

#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    timeout: Option<Duration>,
}

impl ProcessExecutor {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Spawn, wait, and return stdout with trailing whitespace trimmed.
    ///
    /// The child is spawned with `kill_on_drop`, so it is reaped on every path: normal exit,
    /// timeout, and the caller dropping this future.
    #[instrument(skip(self, command), fields(command = %command))]
    pub async fn run(&self, command: &CommandLine) -> HdcResult<String> {
        let started = Instant::now();
        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                warn!(error = %e, "failed to spawn hdc");
                HdcError::ExecutionFailure {
                    command: command.to_string(),
                    exit: "spawn failed".into(),
                    detail: e.to_string(),
                }
            })?;

        let waited = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(timeout_ms = limit.as_millis() as u64, "hdc command timed out");
                    return Err(HdcError::Timeout {
                        command: command.to_string(),
                        timeout_ms: limit.as_millis() as u64,
                    });
                }
            },
            None => child.wait_with_output().await,
        };
        let output = waited.map_err(|e| HdcError::ExecutionFailure {
            command: command.to_string(),
            exit: "wait failed".into(),
            detail: e.to_string(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!(
            status = ?output.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            stdout_bytes = output.stdout.len(),
            "hdc command finished"
        );

        if !output.status.success() {
            let detail = if stderr.is_empty() {
                stdout.trim().to_string()
            } else {
                stderr
            };
            return Err(HdcError::ExecutionFailure {
                command: command.to_string(),
                exit: describe_exit(output.status),
                detail,
            });
        }
        if stdout.trim_start().starts_with(FAIL_MARKER) {
            return Err(HdcError::ExecutionFailure {
                command: command.to_string(),
                exit: "reported failure".into(),
                detail: stdout.trim().to_string(),
            });
        }
        Ok(stdout)
    }
}

fn describe_exit(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".into(),
    }
}
