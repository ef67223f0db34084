//! Per-step command execution and output capture
//!
//! Runs one step's command with stdout and stderr merged into a temporary
//! capture sink, and exposes the small poll-able interface the drive loop
//! needs: the most recent output line, and whether the process has exited.
//! The sink is never attached to the terminal, so the caller fully controls
//! what the user sees.

use std::process::{ExitStatus, Stdio};

use tempfile::NamedTempFile;
use tokio::process::{Child, Command};
use tracing::debug;

use crate::engine::error::RunnerError;
use crate::engine::result::ExecutionResult;

/// A running step command and its capture sink
///
/// The sink file is removed when the value drops, on success and failure
/// alike. Command text is opaque: it is handed to `sh -c` unparsed.
pub struct StepProcess {
    child: Child,
    sink: NamedTempFile,
}

impl StepProcess {
    /// Spawn `command` with stdout and stderr merged into one capture sink
    pub fn spawn(command: &str) -> Result<Self, RunnerError> {
        let sink = NamedTempFile::new()?;
        // Both streams share one file handle so interleaving follows OS
        // write order.
        let stdout = sink.reopen()?;
        let stderr = stdout.try_clone()?;

        debug!(command, "spawning step command");
        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                command: command.to_string(),
                source,
            })?;

        Ok(Self { child, sink })
    }

    /// Most recent non-blank captured line, raw (control sequences intact)
    pub fn latest_line(&self) -> std::io::Result<Option<String>> {
        let bytes = std::fs::read(self.sink.path())?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(text
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map(str::to_string))
    }

    /// Exit status, if the command has finished
    pub fn try_wait(&mut self) -> std::io::Result<Option<ExitStatus>> {
        self.child.try_wait()
    }

    /// Consume the process after exit, returning everything it captured.
    ///
    /// The capture sink is removed here.
    pub fn finish(self, status: ExitStatus) -> std::io::Result<ExecutionResult> {
        let bytes = std::fs::read(self.sink.path())?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(ExecutionResult {
            exit_code: status.code().unwrap_or(-1),
            lines: text.lines().map(str::to_string).collect(),
        })
    }
}
