//! The workflow run log
//!
//! Optional plain-text record of everything each step printed, with terminal
//! control sequences stripped and line order preserved. When no destination
//! is configured every operation is a no-op and no file is ever created.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use console::strip_ansi_codes;

use crate::engine::error::RunnerError;

/// Append-only run log, or a no-op stand-in
#[derive(Debug)]
pub struct RunLog {
    inner: Option<LogFile>,
}

#[derive(Debug)]
struct LogFile {
    path: PathBuf,
    file: File,
}

impl RunLog {
    /// A log that discards everything
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Create (or truncate) the log at `path` and write the start banner.
    ///
    /// The parent directory is created if missing. Any failure here is fatal
    /// for the run; logging is never silently downgraded.
    pub fn create(path: &Path, workflow_name: &str) -> Result<Self, RunnerError> {
        let resource = |source: std::io::Error| RunnerError::Resource {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(resource)?;
            }
        }

        let mut file = File::create(path).map_err(resource)?;
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "=== {workflow_name} Started at {timestamp} ===").map_err(resource)?;

        Ok(Self {
            inner: Some(LogFile {
                path: path.to_path_buf(),
                file,
            }),
        })
    }

    /// Destination path, when logging is enabled
    pub fn path(&self) -> Option<&Path> {
        self.inner.as_ref().map(|log| log.path.as_path())
    }

    /// Append the separator naming the command about to run
    pub fn step_header(&mut self, command: &str) -> std::io::Result<()> {
        if let Some(log) = &mut self.inner {
            writeln!(log.file, "\n--- Executing: {command} ---")?;
        }
        Ok(())
    }

    /// Append captured lines with control sequences stripped, order intact
    pub fn append_output(&mut self, lines: &[String]) -> std::io::Result<()> {
        if let Some(log) = &mut self.inner {
            for line in lines {
                writeln!(log.file, "{}", strip_ansi_codes(line))?;
            }
            log.file.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_disabled_log_never_touches_the_filesystem() {
        let mut log = RunLog::disabled();
        assert!(log.path().is_none());
        log.step_header("echo hi").unwrap();
        log.append_output(&["hi".to_string()]).unwrap();
    }

    #[test]
    fn test_create_truncates_and_writes_the_banner() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.log");
        fs::write(&path, "stale content from a previous run\n").unwrap();

        let log = RunLog::create(&path, "Nightly").unwrap();
        assert_eq!(log.path(), Some(path.as_path()));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("=== Nightly Started at "));
        assert!(content.trim_end().ends_with("==="));
        assert!(!content.contains("stale content"));
    }

    #[test]
    fn test_create_makes_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("deep").join("run.log");

        RunLog::create(&path, "Workflow").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_create_fails_when_parent_is_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = RunLog::create(&blocker.join("run.log"), "Workflow");
        assert!(matches!(result, Err(RunnerError::Resource { .. })));
    }

    #[test]
    fn test_output_is_stripped_but_order_preserved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.log");
        let mut log = RunLog::create(&path, "Workflow").unwrap();

        log.step_header("make colors").unwrap();
        log.append_output(&[
            "plain first".to_string(),
            "\x1b[1;32mgreen second\x1b[0m".to_string(),
            "\x1b[31mred\x1b[0m third".to_string(),
        ])
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("--- Executing: make colors ---"));
        assert!(!content.contains('\x1b'));

        let first = content.find("plain first").unwrap();
        let second = content.find("green second").unwrap();
        let third = content.find("red third").unwrap();
        assert!(first < second && second < third);
    }
}
