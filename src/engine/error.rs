//! Runner error types

use std::path::PathBuf;

/// Errors that can occur while driving a workflow
///
/// A step exiting nonzero is not an error here; that is an outcome, reported
/// through [`crate::engine::RunOutcome`]. These variants cover the run
/// infrastructure itself.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The log destination could not be created; fatal, never downgraded
    #[error("cannot create log destination {path}: {source}")]
    Resource {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to spawn command `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
