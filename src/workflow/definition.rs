//! Workflow and Step definitions
//!
//! This module contains the core structure types for a workflow run: the
//! immutable definition built from command-line arguments, and the derived
//! per-step status used by the progress renderer.

use std::path::{Path, PathBuf};

use super::args::ConfigError;

// ============================================================================
// Workflow definition
// ============================================================================

/// A complete workflow definition
///
/// Built once from the parsed arguments and immutable afterwards. Holds the
/// display name, the optional log destination, and the ordered step list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDefinition {
    name: String,
    log_file: Option<PathBuf>,
    steps: Vec<Step>,
}

/// One (description, command) pair executed in sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 1-based position, fixed at creation
    pub index: usize,

    /// Human-readable label shown in the progress view
    pub description: String,

    /// Opaque shell command text, executed via `sh -c`
    pub command: String,
}

impl WorkflowDefinition {
    /// Build a definition from (description, command) pairs.
    ///
    /// Steps are numbered 1-based in the order given. An empty step list is
    /// rejected with [`ConfigError::NoStepsProvided`].
    pub fn new<N, I, D, C>(
        name: N,
        log_file: Option<PathBuf>,
        steps: I,
    ) -> Result<Self, ConfigError>
    where
        N: Into<String>,
        I: IntoIterator<Item = (D, C)>,
        D: Into<String>,
        C: Into<String>,
    {
        let steps: Vec<Step> = steps
            .into_iter()
            .enumerate()
            .map(|(i, (description, command))| Step {
                index: i + 1,
                description: description.into(),
                command: command.into(),
            })
            .collect();

        if steps.is_empty() {
            return Err(ConfigError::NoStepsProvided);
        }

        Ok(Self {
            name: name.into(),
            log_file,
            steps,
        })
    }

    /// Workflow display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Log destination, if logging is enabled
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Ordered step list
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

// ============================================================================
// Derived step status
// ============================================================================

/// Status of a single step, derived from the cursor at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Current,
    Completed,
    Failed,
}

/// Position of the run within the step list
///
/// `position` is 1-based; `step_count + 1` denotes "all done". Exactly one
/// step is Current (or Failed) at any time; everything before it is
/// Completed, everything after is Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCursor {
    position: usize,
    failed: bool,
}

impl StepCursor {
    /// Cursor for a step about to run (or running)
    pub fn running(position: usize) -> Self {
        Self {
            position,
            failed: false,
        }
    }

    /// Cursor for the step that just failed
    pub fn failed(position: usize) -> Self {
        Self {
            position,
            failed: true,
        }
    }

    /// Cursor past the last step: every step shows Completed
    pub fn done(step_count: usize) -> Self {
        Self {
            position: step_count + 1,
            failed: false,
        }
    }

    /// Derive the status of the step at `index` (1-based)
    pub fn status_of(&self, index: usize) -> StepStatus {
        if index < self.position {
            StepStatus::Completed
        } else if index == self.position {
            if self.failed {
                StepStatus::Failed
            } else {
                StepStatus::Current
            }
        } else {
            StepStatus::Pending
        }
    }
}
