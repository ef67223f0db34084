//! Execution result types and the run state machine

/// Captured outcome of one step's command
///
/// Lines are raw as captured, formatting codes intact. Created per step,
/// consumed synchronously (display tail, log flush), then dropped.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Process exit code; `-1` when the command was killed by a signal
    pub exit_code: i32,
    pub lines: Vec<String>,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Up to the last `n` captured lines
    pub fn tail(&self, n: usize) -> &[String] {
        let start = self.lines.len().saturating_sub(n);
        &self.lines[start..]
    }
}

/// Summary of one executed step
#[derive(Debug, Clone)]
pub struct StepReport {
    pub index: usize,
    pub description: String,
    pub command: String,
    pub exit_code: i32,
}

/// Overall state of a run
///
/// `Running(i)` advances to `Running(i+1)` only on a zero exit; any nonzero
/// exit moves to `Failed(i)`. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running(usize),
    Succeeded,
    Failed(usize),
}

impl RunState {
    /// Move to the next step, or to `Succeeded` past the last one
    pub fn advance(self, step_count: usize) -> RunState {
        match self {
            RunState::NotStarted => RunState::Running(1),
            RunState::Running(i) if i < step_count => RunState::Running(i + 1),
            RunState::Running(_) => RunState::Succeeded,
            terminal => terminal,
        }
    }

    /// Mark the current step as failed
    pub fn fail(self) -> RunState {
        match self {
            RunState::Running(i) => RunState::Failed(i),
            other => other,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Succeeded | RunState::Failed(_))
    }
}

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub state: RunState,
    /// Reports for every step that actually executed
    pub steps: Vec<StepReport>,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.state == RunState::Succeeded
    }
}
