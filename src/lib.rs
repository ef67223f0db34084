//! # run-workflow
//!
//! A sequential shell-command workflow runner with a live terminal progress
//! view. Each step is a (description, command) pair; the runner redraws a
//! full-screen status view per step, tails the step's most recent output
//! line while it runs, and appends sanitized output to an optional log file.
//! The first nonzero exit stops the run with diagnostic context.
//!
//! ## Features
//!
//! - **Named-argument CLI** - Build workflows straight from the command line
//! - **Live progress view** - Status glyph per step, redrawn as steps advance
//! - **Output tail** - The latest output line, sampled while a command runs
//! - **Sanitized logging** - Full captured output with control codes stripped
//! - **First-failure stop** - Failing command, context lines, and log pointer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use run_workflow::{Runner, WorkflowDefinition};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let definition = WorkflowDefinition::new(
//!         "Release",
//!         None,
//!         vec![
//!             ("Build", "cargo build --release"),
//!             ("Test", "cargo test"),
//!         ],
//!     )?;
//!
//!     let outcome = Runner::new(definition).run().await?;
//!     println!("workflow finished: success={}", outcome.success());
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod workflow;

// Re-export main types
pub use engine::{
    ExecutionResult, ProgressRenderer, RunLog, RunOutcome, RunState, Runner, RunnerError,
    StatusGlyph, StatusTheme, StepProcess, StepReport, TailLine,
};
pub use workflow::{
    parse_tokens, ConfigError, ParseOutcome, Step, StepCursor, StepStatus, WorkflowDefinition,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{RunOutcome, RunState, Runner, RunnerError, StatusTheme};
    pub use crate::workflow::{
        parse_tokens, ConfigError, ParseOutcome, Step, StepCursor, StepStatus, WorkflowDefinition,
    };
}
