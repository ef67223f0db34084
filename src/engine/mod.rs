//! Workflow execution engine module
//!
//! This module contains:
//! - `executor` - the sequential drive loop
//! - `capture` - per-step process spawn and output capture
//! - `renderer` - progress view and live tail rendering
//! - `logger` - the sanitized run log
//! - `error` - runner error types
//! - `result` - execution results and the run state machine

pub mod capture;
pub mod error;
pub mod executor;
pub mod logger;
pub mod renderer;
pub mod result;

pub use capture::StepProcess;
pub use error::RunnerError;
pub use executor::Runner;
pub use logger::RunLog;
pub use renderer::{ProgressRenderer, StatusGlyph, StatusTheme, TailLine};
pub use result::{ExecutionResult, RunOutcome, RunState, StepReport};
