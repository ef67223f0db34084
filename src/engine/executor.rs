//! Workflow Runner - drives steps in order and manages run state
//!
//! This is the one piece of sequencing logic in the crate:
//! 1. Redraw the progress view for the step about to run
//! 2. Spawn the step's command into a capture sink
//! 3. Sample the sink on a fixed interval to keep the tail line fresh
//! 4. Log the sanitized output, then advance or stop on the first failure
//!
//! Steps never overlap; within a step the command runs as an independent
//! process while this loop polls it, and no step N+1 begins before step N's
//! exit code has been observed.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use console::{strip_ansi_codes, style};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, instrument};

use crate::engine::capture::StepProcess;
use crate::engine::error::RunnerError;
use crate::engine::logger::RunLog;
use crate::engine::renderer::{ProgressRenderer, StatusTheme, TailLine};
use crate::engine::result::{ExecutionResult, RunOutcome, RunState, StepReport};
use crate::workflow::{Step, StepCursor, WorkflowDefinition};

/// How many captured lines to echo as context when a step fails
const FAILURE_CONTEXT_LINES: usize = 10;

/// Default sampling interval for the live tail
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Drives a workflow definition to completion or first failure
pub struct Runner<W: Write> {
    definition: WorkflowDefinition,
    renderer: ProgressRenderer,
    poll_interval: Duration,
    out: W,
}

impl Runner<io::Stdout> {
    /// Create a runner drawing to stdout
    pub fn new(definition: WorkflowDefinition) -> Self {
        Self::with_output(definition, io::stdout())
    }
}

impl<W: Write> Runner<W> {
    /// Create a runner drawing to an arbitrary writer (for testing)
    pub fn with_output(definition: WorkflowDefinition, out: W) -> Self {
        Self {
            definition,
            renderer: ProgressRenderer::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            out,
        }
    }

    /// Replace the default status theme
    pub fn theme(mut self, theme: StatusTheme) -> Self {
        self.renderer = ProgressRenderer::new(theme);
        self
    }

    /// Replace the default 100 ms tail sampling interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Consume the runner, returning its writer
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run every step in order, stopping at the first nonzero exit.
    ///
    /// A failing step is an `Ok` outcome with a `Failed` state; `Err` is
    /// reserved for the run infrastructure (log creation, spawn, terminal).
    #[instrument(skip(self), fields(workflow = %self.definition.name()))]
    pub async fn run(&mut self) -> Result<RunOutcome, RunnerError> {
        info!(steps = self.definition.step_count(), "starting workflow");

        let mut log = match self.definition.log_file() {
            Some(path) => RunLog::create(path, self.definition.name())?,
            None => RunLog::disabled(),
        };

        let steps = self.definition.steps().to_vec();
        let total = steps.len();
        let mut state = RunState::NotStarted;
        let mut reports = Vec::with_capacity(total);

        for step in &steps {
            state = state.advance(total);
            debug!(index = step.index, command = %step.command, "beginning step");

            self.renderer.draw(
                &mut self.out,
                &self.definition,
                StepCursor::running(step.index),
            )?;
            log.step_header(&step.command)?;

            let result = self.execute_step(step).await?;
            log.append_output(&result.lines)?;

            reports.push(StepReport {
                index: step.index,
                description: step.description.clone(),
                command: step.command.clone(),
                exit_code: result.exit_code,
            });

            if !result.success() {
                state = state.fail();
                error!(index = step.index, exit_code = result.exit_code, "step failed");
                self.report_failure(step, &result, log.path())?;
                return Ok(RunOutcome {
                    state,
                    steps: reports,
                });
            }

            info!(index = step.index, "step completed");
        }

        state = state.advance(total);
        self.renderer
            .draw(&mut self.out, &self.definition, StepCursor::done(total))?;
        writeln!(
            self.out,
            "{} all {} steps completed",
            style("✓").green().bold(),
            total
        )?;
        self.out.flush()?;

        Ok(RunOutcome {
            state,
            steps: reports,
        })
    }

    /// Run one step's command, tailing its output until it exits
    async fn execute_step(&mut self, step: &Step) -> Result<ExecutionResult, RunnerError> {
        let mut process = StepProcess::spawn(&step.command)?;
        let mut tail = TailLine::new();

        let mut poll = time::interval(self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let status = loop {
            poll.tick().await;
            if let Some(line) = process.latest_line()? {
                tail.show(&mut self.out, &line)?;
            }
            if let Some(status) = process.try_wait()? {
                break status;
            }
        };

        Ok(process.finish(status)?)
    }

    /// Redraw with the failed step marked, then print the diagnostic context
    fn report_failure(
        &mut self,
        step: &Step,
        result: &ExecutionResult,
        log_path: Option<&Path>,
    ) -> io::Result<()> {
        self.renderer.draw(
            &mut self.out,
            &self.definition,
            StepCursor::failed(step.index),
        )?;

        writeln!(
            self.out,
            "{} step {} failed with exit code {}",
            style("✗").red().bold(),
            step.index,
            result.exit_code
        )?;
        writeln!(self.out, "  command: {}", step.command)?;

        let tail = result.tail(FAILURE_CONTEXT_LINES);
        if !tail.is_empty() {
            writeln!(self.out, "  last output:")?;
            for line in tail {
                writeln!(self.out, "    {}", strip_ansi_codes(line))?;
            }
        }

        if let Some(path) = log_path {
            writeln!(self.out, "  full log: {}", path.display())?;
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::WorkflowDefinition;

    fn fast_runner(def: WorkflowDefinition) -> Runner<Vec<u8>> {
        Runner::with_output(def, Vec::new()).poll_interval(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_single_succeeding_step() {
        let def = WorkflowDefinition::new("T", None, vec![("noop", "true")]).unwrap();
        let outcome = fast_runner(def).run().await.unwrap();
        assert_eq!(outcome.state, RunState::Succeeded);
        assert_eq!(outcome.steps.len(), 1);
        assert_eq!(outcome.steps[0].exit_code, 0);
    }

    #[tokio::test]
    async fn test_failing_step_reports_its_index_and_code() {
        let def =
            WorkflowDefinition::new("T", None, vec![("noop", "true"), ("boom", "exit 9")]).unwrap();
        let outcome = fast_runner(def).run().await.unwrap();
        assert_eq!(outcome.state, RunState::Failed(2));
        assert_eq!(outcome.steps[1].exit_code, 9);
    }

    #[tokio::test]
    async fn test_failure_output_names_the_command() {
        let def = WorkflowDefinition::new("T", None, vec![("boom", "echo context; exit 1")])
            .unwrap();
        let mut runner = fast_runner(def);
        runner.run().await.unwrap();

        let text = String::from_utf8_lossy(&runner.into_output()).to_string();
        assert!(text.contains("echo context; exit 1"));
        assert!(text.contains("context"));
    }
}
