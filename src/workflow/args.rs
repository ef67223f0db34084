//! Command-line argument parsing
//!
//! Turns the flat option stream into a validated [`WorkflowDefinition`].
//! Tokenization is clap's job; the typed error taxonomy callers match on
//! (`MalformedStep`, `UnknownOption`, `NoStepsProvided`) is classified here
//! from clap's rejection kinds, so no partial run can start from bad input.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;

use super::definition::WorkflowDefinition;

/// Errors detected before any command executes
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A `--step` was given fewer than two trailing values
    #[error("--step requires two values: a description and a command")]
    MalformedStep,

    #[error("unrecognized option: {0}")]
    UnknownOption(String),

    #[error("no steps provided; at least one --step DESCRIPTION COMMAND is required")]
    NoStepsProvided,

    /// Any other argument rejection, reported as clap produced it
    #[error(transparent)]
    Invalid(#[from] clap::Error),
}

/// Result of a successful parse
#[derive(Debug)]
pub enum ParseOutcome {
    /// A validated definition ready to run
    Run(WorkflowDefinition),

    /// Help was requested: rendered usage text, nothing runs
    Help(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "run-workflow",
    about = "Run a named sequence of shell commands with a live progress display"
)]
struct Cli {
    /// Display name for the workflow
    #[arg(
        short = 'w',
        long = "workflow-name",
        value_name = "NAME",
        default_value = "Workflow"
    )]
    workflow_name: String,

    /// Write sanitized step output to this file (truncated at start)
    #[arg(short = 'l', long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// A step to run: a description followed by a shell command (repeatable)
    #[arg(
        short = 's',
        long = "step",
        value_names = ["DESCRIPTION", "COMMAND"],
        num_args = 2,
        action = clap::ArgAction::Append,
        allow_hyphen_values = true
    )]
    step: Vec<String>,
}

/// Parse a flat token stream (including the program name) into a workflow.
///
/// Repeated `--step` pairs keep their given order; all other options are
/// order-independent. `--help` short-circuits with the rendered usage text.
pub fn parse_tokens<I, T>(args: I) -> Result<ParseOutcome, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => {
            let pairs = cli
                .step
                .chunks_exact(2)
                .map(|pair| (pair[0].clone(), pair[1].clone()));
            let definition = WorkflowDefinition::new(cli.workflow_name, cli.log_file, pairs)?;
            Ok(ParseOutcome::Run(definition))
        }
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp => Ok(ParseOutcome::Help(err.to_string())),
            ErrorKind::WrongNumberOfValues | ErrorKind::TooFewValues => {
                Err(ConfigError::MalformedStep)
            }
            ErrorKind::UnknownArgument => Err(ConfigError::UnknownOption(offending_token(&err))),
            _ => Err(ConfigError::Invalid(err)),
        },
    }
}

/// Pull the offending argument out of a clap unknown-argument error
fn offending_token(err: &clap::Error) -> String {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.clone(),
        _ => "<unknown>".to_string(),
    }
}
