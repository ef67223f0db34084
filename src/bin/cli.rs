use std::process::ExitCode;

use run_workflow::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("run_workflow=warn"));

    // Diagnostics go to stderr; stdout belongs to the progress view.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("run-workflow: {e}");
            ExitCode::from(1)
        }
    }
}

async fn run() -> anyhow::Result<bool> {
    let definition = match parse_tokens(std::env::args()) {
        Ok(ParseOutcome::Run(definition)) => definition,
        Ok(ParseOutcome::Help(text)) => {
            print!("{text}");
            return Ok(true);
        }
        Err(err) => {
            eprintln!("run-workflow: {err}");
            eprintln!("try 'run-workflow --help' for usage");
            return Ok(false);
        }
    };

    let outcome = Runner::new(definition).run().await?;
    Ok(outcome.success())
}
