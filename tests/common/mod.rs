use std::path::Path;
use std::time::Duration;

use run_workflow::WorkflowDefinition;
use tempfile::TempDir;

/// Fast tail-sampling interval so tests do not wait on the 100 ms default
pub const FAST_POLL: Duration = Duration::from_millis(5);

pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

pub fn definition(steps: &[(&str, &str)]) -> WorkflowDefinition {
    WorkflowDefinition::new("Workflow", None, steps.iter().copied())
        .expect("Failed to build definition")
}

pub fn definition_with_log(log: &Path, steps: &[(&str, &str)]) -> WorkflowDefinition {
    WorkflowDefinition::new("Workflow", Some(log.to_path_buf()), steps.iter().copied())
        .expect("Failed to build definition")
}
