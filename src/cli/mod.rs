pub mod orchestration;

pub use orchestration::{collect_input, run_release_workflow, ReleaseWorkflowArgs, WorkflowResult};
