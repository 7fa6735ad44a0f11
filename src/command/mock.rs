use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::command::{render_command_line, CommandResult, CommandRunner};

/// One invocation seen by a [MockRunner]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl RecordedCommand {
    pub fn command_line(&self) -> String {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        render_command_line(&self.program, &args)
    }
}

#[derive(Debug, Clone)]
struct Failure {
    stderr: String,
    error: String,
}

/// Command runner for tests that never spawns a process
///
/// Every call is recorded. Results are scripted by exact command line:
/// `with_stdout` sets what a successful call prints, `fail_on` makes a call
/// fail. Unscripted commands succeed with empty output.
#[derive(Debug, Default)]
pub struct MockRunner {
    calls: Mutex<Vec<RecordedCommand>>,
    stdout: HashMap<String, String>,
    failures: HashMap<String, Failure>,
}

impl MockRunner {
    /// Create a mock where every command succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the stdout of a command line
    pub fn with_stdout(mut self, command_line: &str, stdout: &str) -> Self {
        self.stdout
            .insert(command_line.to_string(), stdout.to_string());
        self
    }

    /// Make the given command line fail with `stderr`
    pub fn fail_on(mut self, command_line: &str, stderr: &str) -> Self {
        self.failures.insert(
            command_line.to_string(),
            Failure {
                stderr: stderr.to_string(),
                error: "forced error from test mock".to_string(),
            },
        );
        self
    }

    /// Every invocation so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCommand> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call log poisoned").len()
    }

    /// Program plus arguments of every invocation, for exact comparisons
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .map(|call| {
                let mut argv = vec![call.program];
                argv.extend(call.args);
                argv
            })
            .collect()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str], working_dir: &Path) -> CommandResult {
        let command_line = render_command_line(program, args);

        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(RecordedCommand {
                program: program.to_string(),
                args: args.iter().map(|a| a.to_string()).collect(),
                working_dir: working_dir.to_path_buf(),
            });

        if let Some(failure) = self.failures.get(&command_line) {
            return CommandResult::new(
                command_line,
                working_dir,
                "",
                failure.stderr.clone(),
                Some(failure.error.clone()),
            );
        }

        let stdout = self.stdout.get(&command_line).cloned().unwrap_or_default();
        CommandResult::new(command_line, working_dir, stdout, "", None)
    }
}
