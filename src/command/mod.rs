//! External command execution
//!
//! Everything tpg-release does to a repository goes through the
//! [CommandRunner] trait so the release sequence can be exercised without
//! spawning real processes.
//!
//! - [ProcessRunner]: spawns the command with `std::process::Command`
//! - [MockRunner]: records invocations and replays scripted results
//!
//! A [CommandResult] is built fresh for every invocation and owns the output
//! captured for that one command.

pub mod mock;
pub mod process;

pub use mock::{MockRunner, RecordedCommand};
pub use process::ProcessRunner;

use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// Outcome of one external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    command_line: String,
    working_dir: PathBuf,
    stdout: String,
    stderr: String,
    error: Option<String>,
}

impl CommandResult {
    pub fn new(
        command_line: impl Into<String>,
        working_dir: impl Into<PathBuf>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        error: Option<String>,
    ) -> Self {
        CommandResult {
            command_line: command_line.into(),
            working_dir: working_dir.into(),
            stdout: stdout.into(),
            stderr: stderr.into(),
            error,
        }
    }

    /// The command and its arguments as they were executed
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Exit status or spawn error, if the command did not succeed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    /// Turn a failed command into a [ReleaseError::CommandFailed]
    pub fn into_checked(self, summary: &str) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(ReleaseError::command_failed(summary, self))
        }
    }

    /// Human readable report of a failed command.
    ///
    /// Contains the summary, the command line, the working directory, the
    /// underlying error and the captured stderr, in that order.
    pub fn describe_failure(&self, summary: &str) -> String {
        format!(
            "{}:\n\tCommand: `{}`\n\tDirectory: {}\n\tError: {}\n\tStdErr: {}",
            summary,
            self.command_line,
            self.working_dir.display(),
            self.error.as_deref().unwrap_or("none"),
            self.stderr.trim_end()
        )
    }
}

/// Executes external commands
pub trait CommandRunner {
    /// Run `program` with `args` inside `working_dir` and wait for it to exit.
    ///
    /// Never fails outright: spawn errors and non-zero exits are reported
    /// through [CommandResult::error] together with whatever was captured.
    fn run(&self, program: &str, args: &[&str], working_dir: &Path) -> CommandResult;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[&str], working_dir: &Path) -> CommandResult {
        (**self).run(program, args, working_dir)
    }
}

/// Render a program and its arguments as a shell-like command line
pub fn render_command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            line.push_str(&format!("{:?}", arg));
        } else {
            line.push_str(arg);
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_result() -> CommandResult {
        CommandResult::new(
            "git push -u origin release-v4.11.0",
            "/work/terraform-provider-google",
            "",
            "fatal: could not read from remote repository\n",
            Some("exit status: 128".to_string()),
        )
    }

    #[test]
    fn test_describe_failure_field_order() {
        let msg = failed_result().describe_failure("error when creating a new release branch");

        let summary = msg.find("error when creating a new release branch").unwrap();
        let command = msg.find("git push -u origin release-v4.11.0").unwrap();
        let dir = msg.find("/work/terraform-provider-google").unwrap();
        let error = msg.find("exit status: 128").unwrap();
        let stderr = msg.find("fatal: could not read from remote repository").unwrap();

        assert!(summary < command);
        assert!(command < dir);
        assert!(dir < error);
        assert!(error < stderr);
    }

    #[test]
    fn test_describe_failure_exact_format() {
        let msg = failed_result().describe_failure("push failed");
        assert_eq!(
            msg,
            "push failed:\n\tCommand: `git push -u origin release-v4.11.0`\n\tDirectory: /work/terraform-provider-google\n\tError: exit status: 128\n\tStdErr: fatal: could not read from remote repository"
        );
    }

    #[test]
    fn test_into_checked() {
        let ok = CommandResult::new("git status", ".", "clean", "", None);
        assert!(ok.clone().into_checked("status").is_ok());

        let err = failed_result().into_checked("push failed").unwrap_err();
        match err {
            ReleaseError::CommandFailed { summary, result } => {
                assert_eq!(summary, "push failed");
                assert_eq!(result.command_line(), "git push -u origin release-v4.11.0");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_command_failed_display_is_describe_failure() {
        let result = failed_result();
        let expected = result.describe_failure("push failed");
        let err = ReleaseError::command_failed("push failed", result);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_render_command_line_quotes_spaces() {
        assert_eq!(
            render_command_line("changelog-gen", &["-no-note-label", "changelog: no-release-note"]),
            "changelog-gen -no-note-label \"changelog: no-release-note\""
        );
        assert_eq!(render_command_line("git", &["checkout", "main"]), "git checkout main");
    }
}
