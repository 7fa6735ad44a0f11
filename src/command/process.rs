use std::path::Path;
use std::process::Command;

use log::debug;

use crate::command::{render_command_line, CommandResult, CommandRunner};

/// Runs commands as real child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    env: Vec<(String, String)>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an extra environment variable on every spawned command
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str], working_dir: &Path) -> CommandResult {
        let command_line = render_command_line(program, args);
        debug!("running `{}` in {}", command_line, working_dir.display());

        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(working_dir);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        match cmd.output() {
            Ok(output) => {
                let error = if output.status.success() {
                    None
                } else {
                    Some(output.status.to_string())
                };
                CommandResult::new(
                    command_line,
                    working_dir,
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr),
                    error,
                )
            }
            Err(e) => CommandResult::new(
                command_line,
                working_dir,
                "",
                "",
                Some(format!("failed to start {}: {}", program, e)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessRunner::new().run("tpg-release-no-such-binary", &["--help"], dir.path());

        assert!(!result.success());
        assert_eq!(result.command_line(), "tpg-release-no-such-binary --help");
        assert_eq!(result.working_dir(), dir.path());
        assert!(result
            .error()
            .unwrap()
            .contains("failed to start tpg-release-no-such-binary"));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_streams_and_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessRunner::new().run(
            "sh",
            &["-c", "echo out; echo err >&2; exit 3"],
            dir.path(),
        );

        assert!(!result.success());
        assert_eq!(result.stdout(), "out\n");
        assert_eq!(result.stderr(), "err\n");
        assert!(result.error().unwrap().contains('3'));
    }

    #[cfg(unix)]
    #[test]
    fn test_each_run_gets_fresh_output() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ProcessRunner::new();

        let first = runner.run("sh", &["-c", "echo first; echo oops >&2"], dir.path());
        let second = runner.run("sh", &["-c", "echo second"], dir.path());

        assert_eq!(first.stdout(), "first\n");
        assert_eq!(second.stdout(), "second\n");
        assert_eq!(second.stderr(), "");
        assert!(second.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_env_is_passed_through() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ProcessRunner::new().with_env("TPG_RELEASE_TEST", "hello");

        let result = runner.run("sh", &["-c", "printf %s \"$TPG_RELEASE_TEST\""], dir.path());
        assert_eq!(result.stdout(), "hello");
    }
}
