use std::env;
use std::path::{Path, PathBuf};

use log::info;

use crate::command::CommandRunner;
use crate::config::Config;
use crate::error::{ReleaseError, Result};
use crate::git::MAIN_BRANCH;
use crate::input::ReleaseInput;

/// Name of the changelog generator executable
pub const CHANGELOG_EXECUTABLE: &str = "changelog-gen";

/// Label marking pull requests that need no release note
pub const NO_NOTE_LABEL: &str = "changelog: no-release-note";

/// One `changelog-gen` invocation over a commit range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogRun {
    pub repo: String,
    pub owner: String,
    pub changelog_template: PathBuf,
    pub release_note_template: PathBuf,
    /// Exclusive start of the range, the last release's commit
    pub from_commit: String,
    /// Inclusive end of the range, the commit the release is cut from
    pub to_commit: String,
    pub dir: PathBuf,
}

impl ChangelogRun {
    /// Changelog for everything between the last release and `input`'s commit
    pub fn for_release(config: &Config, input: &ReleaseInput, last_release_commit: &str) -> Self {
        ChangelogRun {
            repo: input.repo_name().to_string(),
            owner: config.remote_owner.clone(),
            changelog_template: config.changelog_template(),
            release_note_template: config.release_note_template(),
            from_commit: last_release_commit.to_string(),
            to_commit: input.commit().to_string(),
            dir: config.provider_directory(input.provider()).to_path_buf(),
        }
    }

    /// Arguments passed to the generator, in order
    pub fn args(&self) -> Vec<String> {
        vec![
            "-repo".to_string(),
            self.repo.clone(),
            "-branch".to_string(),
            MAIN_BRANCH.to_string(),
            "-owner".to_string(),
            self.owner.clone(),
            "-changelog".to_string(),
            self.changelog_template.display().to_string(),
            "-releasenote".to_string(),
            self.release_note_template.display().to_string(),
            "-no-note-label".to_string(),
            NO_NOTE_LABEL.to_string(),
            self.from_commit.clone(),
            self.to_commit.clone(),
        ]
    }

    /// Run the generator and return the changelog it printed
    pub fn generate<R: CommandRunner>(&self, runner: &R) -> Result<String> {
        info!(
            "generating changelog for {} from {} to {}",
            self.repo, self.from_commit, self.to_commit
        );
        let args = self.args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let result = runner
            .run(CHANGELOG_EXECUTABLE, &args, &self.dir)
            .into_checked("error when generating the changelog")?;
        Ok(result.stdout().to_string())
    }
}

/// Find `program` in the directories listed in `PATH`
pub fn find_executable(program: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

/// Fail early when the changelog generator is not installed
pub fn ensure_changelog_generator() -> Result<PathBuf> {
    find_executable(CHANGELOG_EXECUTABLE).ok_or_else(|| {
        ReleaseError::config(format!(
            "you need to have {} in your PATH to use this CLI. Ensure it is in your PATH or download it via: go install github.com/paultyng/changelog-gen@master",
            CHANGELOG_EXECUTABLE
        ))
    })
}
