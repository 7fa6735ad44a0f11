//! Git operations used to cut a release branch
//!
//! [GitRelease] builds each git command from validated release input and runs
//! it through a [CommandRunner]. A failing command is returned as
//! [`crate::error::ReleaseError::CommandFailed`] and nothing after it runs.
//!
//! The full sequence used by the CLI is [GitRelease::prepare_release_branch]:
//!
//! 1. `git checkout main`
//! 2. `git merge-base main <previous version>`
//! 3. `git pull <remote> --tags`
//! 4. `git checkout <commit>`
//! 5. `git checkout -b release-<version>` then `git push -u <remote> release-<version>`

use std::path::PathBuf;

use log::info;

use crate::command::{CommandResult, CommandRunner};
use crate::domain::ReleaseVersion;
use crate::error::Result;
use crate::input::ReleaseInput;

/// Branch every release is cut relative to
pub const MAIN_BRANCH: &str = "main";

/// Prefix of every release branch name
pub const RELEASE_BRANCH_PREFIX: &str = "release-";

/// Name of the release branch for a version, e.g. `release-v4.11.0`
pub fn release_branch_name(version: &ReleaseVersion) -> String {
    format!("{}{}", RELEASE_BRANCH_PREFIX, version)
}

/// What a successful release branch preparation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedBranch {
    /// Common ancestor of `main` and the previous release
    pub last_release_commit: String,
    /// The pushed release branch
    pub branch_name: String,
}

/// Runs release git commands in one provider checkout
pub struct GitRelease<R: CommandRunner> {
    runner: R,
    dir: PathBuf,
    remote: String,
}

impl<R: CommandRunner> GitRelease<R> {
    pub fn new(runner: R, dir: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        GitRelease {
            runner,
            dir: dir.into(),
            remote: remote.into(),
        }
    }

    fn git(&self, args: &[&str], summary: &str) -> Result<CommandResult> {
        self.runner
            .run("git", args, &self.dir)
            .into_checked(summary)
    }

    /// `git checkout <reference>`, reporting a failure under `summary`
    pub fn checkout(&self, reference: &str, summary: &str) -> Result<CommandResult> {
        self.git(&["checkout", reference], summary)
    }

    /// `git merge-base main <previous version>`, returning the commit hash
    pub fn last_release_commit(&self, previous_version: &ReleaseVersion) -> Result<String> {
        let previous = previous_version.to_string();
        let result = self.git(
            &["merge-base", MAIN_BRANCH, &previous],
            "error when getting last release's commit",
        )?;

        Ok(result.stdout().trim().to_string())
    }

    /// `git pull <remote> --tags`
    pub fn pull_tags(&self) -> Result<CommandResult> {
        self.git(&["pull", &self.remote, "--tags"], "error when pulling tags")
    }

    /// Create the release branch locally, then push it with upstream tracking.
    ///
    /// The push is skipped when the local branch cannot be created; the
    /// returned error then carries the `checkout -b` result.
    pub fn create_and_push_release_branch(&self, version: &ReleaseVersion) -> Result<String> {
        let branch_name = release_branch_name(version);
        let summary = "error when creating a new release branch";

        self.git(&["checkout", "-b", &branch_name], summary)?;
        self.git(&["push", "-u", &self.remote, &branch_name], summary)?;

        Ok(branch_name)
    }

    /// Run the whole release branch sequence for `input`
    pub fn prepare_release_branch(&self, input: &ReleaseInput) -> Result<PreparedBranch> {
        info!("checking out {} in {}", MAIN_BRANCH, self.dir.display());
        self.checkout(MAIN_BRANCH, "error when checking out main")?;

        let last_release_commit = self.last_release_commit(input.previous_version())?;
        info!(
            "last release {} branched from {}",
            input.previous_version(),
            last_release_commit
        );

        info!("pulling tags from {}", self.remote);
        self.pull_tags()?;

        info!("checking out release commit {}", input.commit());
        self.checkout(input.commit(), "error when checking out provided commit SHA")?;

        info!("starting to create and push new release branch");
        let branch_name = self.create_and_push_release_branch(input.release_version())?;
        info!("release branch {} was created and pushed", branch_name);

        Ok(PreparedBranch {
            last_release_commit,
            branch_name,
        })
    }
}
