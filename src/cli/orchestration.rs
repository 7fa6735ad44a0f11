//! Main workflow orchestration logic
//!
//! Collects the release input from flags or prompts, then cuts the release
//! branch and generates the changelog. Kept apart from `main.rs` so the whole
//! flow can be driven with in-memory prompts and a mock command runner.

use std::io::{BufRead, Write};

use log::info;

use crate::changelog::ChangelogRun;
use crate::command::CommandRunner;
use crate::config::Config;
use crate::error::{Result, ValidationErrors};
use crate::git::GitRelease;
use crate::input::{ReleaseInput, ReleaseInputBuilder};
use crate::release_version::{next_minor_version, ReleaseListing, ReleaseQuery};
use crate::ui::Prompter;

/// Arguments for the release workflow
///
/// Mirrors the CLI flags without depending on clap. A value left unset is
/// asked for interactively.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleaseWorkflowArgs {
    pub ga: bool,
    pub beta: bool,
    pub commit_sha: Option<String>,
    pub release_version: Option<String>,
    pub prev_release_version: Option<String>,
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowResult {
    /// The pushed release branch
    pub branch_name: String,

    /// Common ancestor of `main` and the previous release
    pub last_release_commit: String,

    /// Output of the changelog generator
    pub changelog: String,

    /// Where to edit CHANGELOG.md on the release branch
    pub changelog_url: String,
}

/// GitHub URL for editing CHANGELOG.md on a branch
pub fn changelog_edit_url(owner: &str, repo: &str, branch: &str) -> String {
    format!(
        "https://github.com/{}/{}/edit/{}/CHANGELOG.md",
        owner, repo, branch
    )
}

/// Build a validated [ReleaseInput] from flags, prompting for anything missing.
///
/// Every field supplied by flags is checked first and all of their problems
/// are reported together, before any prompt is shown. The release listing is
/// only queried when the versions are asked for interactively.
pub fn collect_input<R: BufRead, W: Write, L: ReleaseListing>(
    args: &ReleaseWorkflowArgs,
    prompter: &mut Prompter<R, W>,
    listing: L,
    owner: &str,
) -> Result<ReleaseInput> {
    let mut builder = ReleaseInputBuilder::new();
    let mut violations = Vec::new();

    let provider_from_flags = args.ga || args.beta;
    if provider_from_flags {
        if let Err(e) = builder.set_provider_from_flags(args.ga, args.beta) {
            violations.push(e);
        }
    }

    let versions_from_flags =
        args.release_version.is_some() || args.prev_release_version.is_some();
    if versions_from_flags {
        if let Err(errs) = builder.set_release_versions_reporting_all(
            args.release_version.as_deref().unwrap_or(""),
            args.prev_release_version.as_deref().unwrap_or(""),
        ) {
            violations.extend(errs);
        }
    }

    let commit_flag = args.commit_sha.as_deref().filter(|c| !c.is_empty());
    if let Some(commit) = commit_flag {
        if let Err(e) = builder.set_commit(commit) {
            violations.push(e);
        }
    }

    if !violations.is_empty() {
        return Err(ValidationErrors(violations).into());
    }

    if !provider_from_flags {
        prompter.ask_provider(&mut builder)?;
    }

    if !versions_from_flags {
        let repo_name = crate::domain::repo_identifier_for(builder.provider())?;
        let mut query = ReleaseQuery::new(listing, owner, repo_name);
        let latest = query.latest_version()?;
        let suggested = next_minor_version(&latest)?;
        prompter.ask_release_versions(&mut builder, repo_name, &latest, &suggested)?;
    }

    if commit_flag.is_none() {
        prompter.ask_commit(&mut builder)?;
    }

    Ok(builder.build()?)
}

/// Main release workflow
///
/// 1. Cut and push the release branch in the provider checkout
/// 2. Generate the changelog between the last release and the release commit
///
/// Stops at the first failing command; nothing that already ran is undone.
pub fn run_release_workflow<R: CommandRunner>(
    input: &ReleaseInput,
    config: &Config,
    runner: &R,
) -> Result<WorkflowResult> {
    let dir = config.provider_directory(input.provider());
    let git = GitRelease::new(runner, dir, config.remote.as_str());

    let prepared = git.prepare_release_branch(input)?;

    let changelog = ChangelogRun::for_release(config, input, &prepared.last_release_commit)
        .generate(runner)?;

    let changelog_url =
        changelog_edit_url(&config.remote_owner, input.repo_name(), &prepared.branch_name);
    info!("release workflow for {} finished", input.release_version());

    Ok(WorkflowResult {
        branch_name: prepared.branch_name,
        last_release_commit: prepared.last_release_commit,
        changelog,
        changelog_url,
    })
}
