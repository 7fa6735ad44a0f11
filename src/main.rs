use anyhow::Result;
use clap::Parser;
use log::debug;

use tpg_release::changelog;
use tpg_release::cli::{collect_input, run_release_workflow, ReleaseWorkflowArgs};
use tpg_release::command::ProcessRunner;
use tpg_release::config;
use tpg_release::release_version::GitHubReleases;
use tpg_release::ui::{self, Prompter};

#[derive(clap::Parser)]
#[command(
    name = "tpg-release",
    version,
    about = "Cut a Google provider release branch and generate its changelog"
)]
struct Args {
    #[arg(long, help = "Make a release for the GA provider")]
    ga: bool,

    #[arg(long, help = "Make a release for the Beta provider")]
    beta: bool,

    #[arg(long, help = "Commit SHA to cut the release branch from")]
    commit_sha: Option<String>,

    #[arg(long, help = "New release version, e.g. v4.11.0")]
    release_version: Option<String>,

    #[arg(long, help = "Previous release version, e.g. v4.10.0")]
    prev_release_version: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        long,
        default_value = "info",
        help = "Log level (error, warn, info, debug, trace)"
    )]
    log_level: String,
}

impl Args {
    fn workflow_args(&self) -> ReleaseWorkflowArgs {
        ReleaseWorkflowArgs {
            ga: self.ga,
            beta: self.beta,
            commit_sha: self.commit_sha.clone(),
            release_version: self.release_version.clone(),
            prev_release_version: self.prev_release_version.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .format_timestamp(None)
        .init();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    debug!(
        "using remote {} owned by {}",
        config.remote, config.remote_owner
    );

    if let Err(e) = changelog::ensure_changelog_generator() {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    let mut prompter = Prompter::stdio();
    let input = match collect_input(
        &args.workflow_args(),
        &mut prompter,
        GitHubReleases::new(),
        &config.remote_owner,
    ) {
        Ok(input) => input,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    ui::display_input_summary(&input);

    let mut runner = ProcessRunner::new();
    if let Some(token) = &config.github_token {
        runner = runner.with_env("GITHUB_TOKEN", token.as_str());
    }

    ui::display_status(&format!(
        "Preparing release branch in {}",
        config.provider_directory(input.provider()).display()
    ));
    let result = match run_release_workflow(&input, &config, &runner) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    ui::display_workflow_result(&result);

    Ok(())
}
