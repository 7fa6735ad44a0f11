//! Pure formatting functions for UI output.
//!
//! The `format_*` functions build the text so it can be tested; the
//! `display_*` functions print it.

use console::style;

use crate::cli::orchestration::WorkflowResult;
use crate::input::ReleaseInput;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Summary of the collected release input, shown before any git command runs.
pub fn format_input_summary(input: &ReleaseInput) -> String {
    format!(
        "{}\n  Provider:         {} ({})\n  Previous release: {}\n  New release:      {}\n  Release commit:   {}",
        style("Release plan:").bold(),
        input.provider(),
        input.repo_name(),
        style(input.previous_version()).red(),
        style(input.release_version()).green(),
        input.commit()
    )
}

pub fn display_input_summary(input: &ReleaseInput) {
    println!("\n{}\n", format_input_summary(input));
}

/// Generated changelog framed for manual review.
pub fn format_changelog(changelog: &str) -> String {
    let rule = "-".repeat(60);
    format!(
        "{}\n{}\n{}\n{}",
        style("Generated changelog (review before publishing):").bold(),
        rule,
        changelog.trim_end(),
        rule
    )
}

/// Everything the workflow produced: branch, changelog and edit URL.
pub fn format_workflow_result(result: &WorkflowResult) -> String {
    format!(
        "{} Release branch {} was created and pushed\n\n{}\n\n{} Edit the changelog at: {}",
        style("✓").green(),
        result.branch_name,
        format_changelog(&result.changelog),
        style("→").yellow(),
        style(&result.changelog_url).cyan()
    )
}

pub fn display_workflow_result(result: &WorkflowResult) {
    println!("{}", format_workflow_result(result));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProviderVariant;

    #[test]
    fn test_format_input_summary() {
        let input =
            ReleaseInput::from_parts(Some(ProviderVariant::Beta), "abc123", "v4.11.0", "v4.10.0")
                .unwrap();
        let summary = format_input_summary(&input);

        assert!(summary.contains("terraform-provider-google-beta"));
        assert!(summary.contains("v4.10.0"));
        assert!(summary.contains("v4.11.0"));
        assert!(summary.contains("abc123"));
    }

    #[test]
    fn test_format_changelog_trims_trailing_whitespace() {
        let text = format_changelog("## 4.11.0\n\nFEATURES:\n\n\n");
        assert!(text.contains("## 4.11.0\n\nFEATURES:\n---"));
    }

    #[test]
    fn test_format_workflow_result() {
        let result = WorkflowResult {
            branch_name: "release-v4.11.0".to_string(),
            last_release_commit: "fff000".to_string(),
            changelog: "## 4.11.0 (Unreleased)\n".to_string(),
            changelog_url: "https://github.com/hashicorp/terraform-provider-google/edit/release-v4.11.0/CHANGELOG.md".to_string(),
        };
        let text = format_workflow_result(&result);

        let branch = text.find("Release branch release-v4.11.0 was created").unwrap();
        let changelog = text.find("## 4.11.0 (Unreleased)").unwrap();
        let url = text
            .find("https://github.com/hashicorp/terraform-provider-google/edit/release-v4.11.0/CHANGELOG.md")
            .unwrap();
        assert!(branch < changelog && changelog < url);
    }
}
