//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts feeding the release input builder

use std::io::{self, BufRead, Write};

use crate::domain::ReleaseVersion;
use crate::error::{ReleaseError, Result};
use crate::input::ReleaseInputBuilder;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_input_summary, display_status, display_workflow_result,
};

/// Asks the release questions on a reader/writer pair.
///
/// Generic over the streams so tests can drive it with in-memory buffers;
/// [Prompter::stdio] is what the binary uses.
pub struct Prompter<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter reading stdin and writing stdout
    pub fn stdio() -> Self {
        Prompter::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Prompter { reader, writer }
    }

    /// Consume the prompter, returning the writer (used by tests to inspect output)
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{}", message)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Read one answer, trimmed and lowercased.
    ///
    /// # Returns
    /// * `Ok(String)` - The normalised answer (may be empty)
    /// * `Err` - If stdin is closed or unreadable
    pub fn read_response(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Err(ReleaseError::prompt(
                "input ended before an answer was given",
            ));
        }
        Ok(line.trim().to_lowercase())
    }

    /// Ask which provider the release is for (`ga` / `beta`).
    pub fn ask_provider(&mut self, builder: &mut ReleaseInputBuilder) -> Result<()> {
        self.say("What provider do you want to make a release for (ga/beta)?")?;
        let answer = self.read_response()?;
        builder.set_provider(&answer)?;
        Ok(())
    }

    /// Offer the next minor release, or ask for both versions explicitly.
    ///
    /// Answering `n` covers patch releases, major releases and backports.
    ///
    /// # Arguments
    /// * `repo_name` - Repository the release is for, shown in the prompt
    /// * `latest` - Latest published release tag
    /// * `suggested` - Next minor version after `latest`
    pub fn ask_release_versions(
        &mut self,
        builder: &mut ReleaseInputBuilder,
        repo_name: &str,
        latest: &str,
        suggested: &ReleaseVersion,
    ) -> Result<()> {
        self.say(&format!("The latest release of {} is {}", repo_name, latest))?;
        self.say(&format!(
            "Are you planning on making the next minor release, {}? (y/n)",
            suggested
        ))?;

        match self.read_response()?.as_str() {
            "y" | "yes" => {
                builder.set_release_versions(&suggested.to_string(), latest)?;
            }
            "n" | "no" => {
                self.say("Provide the previous release version as a semver string, e.g. v1.2.3:")?;
                let previous = self.read_response()?;

                self.say(
                    "Provide the new release version we are preparing as a semver string, e.g. v1.2.3:",
                )?;
                let new = self.read_response()?;

                builder.set_release_versions(&new, &previous)?;
            }
            other => {
                return Err(ReleaseError::prompt(format!(
                    "bad input '{}' where y/n was expected",
                    other
                )));
            }
        }
        Ok(())
    }

    /// Ask which commit the release branch is cut from.
    pub fn ask_commit(&mut self, builder: &mut ReleaseInputBuilder) -> Result<()> {
        self.say("What commit do you want to use to cut the release?")?;
        let answer = self.read_response()?;
        builder.set_commit(&answer)?;
        Ok(())
    }
}
