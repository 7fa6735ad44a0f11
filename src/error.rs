use std::fmt;

use thiserror::Error;

use crate::command::CommandResult;

/// A single problem with the values supplied for a release.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} '{value}' is not in the format v<major>.<minor>.<patch>, e.g. v4.12.0")]
    InvalidFormat { field: &'static str, value: String },

    #[error(
        "the version we're preparing ({new}) should be a more recent version number than the previous version ({previous})"
    )]
    NotNewer { new: String, previous: String },

    #[error("you need to provide a commit SHA to be the basis of the new release")]
    EmptyCommit,

    #[error("'{0}' is not a recognised provider, expected 'ga' or 'beta'")]
    UnrecognizedVariant(String),

    #[error("{}", ambiguous_variant_message(.ga, .beta))]
    AmbiguousVariant { ga: bool, beta: bool },

    #[error("no provider was chosen, expected GA or Beta")]
    MissingVariant,
}

fn ambiguous_variant_message(ga: &bool, beta: &bool) -> &'static str {
    if *ga && *beta {
        "you should provide only one of the --ga and --beta flags"
    } else {
        "you need to provide one of the --ga and --beta flags"
    }
}

/// Every violation found by one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<InputError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[InputError] {
        &self.0
    }

    pub fn contains(&self, error: &InputError) -> bool {
        self.0.contains(error)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "There were some problems with inputs to the command:")?;
        for error in &self.0 {
            writeln!(f, "\t> {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Every problem found while validating the loaded config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigErrors(pub Vec<String>);

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "There were some problems with the command's config:")?;
        for error in &self.0 {
            writeln!(f, "\t> {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

fn describe_command_failure(summary: &str, result: &CommandResult) -> String {
    result.describe_failure(summary)
}

/// Unified error type for tpg-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("{}", describe_command_failure(.summary, .result))]
    CommandFailed {
        summary: String,
        result: Box<CommandResult>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigErrors),

    #[error("Release listing error: {0}")]
    ReleaseListing(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in tpg-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a release listing error with context
    pub fn release_listing(msg: impl Into<String>) -> Self {
        ReleaseError::ReleaseListing(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        ReleaseError::Prompt(msg.into())
    }

    /// Wrap a failed command together with a summary of what was being attempted
    pub fn command_failed(summary: impl Into<String>, result: CommandResult) -> Self {
        ReleaseError::CommandFailed {
            summary: summary.into(),
            result: Box::new(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_input_error_is_transparent() {
        let err: ReleaseError = InputError::EmptyCommit.into();
        assert_eq!(err.to_string(), InputError::EmptyCommit.to_string());
    }

    #[test]
    fn test_ambiguous_variant_messages() {
        let both = InputError::AmbiguousVariant {
            ga: true,
            beta: true,
        };
        let neither = InputError::AmbiguousVariant {
            ga: false,
            beta: false,
        };
        assert!(both.to_string().contains("only one"));
        assert!(neither.to_string().contains("one of"));
        assert_ne!(both.to_string(), neither.to_string());
    }

    #[test]
    fn test_validation_errors_lists_every_problem() {
        let errs = ValidationErrors(vec![InputError::EmptyCommit, InputError::MissingVariant]);
        let msg = errs.to_string();
        assert!(msg.starts_with("There were some problems with inputs to the command:"));
        assert!(msg.contains(&format!("\t> {}", InputError::EmptyCommit)));
        assert!(msg.contains(&format!("\t> {}", InputError::MissingVariant)));
        assert_eq!(msg.lines().count(), 3);
    }

    #[test]
    fn test_config_errors_lists_every_problem() {
        let errs = ConfigErrors(vec!["remote is empty".to_string(), "googlePath".to_string()]);
        let msg = errs.to_string();
        assert!(msg.contains("config"));
        assert!(msg.contains("\t> remote is empty"));
        assert!(msg.contains("\t> googlePath"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::config("x"), "Configuration error"),
            (ReleaseError::release_listing("x"), "Release listing error"),
            (ReleaseError::prompt("x"), "Prompt error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
