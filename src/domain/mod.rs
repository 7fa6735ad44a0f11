//! Domain logic - pure release rules independent of git and the terminal

pub mod provider;
pub mod version;

pub use provider::{repo_identifier_for, ProviderVariant};
pub use version::{check_progression, ReleaseVersion};
