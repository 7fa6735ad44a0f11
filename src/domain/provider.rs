use std::fmt;

use crate::error::InputError;

pub const GA_REPO_NAME: &str = "terraform-provider-google";
pub const BETA_REPO_NAME: &str = "terraform-provider-google-beta";

/// Which provider repository a release is being cut for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderVariant {
    Ga,
    Beta,
}

impl ProviderVariant {
    /// Parse a case-insensitive `ga` / `beta` token
    pub fn parse(token: &str) -> Result<Self, InputError> {
        match token.trim().to_ascii_lowercase().as_str() {
            "ga" => Ok(ProviderVariant::Ga),
            "beta" => Ok(ProviderVariant::Beta),
            _ => Err(InputError::UnrecognizedVariant(token.to_string())),
        }
    }

    /// Resolve the mutually exclusive `--ga` / `--beta` flag pair
    pub fn from_flags(ga: bool, beta: bool) -> Result<Self, InputError> {
        match (ga, beta) {
            (true, false) => Ok(ProviderVariant::Ga),
            (false, true) => Ok(ProviderVariant::Beta),
            _ => Err(InputError::AmbiguousVariant { ga, beta }),
        }
    }

    /// Canonical repository name for this provider
    pub fn repo_name(&self) -> &'static str {
        match self {
            ProviderVariant::Ga => GA_REPO_NAME,
            ProviderVariant::Beta => BETA_REPO_NAME,
        }
    }
}

impl fmt::Display for ProviderVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderVariant::Ga => write!(f, "GA"),
            ProviderVariant::Beta => write!(f, "Beta"),
        }
    }
}

/// Repository name for a possibly-unset provider choice
pub fn repo_identifier_for(variant: Option<ProviderVariant>) -> Result<&'static str, InputError> {
    variant
        .map(|v| v.repo_name())
        .ok_or(InputError::MissingVariant)
}
