//! Release input collection and validation
//!
//! A [`ReleaseInput`] can only be obtained through [`ReleaseInputBuilder::build`]
//! or [`ReleaseInput::from_parts`], both of which run the full cross-field
//! validation and report every violation at once.

use crate::domain::version::{
    check_progression, ReleaseVersion, PREVIOUS_VERSION_FIELD, RELEASE_VERSION_FIELD,
};
use crate::domain::ProviderVariant;
use crate::error::{InputError, ValidationErrors};

/// A validated release request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInput {
    provider: ProviderVariant,
    commit: String,
    release_version: ReleaseVersion,
    previous_version: ReleaseVersion,
}

impl ReleaseInput {
    /// Validate every field at once and construct the input.
    pub fn from_parts(
        provider: Option<ProviderVariant>,
        commit: &str,
        release_version: &str,
        previous_version: &str,
    ) -> Result<Self, ValidationErrors> {
        let mut violations = Vec::new();

        if provider.is_none() {
            violations.push(InputError::MissingVariant);
        }

        let commit = commit.trim();
        if commit.is_empty() {
            violations.push(InputError::EmptyCommit);
        }

        let versions = match check_versions(release_version, previous_version) {
            Ok(versions) => Some(versions),
            Err(errs) => {
                violations.extend(errs);
                None
            }
        };

        match (provider, versions) {
            (Some(provider), Some((release_version, previous_version)))
                if violations.is_empty() =>
            {
                Ok(ReleaseInput {
                    provider,
                    commit: commit.to_string(),
                    release_version,
                    previous_version,
                })
            }
            _ => Err(ValidationErrors(violations)),
        }
    }

    pub fn provider(&self) -> ProviderVariant {
        self.provider
    }

    pub fn repo_name(&self) -> &'static str {
        self.provider.repo_name()
    }

    /// The commit the release branch is cut from
    pub fn commit(&self) -> &str {
        &self.commit
    }

    pub fn release_version(&self) -> &ReleaseVersion {
        &self.release_version
    }

    pub fn previous_version(&self) -> &ReleaseVersion {
        &self.previous_version
    }
}

/// Check a version pair, reporting both badly formatted versions before
/// comparing them.
fn check_versions(
    new: &str,
    previous: &str,
) -> Result<(ReleaseVersion, ReleaseVersion), Vec<InputError>> {
    let parsed_new = ReleaseVersion::parse(RELEASE_VERSION_FIELD, new);
    let parsed_previous = ReleaseVersion::parse(PREVIOUS_VERSION_FIELD, previous);
    match (parsed_new, parsed_previous) {
        (Ok(n), Ok(p)) if n > p => Ok((n, p)),
        (Ok(_), Ok(_)) => Err(vec![InputError::NotNewer {
            new: new.to_string(),
            previous: previous.to_string(),
        }]),
        (n, p) => Err(n.err().into_iter().chain(p.err()).collect()),
    }
}

/// Incrementally collects release input from flags or prompts.
///
/// Each setter validates its own field and leaves the builder untouched on
/// error, so a rejected answer can simply be asked again.
#[derive(Debug, Clone, Default)]
pub struct ReleaseInputBuilder {
    provider: Option<ProviderVariant>,
    commit: Option<String>,
    versions: Option<(String, String)>,
}

impl ReleaseInputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_commit(&mut self, commit: &str) -> Result<&mut Self, InputError> {
        let commit = commit.trim();
        if commit.is_empty() {
            return Err(InputError::EmptyCommit);
        }
        self.commit = Some(commit.to_string());
        Ok(self)
    }

    /// Set the provider from a `ga` / `beta` token (any case)
    pub fn set_provider(&mut self, token: &str) -> Result<&mut Self, InputError> {
        self.provider = Some(ProviderVariant::parse(token)?);
        Ok(self)
    }

    /// Set the provider from the `--ga` / `--beta` flag pair
    pub fn set_provider_from_flags(
        &mut self,
        ga: bool,
        beta: bool,
    ) -> Result<&mut Self, InputError> {
        self.provider = Some(ProviderVariant::from_flags(ga, beta)?);
        Ok(self)
    }

    pub fn set_release_versions(
        &mut self,
        new: &str,
        previous: &str,
    ) -> Result<&mut Self, InputError> {
        check_progression(new, previous)?;
        self.versions = Some((new.to_string(), previous.to_string()));
        Ok(self)
    }

    /// Set both versions, reporting every problem with the pair.
    ///
    /// Used for flag values, where both versions arrive together and the
    /// user should see all of their mistakes at once.
    pub fn set_release_versions_reporting_all(
        &mut self,
        new: &str,
        previous: &str,
    ) -> Result<&mut Self, Vec<InputError>> {
        check_versions(new, previous)?;
        self.versions = Some((new.to_string(), previous.to_string()));
        Ok(self)
    }

    pub fn provider(&self) -> Option<ProviderVariant> {
        self.provider
    }

    /// Re-check every field and report all violations found
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.build().map(|_| ())
    }

    pub fn build(&self) -> Result<ReleaseInput, ValidationErrors> {
        let (new, previous) = match &self.versions {
            Some((new, previous)) => (new.as_str(), previous.as_str()),
            None => ("", ""),
        };
        ReleaseInput::from_parts(
            self.provider,
            self.commit.as_deref().unwrap_or(""),
            new,
            previous,
        )
    }
}
