//! Latest published release lookup
//!
//! [ReleaseQuery] asks a [ReleaseListing] for the newest release of one
//! repository and remembers the answer for the rest of its lifetime.

use std::time::Duration;

use log::debug;
use serde::Deserialize;

use crate::domain::version::{ReleaseVersion, PREVIOUS_VERSION_FIELD};
use crate::error::{ReleaseError, Result};

const GITHUB_API: &str = "https://api.github.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of published release tags
pub trait ReleaseListing {
    /// Tag name of the most recent release of `owner/repo`
    fn latest_release_tag(&self, owner: &str, repo: &str) -> Result<String>;
}

impl<L: ReleaseListing + ?Sized> ReleaseListing for &L {
    fn latest_release_tag(&self, owner: &str, repo: &str) -> Result<String> {
        (**self).latest_release_tag(owner, repo)
    }
}

#[derive(Debug, Deserialize)]
struct LatestReleaseResponse {
    tag_name: String,
}

/// Reads releases from the GitHub REST API without authentication
pub struct GitHubReleases {
    agent: ureq::Agent,
    base_url: String,
}

impl GitHubReleases {
    pub fn new() -> Self {
        Self::with_base_url(GITHUB_API)
    }

    /// Point the client at a different API root
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("tpg-release/", env!("CARGO_PKG_VERSION")))
            .build();

        GitHubReleases {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn latest_release_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}/releases/latest", self.base_url, owner, repo)
    }
}

impl Default for GitHubReleases {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseListing for GitHubReleases {
    fn latest_release_tag(&self, owner: &str, repo: &str) -> Result<String> {
        let url = self.latest_release_url(owner, repo);
        debug!("GET {}", url);

        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let status = response.status_text().to_string();
                let body = response.into_string().unwrap_or_default();
                return Err(ReleaseError::release_listing(format!(
                    "got a non-200 response: status '{} {}', body '{}'",
                    code, status, body
                )));
            }
            Err(e) => {
                return Err(ReleaseError::release_listing(format!(
                    "error getting latest release from github.com/{}/{}: {}",
                    owner, repo, e
                )));
            }
        };

        let release: LatestReleaseResponse = response.into_json().map_err(|e| {
            ReleaseError::release_listing(format!("error parsing response body: {}", e))
        })?;

        Ok(release.tag_name)
    }
}

/// Latest release of one repository, fetched at most once
pub struct ReleaseQuery<L: ReleaseListing> {
    listing: L,
    owner: String,
    repo: String,
    latest: Option<String>,
}

impl<L: ReleaseListing> ReleaseQuery<L> {
    pub fn new(listing: L, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        ReleaseQuery {
            listing,
            owner: owner.into(),
            repo: repo.into(),
            latest: None,
        }
    }

    /// Tag of the latest release; only the first successful call hits the listing
    pub fn latest_version(&mut self) -> Result<String> {
        if let Some(latest) = &self.latest {
            return Ok(latest.clone());
        }

        let latest = self.listing.latest_release_tag(&self.owner, &self.repo)?;
        debug!("latest release of {}/{} is {}", self.owner, self.repo, latest);
        self.latest = Some(latest.clone());
        Ok(latest)
    }
}

/// Suggest the release after `latest`, e.g. v4.12.3 -> v4.13.0
pub fn next_minor_version(latest: &str) -> Result<ReleaseVersion> {
    let version = ReleaseVersion::parse(PREVIOUS_VERSION_FIELD, latest)?;
    Ok(version.next_minor())
}
