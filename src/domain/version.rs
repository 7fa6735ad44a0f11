use std::cmp::Ordering;
use std::fmt;

use regex::Regex;

use crate::error::InputError;

/// Field names used when reporting a badly formatted version.
pub const RELEASE_VERSION_FIELD: &str = "release_version";
pub const PREVIOUS_VERSION_FIELD: &str = "previous_release_version";

const RELEASE_VERSION_PATTERN: &str =
    r"^v(0|[1-9]\d{0,5})\.(0|[1-9]\d{0,5})\.(0|[1-9]\d{0,5})$";

fn is_release_version_shape(tag: &str) -> bool {
    Regex::new(RELEASE_VERSION_PATTERN)
        .map(|re| re.is_match(tag))
        .unwrap_or(false)
}

/// A release version tag of the form `v<major>.<minor>.<patch>`
///
/// Ordering is numeric per component, so `v0.0.10` sorts after `v0.0.9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion {
    inner: semver::Version,
}

impl ReleaseVersion {
    /// Create a version from its components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        ReleaseVersion {
            inner: semver::Version::new(major, minor, patch),
        }
    }

    /// Parse a `v`-prefixed version tag, naming `field` in the error.
    ///
    /// Pre-release and build metadata are rejected, as are versions
    /// without the `v` prefix.
    pub fn parse(field: &'static str, tag: &str) -> Result<Self, InputError> {
        let invalid = || InputError::InvalidFormat {
            field,
            value: tag.to_string(),
        };

        if !is_release_version_shape(tag) {
            return Err(invalid());
        }

        let inner = semver::Version::parse(&tag[1..]).map_err(|_| invalid())?;
        Ok(ReleaseVersion { inner })
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    /// The next minor release, e.g. v4.12.3 -> v4.13.0
    pub fn next_minor(&self) -> Self {
        ReleaseVersion::new(self.major(), self.minor() + 1, 0)
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.inner)
    }
}

/// Compare two version strings after validating both.
pub fn compare(a: &str, b: &str) -> Result<Ordering, InputError> {
    let a = ReleaseVersion::parse(RELEASE_VERSION_FIELD, a)?;
    let b = ReleaseVersion::parse(PREVIOUS_VERSION_FIELD, b)?;
    Ok(a.cmp(&b))
}

/// Validate a release version progression.
///
/// Both strings must be well formed and `new` must be strictly greater than
/// `previous`. Returns the parsed pair `(new, previous)`.
pub fn check_progression(
    new: &str,
    previous: &str,
) -> Result<(ReleaseVersion, ReleaseVersion), InputError> {
    let new_version = ReleaseVersion::parse(RELEASE_VERSION_FIELD, new)?;
    let previous_version = ReleaseVersion::parse(PREVIOUS_VERSION_FIELD, previous)?;

    if new_version <= previous_version {
        return Err(InputError::NotNewer {
            new: new.to_string(),
            previous: previous.to_string(),
        });
    }

    Ok((new_version, previous_version))
}
