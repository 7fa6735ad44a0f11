use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::domain::ProviderVariant;
use crate::error::{ConfigErrors, ReleaseError, Result};

/// File name of the config file in the user's home directory
pub const CONFIG_FILE_NAME: &str = ".tpg-cli-config.json";

/// Upstream owner used when the config does not name one
pub const DEFAULT_REMOTE_OWNER: &str = "hashicorp";

/// Represents the complete configuration for tpg-release.
///
/// Holds the local checkouts of the provider repositories, the git remote to
/// push release branches to, and the owner of the upstream repositories.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Checkout containing the `.ci` changelog templates
    #[serde(default)]
    pub magic_modules_path: PathBuf,

    #[serde(default)]
    pub google_path: PathBuf,

    #[serde(default)]
    pub google_beta_path: PathBuf,

    /// Git remote release branches are pulled from and pushed to
    #[serde(default)]
    pub remote: String,

    /// Owner of the upstream repositories; a fork's owner can be set here
    #[serde(default)]
    pub remote_owner: String,

    /// Personal access token with no permissions, handed to changelog-gen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
}

impl Config {
    /// Parse config JSON, apply defaults and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Config = serde_json::from_str(json)?;
        config.apply_defaults();
        config.validate()?;
        Ok(config)
    }

    fn apply_defaults(&mut self) {
        if self.remote_owner.is_empty() {
            debug!("remoteOwner not set, using {}", DEFAULT_REMOTE_OWNER);
            self.remote_owner = DEFAULT_REMOTE_OWNER.to_string();
        }
    }

    /// Check every field and report all problems at once
    pub fn validate(&self) -> std::result::Result<(), ConfigErrors> {
        let mut errs = Vec::new();

        for (name, path) in [
            ("magicModulesPath", &self.magic_modules_path),
            ("googlePath", &self.google_path),
            ("googleBetaPath", &self.google_beta_path),
        ] {
            if path.as_os_str().is_empty() {
                errs.push(format!("error in loaded config: {} is empty/missing", name));
            } else if let Err(e) = fs::read_dir(path) {
                errs.push(format!(
                    "error opening {} path {}: {}",
                    name,
                    path.display(),
                    e
                ));
            }
        }

        if self.remote.is_empty() {
            errs.push("error in loaded config: remote is empty/missing".to_string());
        }

        if self.remote_owner.is_empty() {
            errs.push("error in loaded config: remote repo owner is empty/missing".to_string());
        }

        if errs.is_empty() {
            Ok(())
        } else {
            Err(ConfigErrors(errs))
        }
    }

    /// Local checkout of the given provider's repository
    pub fn provider_directory(&self, provider: ProviderVariant) -> &Path {
        match provider {
            ProviderVariant::Ga => &self.google_path,
            ProviderVariant::Beta => &self.google_beta_path,
        }
    }

    /// Path of the changelog template inside the magic-modules checkout
    pub fn changelog_template(&self) -> PathBuf {
        self.magic_modules_path.join(".ci").join("changelog.tmpl")
    }

    /// Path of the release note template inside the magic-modules checkout
    pub fn release_note_template(&self) -> PathBuf {
        self.magic_modules_path.join(".ci").join("release-note.tmpl")
    }
}

/// Default location of the config file, `~/.tpg-cli-config.json`
pub fn default_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILE_NAME))
        .ok_or_else(|| {
            ReleaseError::config("cannot find the home directory, please make sure HOME is set")
        })
}

/// Loads and validates configuration.
///
/// Reads the file at `config_path` when given, otherwise
/// `~/.tpg-cli-config.json`. A missing file is an error: every field is
/// required.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => default_config_path()?,
    };
    debug!("loading config from {}", path.display());

    let contents = fs::read_to_string(&path).map_err(|e| {
        warn!("could not read {}", path.display());
        ReleaseError::config(format!("error opening {}: {}", path.display(), e))
    })?;

    Config::from_json(&contents).map_err(|e| match e {
        ReleaseError::Json(e) => {
            ReleaseError::config(format!("error parsing config file {}: {}", path.display(), e))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config(dir: &Path) -> Config {
        Config {
            magic_modules_path: dir.to_path_buf(),
            google_path: dir.join("ga"),
            google_beta_path: dir.join("beta"),
            remote: "origin".to_string(),
            remote_owner: "hashicorp".to_string(),
            github_token: None,
        }
    }

    fn make_dirs(dir: &Path) {
        fs::create_dir_all(dir.join("ga")).unwrap();
        fs::create_dir_all(dir.join("beta")).unwrap();
    }

    #[test]
    fn test_validate_all_fields_set() {
        let tmp = tempfile::tempdir().unwrap();
        make_dirs(tmp.path());
        assert!(valid_config(tmp.path()).validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let config = Config {
            google_path: PathBuf::from("/User/doesntexist/path/to/nowhere"),
            ..Config::default()
        };

        let errs = config.validate().unwrap_err();
        assert_eq!(errs.0.len(), 5);
        assert!(errs.0[0].contains("magicModulesPath is empty"));
        assert!(errs.0[1].contains("error opening googlePath"));
        assert!(errs.0[2].contains("googleBetaPath is empty"));
        assert!(errs.0[3].contains("remote is empty"));
        assert!(errs.0[4].contains("owner is empty"));
    }

    #[test]
    fn test_provider_directory_mapping() {
        let config = valid_config(Path::new("/work"));
        assert_eq!(
            config.provider_directory(ProviderVariant::Ga),
            Path::new("/work/ga")
        );
        assert_eq!(
            config.provider_directory(ProviderVariant::Beta),
            Path::new("/work/beta")
        );
    }

    #[test]
    fn test_template_paths() {
        let config = valid_config(Path::new("/mm"));
        assert_eq!(
            config.changelog_template(),
            PathBuf::from("/mm/.ci/changelog.tmpl")
        );
        assert_eq!(
            config.release_note_template(),
            PathBuf::from("/mm/.ci/release-note.tmpl")
        );
    }

    #[test]
    fn test_from_json_defaults_remote_owner() {
        let tmp = tempfile::tempdir().unwrap();
        make_dirs(tmp.path());
        let json = serde_json::json!({
            "magicModulesPath": tmp.path(),
            "googlePath": tmp.path().join("ga"),
            "googleBetaPath": tmp.path().join("beta"),
            "remote": "origin",
        })
        .to_string();

        let config = Config::from_json(&json).unwrap();
        assert_eq!(config.remote_owner, DEFAULT_REMOTE_OWNER);
        assert_eq!(config.github_token, None);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            Config::from_json("{ not json"),
            Err(ReleaseError::Json(_))
        ));
    }
}
