//! Configuration module

use std::path::PathBuf;
use std::time::Duration;

use crate::constants;

/// Runtime configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Changeset URL template (`{}` = changeset id)
    pub changeset_url: String,

    /// Classifier artifact location
    pub model_path: PathBuf,

    /// Plain-text version file location
    pub version_path: PathBuf,

    /// HTTP timeout; `None` keeps the client default
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            changeset_url: constants::get_changeset_url(),
            model_path: constants::get_model_path(),
            version_path: constants::get_version_path(),
            timeout: constants::get_http_timeout().map(Duration::from_secs),
        }
    }

    pub fn with_changeset_url(mut self, url: impl Into<String>) -> Self {
        self.changeset_url = url.into();
        self
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_version_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.version_path = path.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        let package = PathBuf::from(constants::PACKAGE_DIR);
        Self {
            changeset_url: constants::DEFAULT_CHANGESET_URL.to_string(),
            model_path: package.join(constants::MODEL_RELATIVE_PATH),
            version_path: package.join(constants::VERSION_RELATIVE_PATH),
            timeout: None,
        }
    }
}
