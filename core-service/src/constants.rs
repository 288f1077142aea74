//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To point gabbar at another changeset host, only edit this file
//! (or set `GABBAR_CHANGESET_URL`).

use std::path::PathBuf;

/// Default changeset URL template
///
/// `{}` is replaced by the changeset identifier.
pub const DEFAULT_CHANGESET_URL: &str =
    "https://s3.amazonaws.com/mapbox/real-changesets/production/{}.json";

/// Classifier artifact, relative to the crate directory
pub const MODEL_RELATIVE_PATH: &str = "models/gabbar.json";

/// Version file, relative to the crate directory
pub const VERSION_RELATIVE_PATH: &str = "VERSION";

/// Directory the artifact and version file are resolved against
pub const PACKAGE_DIR: &str = env!("CARGO_MANIFEST_DIR");

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "gabbar";

// Environment variable names
pub const ENV_CHANGESET_URL: &str = "GABBAR_CHANGESET_URL";
pub const ENV_MODEL_PATH: &str = "GABBAR_MODEL_PATH";
pub const ENV_VERSION_PATH: &str = "GABBAR_VERSION_PATH";
pub const ENV_HTTP_TIMEOUT: &str = "GABBAR_HTTP_TIMEOUT_SECS";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get changeset URL template from environment or use default
pub fn get_changeset_url() -> String {
    std::env::var(ENV_CHANGESET_URL)
        .unwrap_or_else(|_| DEFAULT_CHANGESET_URL.to_string())
}

/// Get classifier artifact path from environment or use default
pub fn get_model_path() -> PathBuf {
    std::env::var(ENV_MODEL_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(PACKAGE_DIR).join(MODEL_RELATIVE_PATH))
}

/// Get version file path from environment or use default
pub fn get_version_path() -> PathBuf {
    std::env::var(ENV_VERSION_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(PACKAGE_DIR).join(VERSION_RELATIVE_PATH))
}

/// Get HTTP timeout (seconds) from environment, if any
///
/// Unset or unparsable means the HTTP client's own default applies.
pub fn get_http_timeout() -> Option<u64> {
    std::env::var(ENV_HTTP_TIMEOUT)
        .ok()
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_path_is_under_package() {
        let path = PathBuf::from(PACKAGE_DIR).join(MODEL_RELATIVE_PATH);
        assert!(path.ends_with("models/gabbar.json"));
    }

    #[test]
    fn test_default_url_has_placeholder() {
        assert_eq!(DEFAULT_CHANGESET_URL.matches("{}").count(), 1);
    }
}
