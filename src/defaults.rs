//! Default values for repo-roots configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Host that `owner/name` shorthands resolve to.
pub const DEFAULT_HOST: &str = "github.com";

/// Environment variable holding the root list (platform path-list syntax).
pub const ROOTS_ENV: &str = "REPO_ROOTS";

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "REPO_ROOTS_CONFIG";

/// `git config` key consulted for roots when neither the environment nor the
/// settings file name any.
pub const GIT_CONFIG_ROOT_KEY: &str = "repo-roots.root";

/// Returns the default root directory, `~/repos`.
///
/// Falls back to `repos` in the current directory if the home directory
/// cannot be determined.
pub fn default_root() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("repos"))
        .unwrap_or_else(|| PathBuf::from("repos"))
}

/// Returns the default settings file location.
///
/// Uses the platform-appropriate configuration directory:
/// - Linux: `~/.config/repo-roots/config.yaml`
/// - macOS: `~/Library/Application Support/repo-roots/config.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\repo-roots\config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("repo-roots").join("config.yaml"))
}
