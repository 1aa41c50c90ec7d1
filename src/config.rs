//! # Settings
//!
//! This module loads the optional YAML settings file and resolves the list
//! of root directories.
//!
//! ## Settings File
//!
//! ```yaml
//! roots:
//!   - ~/src
//!   - /mnt/archive/repos
//! default_host: github.com
//! layout: host-owner-name
//! ssh: false
//! mercurial_hosts:
//!   - '^hg\.corp\.example$'
//! subversion_hosts: []
//! ```
//!
//! Every field is optional and unknown fields are rejected.
//!
//! ## Root Resolution
//!
//! Roots come from the first source that names any:
//!
//! 1. the `REPO_ROOTS` environment variable (platform path-list syntax),
//! 2. `roots:` in the settings file,
//! 3. `git config --path --get-all repo-roots.root`,
//! 4. `~/repos`.
//!
//! A leading `~` is expanded, relative roots are made absolute against the
//! current directory, and duplicates are dropped with the first occurrence
//! kept, so the primary root is always the first one named.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::defaults::{self, GIT_CONFIG_ROOT_KEY, ROOTS_ENV};
use crate::error::{Error, Result};
use crate::path::Layout;
use crate::remote::Resolver;
use crate::roots::Roots;
use crate::vcs::Classifier;

/// Contents of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Root directories, primary first
    pub roots: Vec<PathBuf>,
    /// Host for `owner/name` shorthands
    pub default_host: Option<String>,
    pub layout: Layout,
    /// Always rewrite remotes to SSH when cloning
    pub ssh: bool,
    /// Extra host patterns served by Mercurial
    pub mercurial_hosts: Vec<String>,
    /// Extra host patterns served by Subversion
    pub subversion_hosts: Vec<String>,
}

impl Settings {
    /// Parse settings from YAML. An empty document yields the defaults.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse settings from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read settings file {}: {}", path.display(), e),
            hint: None,
        })?;
        Self::parse(&content).map_err(|e| Error::Config {
            message: format!("invalid settings file {}: {}", path.display(), e),
            hint: Some("Allowed fields: roots, default_host, layout, ssh, mercurial_hosts, subversion_hosts".to_string()),
        })
    }

    /// Load settings from `explicit`, or from the default location.
    ///
    /// A missing default file means default settings; a missing file that
    /// was named explicitly is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::Config {
                    message: format!("settings file not found: {}", path.display()),
                    hint: Some(format!(
                        "Check the --config flag or the {} environment variable",
                        defaults::CONFIG_ENV
                    )),
                });
            }
            return Self::from_file(path);
        }

        match defaults::default_config_path() {
            Some(path) if path.is_file() => {
                debug!("loading settings from {}", path.display());
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Resolver honouring `default_host`.
    pub fn resolver(&self) -> Resolver {
        match &self.default_host {
            Some(host) => Resolver::new(host.as_str()),
            None => Resolver::default(),
        }
    }

    /// Classifier with the configured host patterns added to the built-ins.
    pub fn classifier(&self) -> Result<Classifier> {
        Classifier::with_patterns(
            self.mercurial_hosts.as_slice(),
            self.subversion_hosts.as_slice(),
        )
        .map_err(|e| Error::Config {
            message: format!("invalid host pattern: {}", e),
            hint: Some(
                "mercurial_hosts and subversion_hosts take regular expressions".to_string(),
            ),
        })
    }

    /// Resolve the root list from the environment, these settings, git
    /// config and the built-in default, in that order.
    pub fn roots(&self) -> Result<Roots> {
        let candidates = self.root_candidates(env::var_os(ROOTS_ENV), git_config_roots);
        let cwd = env::current_dir()?;
        Roots::new(candidates.iter().map(|root| absolutize(&expand_tilde(root), &cwd)))
    }

    /// Raw roots from the first source that names any.
    fn root_candidates<F>(&self, env_value: Option<OsString>, git_roots: F) -> Vec<PathBuf>
    where
        F: FnOnce() -> Vec<PathBuf>,
    {
        if let Some(value) = env_value {
            let from_env: Vec<PathBuf> = env::split_paths(&value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            if !from_env.is_empty() {
                debug!("roots from {}", ROOTS_ENV);
                return from_env;
            }
        }

        if !self.roots.is_empty() {
            debug!("roots from settings file");
            return self.roots.clone();
        }

        let from_git = git_roots();
        if !from_git.is_empty() {
            debug!("roots from git config {}", GIT_CONFIG_ROOT_KEY);
            return from_git;
        }

        vec![defaults::default_root()]
    }
}

/// Roots listed in git config. A missing `git` or unset key yields nothing.
fn git_config_roots() -> Vec<PathBuf> {
    let output = Command::new("git")
        .args(["config", "--path", "--get-all", GIT_CONFIG_ROOT_KEY])
        .output();
    match output {
        Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect(),
        Ok(_) => Vec::new(),
        Err(e) => {
            debug!("git config unavailable: {}", e);
            Vec::new()
        }
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
