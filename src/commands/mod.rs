//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `repo-roots`
//! command-line tool. Each subcommand is defined in its own file to keep the
//! logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the [`Session`]
//!   and performs the command's logic.
//!
//! The [`Session`] is built once per process from the settings file and the
//! environment, and carries the resolved roots to every command.

pub mod completions;
pub mod get;
pub mod import;
pub mod list;
pub mod look;
pub mod root;
pub mod which;

use std::path::Path;

use anyhow::Result;

use repo_roots::config::Settings;
use repo_roots::error::Error;
use repo_roots::matcher;
use repo_roots::output::{OutputConfig, Status};
use repo_roots::roots::Roots;
use repo_roots::store::{self, LocalRepository};
use repo_roots::suggestions;
use repo_roots::sync::SyncOutcome;

/// Settings, roots and output preferences shared by every command.
pub struct Session {
    pub settings: Settings,
    pub roots: Roots,
    pub output: OutputConfig,
}

impl Session {
    /// Load settings from `config` (or the default location) and resolve the roots.
    pub fn load(config: Option<&Path>, output: OutputConfig) -> Result<Self> {
        let settings = Settings::load(config)?;
        let roots = settings.roots()?;
        Ok(Self {
            settings,
            roots,
            output,
        })
    }

    /// Every local repository, in root order.
    pub fn repositories(&self) -> Vec<LocalRepository> {
        store::discover(&self.roots).collect()
    }

    /// The single repository a query names exactly.
    pub fn locate(&self, query: &str) -> Result<LocalRepository> {
        let repos = self.repositories();
        let names: Vec<String> = repos.iter().map(|repo| repo.name().to_string()).collect();
        matcher::resolve_single(repos, query).map_err(|err| match err {
            Error::NotFound { query } => {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                suggestions::no_repository_found(&query, &names)
            }
            other => suggestions::explain(other),
        })
    }

    /// Print the progress line for a finished sync.
    pub fn report(&self, remote: &str, outcome: &SyncOutcome) {
        match outcome {
            SyncOutcome::Cloned(path) => self
                .output
                .status(Status::Clone, format!("{} -> {}", remote, path.display())),
            SyncOutcome::Updated(path) => self.output.status(Status::Update, path.display()),
            SyncOutcome::AlreadyExists(path) => {
                self.output.status(Status::Exists, path.display())
            }
        }
    }
}
