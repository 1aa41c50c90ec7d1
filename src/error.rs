//! # Error Handling
//!
//! This module defines the centralized error type for `repo-roots`. It uses
//! `thiserror` to derive an `Error` enum whose variants mirror the failure
//! modes of resolving, discovering and syncing repositories.
//!
//! ## Key Components
//!
//! - **`Error`**: Every failure the library can report. Each variant carries
//!   the offending input (a specifier, a query, a candidate list, a path) so
//!   callers can render a precise message.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Unreadable directories met during discovery are not surfaced through this
//! type; the walk logs and skips them. `Filesystem` is used when a path that
//! the caller asked for explicitly cannot be handled.

use thiserror::Error;

/// Main error type for repo-roots operations
#[derive(Error, Debug)]
pub enum Error {
    /// The input string has no recognizable scheme/host/path structure.
    #[error("Invalid repository specifier '{specifier}': {reason}")]
    InvalidSpecifier { specifier: String, reason: String },

    /// A bare shorthand named fewer than two path segments.
    #[error("Ambiguous shorthand '{specifier}': expected <owner>/<name>")]
    AmbiguousShorthand { specifier: String },

    /// No VCS backend recognized the remote.
    #[error("Could not find version control system for {remote}")]
    UnknownVcs { remote: String },

    /// The matcher found no candidate.
    #[error("No repository found for '{query}'")]
    NotFound { query: String },

    /// The matcher found more than one candidate.
    #[error("More than one repository found for '{query}': {}", candidates.join(", "))]
    AmbiguousMatch {
        query: String,
        /// Full path-part sequences of every candidate, slash-joined
        candidates: Vec<String>,
    },

    /// The VCS driver reported a failed clone or update.
    #[error("{vcs} {command} failed for {target}: {message}")]
    DriverFailure {
        vcs: String,
        command: String,
        target: String,
        message: String,
    },

    /// A filesystem path could not be handled.
    #[error("Filesystem error at {path}: {message}")]
    Filesystem { path: String, message: String },

    /// Settings could not be loaded or are inconsistent.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A host pattern failed to compile, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
