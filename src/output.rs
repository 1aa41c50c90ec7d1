//! # Output Configuration
//!
//! Controls how progress lines look on the terminal.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! Progress lines are written to stderr as a right-aligned tag and a
//! message, in the style of `cargo`:
//!
//! ```text
//!      clone https://github.com/alice/foo -> /home/me/repos/github.com/alice/foo
//!     exists /home/me/repos/github.com/bob/bar
//! ```
//!
//! Command results (paths, listings) go to stdout and are never colored.

use std::env;
use std::fmt;

use console::{style, Term};

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether progress tags are colored.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// In auto mode, colors are disabled if `NO_COLOR` is set, `CLICOLOR=0`,
    /// `TERM=dumb`, or stderr is not a TTY (unless `CLICOLOR_FORCE=1`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        Term::stderr().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }

    /// Render a progress line without printing it.
    pub fn format_status(&self, tag: Status, message: impl fmt::Display) -> String {
        let label = format!("{:>10}", tag.label());
        if !self.use_color {
            return format!("{} {}", label, message);
        }
        let styled = match tag {
            Status::Clone | Status::Update => style(label).green().bold(),
            Status::Exists => style(label).blue().bold(),
            Status::Cd => style(label).cyan().bold(),
            Status::Error => style(label).red().bold(),
        }
        .force_styling(true);
        format!("{} {}", styled, message)
    }

    /// Print a progress line to stderr.
    pub fn status(&self, tag: Status, message: impl fmt::Display) {
        eprintln!("{}", self.format_status(tag, message));
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Tag of a progress line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Clone,
    Update,
    Exists,
    Error,
    Cd,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Clone => "clone",
            Status::Update => "update",
            Status::Exists => "exists",
            Status::Error => "error",
            Status::Cd => "cd",
        }
    }
}
