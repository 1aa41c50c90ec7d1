//! # Look Command Implementation
//!
//! Starts an interactive shell inside the repository matching a query and
//! exits with the shell's status once it ends.
//!
//! The shell is `$SHELL`, falling back to `/bin/sh`; on Windows it is
//! `%COMSPEC%`, falling back to `cmd.exe`.

use std::env;
use std::ffi::OsString;
use std::process::{self, Command};

use anyhow::{Context, Result};
use clap::Args;
use log::debug;

use repo_roots::output::Status;

use super::Session;

/// Open a shell inside the repository matching a query
#[derive(Args, Debug)]
pub struct LookArgs {
    /// Repository name, `owner/name` or `host/owner/name`
    pub query: String,
}

/// Execute the `look` command.
pub fn execute(args: LookArgs, session: &Session) -> Result<()> {
    let repo = session.locate(&args.query)?;
    let shell = shell_program();

    session
        .output
        .status(Status::Cd, repo.full_path.display());
    debug!("spawning {:?} in {}", shell, repo.full_path.display());

    let status = Command::new(&shell)
        .current_dir(&repo.full_path)
        .status()
        .with_context(|| format!("Failed to start shell {:?}", shell))?;

    if !status.success() {
        process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}

fn shell_program() -> OsString {
    if cfg!(windows) {
        non_empty_var("COMSPEC").unwrap_or_else(|| OsString::from("cmd.exe"))
    } else {
        non_empty_var("SHELL").unwrap_or_else(|| OsString::from("/bin/sh"))
    }
}

fn non_empty_var(name: &str) -> Option<OsString> {
    env::var_os(name).filter(|value| !value.is_empty())
}
