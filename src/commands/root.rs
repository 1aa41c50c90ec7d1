//! # Root Command Implementation
//!
//! Prints the primary root, or every root in order with `--all`.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

use super::Session;

/// Print the configured root directories
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Print every root, primary first
    #[arg(long)]
    pub all: bool,
}

/// Execute the `root` command.
pub fn execute(args: RootArgs, session: &Session) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.all {
        for root in session.roots.iter() {
            writeln!(out, "{}", root.display())?;
        }
    } else {
        writeln!(out, "{}", session.roots.primary().display())?;
    }
    Ok(())
}
