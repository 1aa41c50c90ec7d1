//! # Which Command Implementation
//!
//! Prints the full path of the one repository whose trailing path segments
//! equal the query. Meant for shell helpers such as
//! `cd "$(repo-roots which foo)"`.

use anyhow::Result;
use clap::Args;

use super::Session;

/// Print the full path of the repository matching a query
#[derive(Args, Debug)]
pub struct WhichArgs {
    /// Repository name, `owner/name` or `host/owner/name`
    pub query: String,
}

/// Execute the `which` command.
pub fn execute(args: WhichArgs, session: &Session) -> Result<()> {
    let repo = session.locate(&args.query)?;
    println!("{}", repo.full_path.display());
    Ok(())
}
