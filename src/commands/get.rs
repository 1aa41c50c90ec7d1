//! # Get Command Implementation
//!
//! This module implements the `get` subcommand, which clones a remote
//! repository into `<primary root>/<host>/<owner>/<name>`.
//!
//! ## Functionality
//!
//! - **Specifiers**: URLs, `user@host:owner/name`, `host/owner/name` and
//!   `owner/name` shorthands (which target the default host)
//! - **Update**: With `--update`, an existing clone is updated in place
//! - **SSH**: With `--ssh` (or `ssh: true` in the settings file), HTTPS
//!   remotes are cloned over SSH instead
//!
//! Remotes that no VCS backend recognizes are rejected before anything is
//! created on disk.

use anyhow::Result;
use clap::Args;

use repo_roots::driver::DriverRegistry;
use repo_roots::suggestions;
use repo_roots::sync::{SyncOptions, SyncOutcome, Syncer};

use super::Session;

/// Clone a remote repository into the primary root
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Repository URL, `user@host:owner/name`, `host/owner/name` or `owner/name`
    pub repository: String,

    /// Update the local clone if it already exists
    #[arg(short, long)]
    pub update: bool,

    /// Clone over SSH instead of HTTPS
    #[arg(short = 'p', long)]
    pub ssh: bool,

    /// Fetch only the latest revision (git only)
    #[arg(long)]
    pub shallow: bool,
}

/// Execute the `get` command.
pub fn execute(args: GetArgs, session: &Session) -> Result<()> {
    run(&args, session, &DriverRegistry::system()).map(|_| ())
}

fn run(args: &GetArgs, session: &Session, drivers: &DriverRegistry) -> Result<SyncOutcome> {
    let classifier = session.settings.classifier()?;
    let syncer = Syncer::new(
        &session.roots,
        drivers,
        &classifier,
        session.settings.layout,
    );

    let identity = syncer
        .identity_for(
            &session.settings.resolver(),
            &args.repository,
            args.ssh || session.settings.ssh,
        )
        .map_err(suggestions::explain)?;

    let options = SyncOptions {
        update: args.update,
        shallow: args.shallow,
    };
    let outcome = syncer.sync(&identity, options).map_err(suggestions::explain)?;
    session.report(&identity.url(), &outcome);
    Ok(outcome)
}
