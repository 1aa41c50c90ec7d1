//! # List Command Implementation
//!
//! This module implements the `list` subcommand, which prints the local
//! repositories found under every root, in root order.
//!
//! ## Output Forms
//!
//! - default: the relative path, `host/owner/name`
//! - `--full-path`: the absolute path of the clone
//! - `--unique`: the shortest path suffix no other repository shares
//!
//! An optional query filters the list; `--exact` restricts it to
//! repositories whose trailing path segments equal the query.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

use repo_roots::matcher;
use repo_roots::store::LocalRepository;

use super::Session;

/// List local repositories
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list repositories whose path contains this query
    pub query: Option<String>,

    /// Match the query against whole trailing path segments only
    #[arg(short, long)]
    pub exact: bool,

    /// Print full paths instead of relative paths
    #[arg(short = 'p', long, conflicts_with = "unique")]
    pub full_path: bool,

    /// Print the shortest unique name of each repository
    #[arg(long)]
    pub unique: bool,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, session: &Session) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in render(&args, session) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn render(args: &ListArgs, session: &Session) -> Vec<String> {
    let mut repos = session.repositories();
    if let Some(query) = &args.query {
        repos = matcher::find_matches(repos, query, args.exact);
    }

    if args.unique {
        return matcher::unique_subpaths(&repos, &session.roots)
            .into_iter()
            .map(|(_, subpath)| subpath)
            .collect();
    }

    repos.iter().map(|repo| display(repo, args.full_path)).collect()
}

fn display(repo: &LocalRepository, full_path: bool) -> String {
    if full_path {
        repo.full_path.display().to_string()
    } else {
        repo.rel_path.clone()
    }
}
