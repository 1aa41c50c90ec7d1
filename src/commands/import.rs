//! # Import Command Implementation
//!
//! Clones every repository listed in a file, or on stdin when no file is
//! given. Each non-blank line not starting with `#` is one specifier, in
//! any form `get` accepts.
//!
//! Targets are processed one after another. A failing target is reported
//! and skipped; the command exits non-zero once the list is done if any
//! target failed.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use repo_roots::driver::DriverRegistry;
use repo_roots::output::Status;
use repo_roots::sync::{BatchReport, SyncOptions, Syncer};

use super::Session;

/// Clone every repository listed in a file or on stdin
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// File with one repository per line (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Update local clones that already exist
    #[arg(short, long)]
    pub update: bool,

    /// Clone over SSH instead of HTTPS
    #[arg(short = 'p', long)]
    pub ssh: bool,

    /// Fetch only the latest revision (git only)
    #[arg(long)]
    pub shallow: bool,
}

/// Execute the `import` command.
pub fn execute(args: ImportArgs, session: &Session) -> Result<()> {
    let specifiers = match &args.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_specifiers(BufReader::new(file))?
        }
        None => read_specifiers(io::stdin().lock())?,
    };

    let report = run(&args, session, &DriverRegistry::system(), &specifiers)?;
    if !report.is_success() {
        let failed: Vec<&str> = report
            .failures
            .iter()
            .map(|(spec, _)| spec.as_str())
            .collect();
        anyhow::bail!(
            "{} of {} repositories failed to import: {}",
            failed.len(),
            report.total(),
            failed.join(", ")
        );
    }
    Ok(())
}

fn run(
    args: &ImportArgs,
    session: &Session,
    drivers: &DriverRegistry,
    specifiers: &[String],
) -> Result<BatchReport> {
    let classifier = session.settings.classifier()?;
    let syncer = Syncer::new(
        &session.roots,
        drivers,
        &classifier,
        session.settings.layout,
    );
    let options = SyncOptions {
        update: args.update,
        shallow: args.shallow,
    };

    Ok(syncer.sync_batch(
        &session.settings.resolver(),
        specifiers,
        options,
        args.ssh || session.settings.ssh,
        |spec, result| match result {
            Ok(outcome) => session.report(spec, outcome),
            Err(err) => session
                .output
                .status(Status::Error, format!("{}: {}", spec, err)),
        },
    ))
}

/// Specifiers from a reader, skipping blank lines and `#` comments.
fn read_specifiers<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut specifiers = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        specifiers.push(line.to_string());
    }
    Ok(specifiers)
}
