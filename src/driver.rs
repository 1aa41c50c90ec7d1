//! # VCS Drivers
//!
//! The capability the sync step needs from a version control system:
//! clone a remote into a fresh directory, and update an existing working
//! copy. The library depends only on the [`VcsDriver`] trait; the default
//! implementations shell out to `git`, `hg` and `svn`, which automatically
//! picks up SSH keys, credential helpers and any other authentication the
//! user has configured for those tools.
//!
//! [`DriverRegistry`] maps every known [`VcsKind`] to a driver. It is built
//! once at the edge of the program and handed to the sync orchestrator, so
//! tests can swap in recording drivers without touching real executables.

use std::fs;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};
use crate::vcs::VcsKind;

/// Trait for VCS operations - allows mocking in tests
pub trait VcsDriver: Send + Sync {
    /// Clone `url` into `dest`, which must not exist yet.
    ///
    /// `shallow` is advisory; backends without shallow clones ignore it.
    fn clone_repository(&self, url: &str, dest: &Path, shallow: bool) -> Result<()>;

    /// Bring the working copy at `path` up to date with its remote.
    fn update(&self, path: &Path) -> Result<()>;
}

/// Drives the `git` executable.
pub struct GitDriver;

impl VcsDriver for GitDriver {
    fn clone_repository(&self, url: &str, dest: &Path, shallow: bool) -> Result<()> {
        prepare_parent(dest)?;
        let mut args = vec!["clone", "--quiet"];
        if shallow {
            args.push("--depth=1");
        }
        run(VcsKind::Git, "clone", url, &args, Some(url), Some(dest), None)
    }

    fn update(&self, path: &Path) -> Result<()> {
        run(
            VcsKind::Git,
            "remote update",
            &path.display().to_string(),
            &["remote", "update"],
            None,
            None,
            Some(path),
        )
    }
}

/// Drives the `hg` executable.
pub struct MercurialDriver;

impl VcsDriver for MercurialDriver {
    fn clone_repository(&self, url: &str, dest: &Path, _shallow: bool) -> Result<()> {
        prepare_parent(dest)?;
        run(
            VcsKind::Mercurial,
            "clone",
            url,
            &["clone", "--quiet"],
            Some(url),
            Some(dest),
            None,
        )
    }

    fn update(&self, path: &Path) -> Result<()> {
        run(
            VcsKind::Mercurial,
            "pull",
            &path.display().to_string(),
            &["pull", "--update", "--quiet"],
            None,
            None,
            Some(path),
        )
    }
}

/// Drives the `svn` executable.
pub struct SubversionDriver;

impl VcsDriver for SubversionDriver {
    fn clone_repository(&self, url: &str, dest: &Path, _shallow: bool) -> Result<()> {
        prepare_parent(dest)?;
        run(
            VcsKind::Subversion,
            "checkout",
            url,
            &["checkout", "--quiet"],
            Some(url),
            Some(dest),
            None,
        )
    }

    fn update(&self, path: &Path) -> Result<()> {
        run(
            VcsKind::Subversion,
            "update",
            &path.display().to_string(),
            &["update", "--quiet"],
            None,
            None,
            Some(path),
        )
    }
}

/// Maps each known [`VcsKind`] to the driver that performs its clones and
/// updates.
pub struct DriverRegistry {
    git: Box<dyn VcsDriver>,
    mercurial: Box<dyn VcsDriver>,
    subversion: Box<dyn VcsDriver>,
}

impl DriverRegistry {
    /// Registry backed by the system's `git`, `hg` and `svn` executables.
    pub fn system() -> Self {
        Self {
            git: Box::new(GitDriver),
            mercurial: Box::new(MercurialDriver),
            subversion: Box::new(SubversionDriver),
        }
    }

    /// Replace the driver used for `kind`. `Unknown` is ignored.
    pub fn with_driver(mut self, kind: VcsKind, driver: Box<dyn VcsDriver>) -> Self {
        match kind {
            VcsKind::Git => self.git = driver,
            VcsKind::Mercurial => self.mercurial = driver,
            VcsKind::Subversion => self.subversion = driver,
            VcsKind::Unknown => {}
        }
        self
    }

    /// The driver for `kind`, or `None` for [`VcsKind::Unknown`].
    pub fn driver(&self, kind: VcsKind) -> Option<&dyn VcsDriver> {
        match kind {
            VcsKind::Git => Some(self.git.as_ref()),
            VcsKind::Mercurial => Some(self.mercurial.as_ref()),
            VcsKind::Subversion => Some(self.subversion.as_ref()),
            VcsKind::Unknown => None,
        }
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::system()
    }
}

fn prepare_parent(dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
            path: parent.display().to_string(),
            message: e.to_string(),
        })?;
    }
    Ok(())
}

/// Run a backend command, mapping spawn failures and non-zero exits to
/// [`Error::DriverFailure`].
fn run(
    kind: VcsKind,
    command: &str,
    target: &str,
    args: &[&str],
    url: Option<&str>,
    dest: Option<&Path>,
    cwd: Option<&Path>,
) -> Result<()> {
    let mut cmd = Command::new(kind.name());
    cmd.args(args);
    if let Some(url) = url {
        cmd.arg(url);
    }
    if let Some(dest) = dest {
        cmd.arg(dest);
    }
    if let Some(cwd) = cwd {
        cmd.current_dir(cwd);
    }
    debug!("running {:?}", cmd);

    let failure = |message: String| Error::DriverFailure {
        vcs: kind.name().to_string(),
        command: command.to_string(),
        target: target.to_string(),
        message,
    };

    let output = cmd.output().map_err(|e| failure(e.to_string()))?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        format!(
            "Authentication failed. Make sure you have access to the repository.\n\
            For private repos, ensure you have an SSH key loaded in ssh-agent\n\
            or credentials configured for {}.\n\
            Error: {}",
            kind.name(),
            stderr.trim()
        )
    } else {
        stderr.trim().to_string()
    };
    Err(failure(message))
}
