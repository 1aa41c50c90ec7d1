//! # VCS Classification
//!
//! Decides which version control system owns a remote, and which one owns an
//! existing clone on disk.
//!
//! Remote classification is a pure function of the resolved identity. It
//! never probes the network, so a self-hosted Mercurial or Subversion server
//! whose hostname matches no pattern is treated as git. The decision order
//! is:
//!
//! 1. An identity that fails shape validation is [`VcsKind::Unknown`].
//! 2. A VCS implied by the URL scheme (`svn://`, `git://`) wins.
//! 3. A host matching a Mercurial pattern is [`VcsKind::Mercurial`].
//! 4. A host matching a Subversion pattern is [`VcsKind::Subversion`].
//! 5. Everything else is [`VcsKind::Git`].

use std::fmt;
use std::path::Path;

use regex::Regex;

use crate::error::Result;
use crate::remote::{self, RemoteIdentity};

/// Host patterns of well-known Mercurial hosting.
pub const MERCURIAL_HOST_PATTERNS: &[&str] = &[r"^hg\.", r"^mercurial\.", r"^foss\.heptapod\.net$"];

/// Host patterns of well-known Subversion-only hosting.
pub const SUBVERSION_HOST_PATTERNS: &[&str] = &[r"^svn\.", r"\.googlecode\.com$"];

/// Version control system owning a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsKind {
    Git,
    Mercurial,
    Subversion,
    /// No backend recognized the remote; never reaches the filesystem.
    Unknown,
}

impl VcsKind {
    /// Kinds that own a metadata marker, in detection order.
    pub const KNOWN: [VcsKind; 3] = [VcsKind::Git, VcsKind::Mercurial, VcsKind::Subversion];

    /// Display name (also the executable name of the backend).
    pub fn name(&self) -> &'static str {
        match self {
            VcsKind::Git => "git",
            VcsKind::Mercurial => "hg",
            VcsKind::Subversion => "svn",
            VcsKind::Unknown => "unknown",
        }
    }

    /// Metadata entry found at the top of a working copy.
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            VcsKind::Git => Some(".git"),
            VcsKind::Mercurial => Some(".hg"),
            VcsKind::Subversion => Some(".svn"),
            VcsKind::Unknown => None,
        }
    }

    /// Detect the kind of a working copy from the marker directly inside `dir`.
    ///
    /// A `.git` file (worktrees, submodules) counts as a marker too.
    pub fn detect(dir: &Path) -> Option<VcsKind> {
        Self::KNOWN.into_iter().find(|kind| {
            kind.marker()
                .is_some_and(|marker| dir.join(marker).exists())
        })
    }

    pub fn is_known(&self) -> bool {
        *self != VcsKind::Unknown
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Host-pattern classifier for remotes.
#[derive(Debug, Clone)]
pub struct Classifier {
    mercurial: Vec<Regex>,
    subversion: Vec<Regex>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            mercurial: compile_builtin(MERCURIAL_HOST_PATTERNS),
            subversion: compile_builtin(SUBVERSION_HOST_PATTERNS),
        }
    }
}

impl Classifier {
    /// Build a classifier with extra host patterns on top of the built-in ones.
    pub fn with_patterns<S: AsRef<str>>(mercurial: &[S], subversion: &[S]) -> Result<Self> {
        let mut classifier = Self::default();
        for pattern in mercurial {
            classifier.mercurial.push(Regex::new(pattern.as_ref())?);
        }
        for pattern in subversion {
            classifier.subversion.push(Regex::new(pattern.as_ref())?);
        }
        Ok(classifier)
    }

    /// Classify a remote. Total and free of I/O.
    pub fn classify(&self, identity: &RemoteIdentity) -> VcsKind {
        if !remote::is_well_formed(identity) {
            return VcsKind::Unknown;
        }
        if let Some(hint) = identity.vcs_hint {
            return hint;
        }

        let host = host_without_port(&identity.host);
        if self.mercurial.iter().any(|re| re.is_match(host)) {
            VcsKind::Mercurial
        } else if self.subversion.iter().any(|re| re.is_match(host)) {
            VcsKind::Subversion
        } else {
            VcsKind::Git
        }
    }

    /// Whether a remote is fetchable by some backend.
    pub fn is_valid(&self, identity: &RemoteIdentity) -> bool {
        self.classify(identity).is_known()
    }
}

fn host_without_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

fn compile_builtin(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("built-in host pattern must compile"))
        .collect()
}
