//! # Local Repository Store
//!
//! Discovers existing clones below the configured roots.
//!
//! ## Walk
//!
//! Each root is walked depth-first in file-name order with `walkdir`. A
//! directory is reported as a [`LocalRepository`] as soon as a VCS marker
//! (`.git`, `.hg`, `.svn`) sits directly inside it, and the walk does not
//! descend into it. Symlinked directories are followed, but every physical
//! directory is entered at most once per root, which also breaks symlink
//! cycles. A directory that is itself one of the configured roots is left
//! to that root's own walk, so nested roots report their clones with paths
//! relative to themselves. Unreadable subtrees are logged and skipped.
//!
//! Discovery is lazy and keeps no state between calls: every call to
//! [`discover`] walks the filesystem again, so two calls against an
//! unchanged tree yield the same sequence.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::path::{self, decompose};
use crate::roots::Roots;
use crate::vcs::VcsKind;

/// A clone found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    /// Root the clone was found under
    pub root: PathBuf,
    /// Segments of `rel_path`, conventionally `[host, owner, name]`
    pub path_parts: Vec<String>,
    /// `root` joined with the relative path
    pub full_path: PathBuf,
    /// Slash-separated path relative to `root`
    pub rel_path: String,
    /// Backend owning the working copy, from its marker
    pub vcs: VcsKind,
}

impl LocalRepository {
    /// Describe the clone at `full_path` below `root`.
    pub fn new(root: &Path, full_path: &Path, vcs: VcsKind) -> Result<Self> {
        let rel = full_path
            .strip_prefix(root)
            .map_err(|_| Error::Filesystem {
                path: full_path.display().to_string(),
                message: format!("not below root {}", root.display()),
            })?;
        let path_parts = decompose(rel);
        if path_parts.is_empty() {
            return Err(Error::Filesystem {
                path: full_path.display().to_string(),
                message: "a root cannot itself be a repository".to_string(),
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            rel_path: path::join_parts(&path_parts),
            full_path: full_path.to_path_buf(),
            path_parts,
            vcs,
        })
    }

    /// Last path segment, the repository name.
    pub fn name(&self) -> &str {
        self.path_parts.last().map(String::as_str).unwrap_or_default()
    }

    /// Slash-joined suffixes of the path parts, shortest first.
    pub fn subpaths(&self) -> Vec<String> {
        path::subpaths_of(&self.path_parts)
            .into_iter()
            .map(path::join_parts)
            .collect()
    }

    pub fn matches(&self, query: &str, exact: bool) -> bool {
        path::matches_query(&self.rel_path, query, exact)
    }

    pub fn is_under_primary_root(&self, roots: &Roots) -> bool {
        roots.is_primary(&self.root)
    }
}

/// Lazily walk every root in order and yield the clones found.
pub fn discover(roots: &Roots) -> Discovery {
    Discovery {
        pending: roots.iter().map(Path::to_path_buf).collect::<Vec<_>>().into_iter(),
        current: None,
        roots: roots.iter().filter_map(|r| fs::canonicalize(r).ok()).collect(),
        visited: HashSet::new(),
    }
}

/// Full path a relative clone path maps to under the primary root.
///
/// Pure path arithmetic, no I/O.
pub fn lookup(roots: &Roots, rel_path: &Path) -> PathBuf {
    roots.primary().join(rel_path)
}

/// Iterator returned by [`discover`].
pub struct Discovery {
    pending: std::vec::IntoIter<PathBuf>,
    current: Option<(PathBuf, walkdir::IntoIter)>,
    /// Physical locations of every configured root
    roots: HashSet<PathBuf>,
    /// Physical directories already entered while walking the current root
    visited: HashSet<PathBuf>,
}

impl Discovery {
    fn start_next_root(&mut self) -> bool {
        for root in self.pending.by_ref() {
            if !root.is_dir() {
                debug!("root {} does not exist, skipping", root.display());
                continue;
            }
            let walker = WalkDir::new(&root)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter();
            self.visited.clear();
            self.current = Some((root, walker));
            return true;
        }
        false
    }
}

impl Iterator for Discovery {
    type Item = LocalRepository;

    fn next(&mut self) -> Option<LocalRepository> {
        loop {
            if self.current.is_none() && !self.start_next_root() {
                return None;
            }
            let (root, walker) = self.current.as_mut()?;

            let entry = match walker.next() {
                None => {
                    self.current = None;
                    continue;
                }
                Some(Err(err)) => {
                    let path = err
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    if err.loop_ancestor().is_some() {
                        debug!("skipping symlink loop at {}", path);
                    } else {
                        warn!("skipping unreadable path {}: {}", path, err);
                    }
                    continue;
                }
                Some(Ok(entry)) => entry,
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let physical = match fs::canonicalize(entry.path()) {
                Ok(physical) => physical,
                Err(err) => {
                    warn!("skipping {}: {}", entry.path().display(), err);
                    walker.skip_current_dir();
                    continue;
                }
            };
            if entry.depth() > 0 && self.roots.contains(&physical) {
                debug!("{} is a root of its own, skipping", entry.path().display());
                walker.skip_current_dir();
                continue;
            }
            if !self.visited.insert(physical) {
                debug!("already visited {}, skipping", entry.path().display());
                walker.skip_current_dir();
                continue;
            }

            if entry.depth() == 0 {
                continue;
            }

            if let Some(kind) = VcsKind::detect(entry.path()) {
                walker.skip_current_dir();
                match LocalRepository::new(root.as_path(), entry.path(), kind) {
                    Ok(repo) => return Some(repo),
                    Err(err) => warn!("{}", err),
                }
            }
        }
    }
}
