//! Configured root directories.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Ordered, non-empty list of root directories. The first one is primary:
/// new clones land there and it wins when a repository exists under
/// several roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    dirs: Vec<PathBuf>,
}

impl Roots {
    /// Build a root list, dropping later duplicates.
    pub fn new<I, P>(dirs: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut unique: Vec<PathBuf> = Vec::new();
        for dir in dirs {
            let dir = dir.into();
            if !unique.contains(&dir) {
                unique.push(dir);
            }
        }
        if unique.is_empty() {
            return Err(Error::Config {
                message: "no root directories configured".to_string(),
                hint: Some("Set REPO_ROOTS or add 'roots:' to the settings file".to_string()),
            });
        }
        Ok(Self { dirs: unique })
    }

    /// Root that receives new clones.
    pub fn primary(&self) -> &Path {
        &self.dirs[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    pub fn is_primary(&self, root: &Path) -> bool {
        self.primary() == root
    }
}
