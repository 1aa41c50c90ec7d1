//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a fixture with two root directories and helpers to
//! lay out fake clones inside them.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_clone(0, "github.com/alice/foo");
//!     fixture.command().arg("list").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::env;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// Number of roots every fixture starts with.
pub const ROOT_COUNT: usize = 2;

/// A temporary directory holding roots `r1` (primary) and `r2`, plus an
/// empty settings file so the user's own settings never leak in.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new fixture with empty roots.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        for i in 0..ROOT_COUNT {
            temp_dir
                .child(format!("r{}", i + 1))
                .create_dir_all()
                .expect("Failed to create root");
        }
        temp_dir
            .child("settings.yaml")
            .write_str("")
            .expect("Failed to write settings file");
        Self { temp_dir }
    }

    /// Path of root `index` (0 is primary).
    pub fn root(&self, index: usize) -> PathBuf {
        self.temp_dir.path().join(format!("r{}", index + 1))
    }

    /// Every root, primary first.
    pub fn roots(&self) -> Vec<PathBuf> {
        (0..ROOT_COUNT).map(|i| self.root(i)).collect()
    }

    /// Add a fake git clone at `rel` below root `index`.
    pub fn with_clone(self, index: usize, rel: &str) -> Self {
        self.with_marker(index, rel, ".git")
    }

    /// Add a fake clone with an arbitrary VCS marker directory.
    pub fn with_marker(self, index: usize, rel: &str, marker: &str) -> Self {
        self.temp_dir
            .child(format!("r{}", index + 1))
            .child(rel)
            .child(marker)
            .create_dir_all()
            .expect("Failed to create clone");
        self
    }

    /// Replace the settings file content.
    #[allow(dead_code)]
    pub fn with_settings(self, content: &str) -> Self {
        self.temp_dir
            .child("settings.yaml")
            .write_str(content)
            .expect("Failed to write settings file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Get the path to the settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.temp_dir.path().join("settings.yaml")
    }

    /// `REPO_ROOTS` value naming every root.
    pub fn roots_env(&self) -> std::ffi::OsString {
        env::join_paths(self.roots()).expect("Failed to join root paths")
    }

    /// Create a command for the binary, isolated to this fixture's roots
    /// and settings.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("repo-roots");
        cmd.current_dir(self.path())
            .env("REPO_ROOTS", self.roots_env())
            .env("REPO_ROOTS_CONFIG", self.settings_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_roots() {
        let fixture = TestFixture::new();
        assert!(fixture.root(0).is_dir());
        assert!(fixture.root(1).is_dir());
        assert!(fixture.settings_path().is_file());
    }

    #[test]
    fn test_fixture_with_clone() {
        let fixture = TestFixture::new().with_clone(1, "github.com/alice/foo");
        assert!(fixture.root(1).join("github.com/alice/foo/.git").is_dir());
    }
}
