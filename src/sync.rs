//! # Sync Orchestration
//!
//! Decides, for one remote, whether to clone it, update its existing clone,
//! or leave it alone, and hands the filesystem mutation to a VCS driver.
//!
//! ## Decision
//!
//! 1. The remote is classified; [`VcsKind::Unknown`] fails with
//!    [`Error::UnknownVcs`] before anything on disk is looked at.
//! 2. The target is `<primary root>/<relative path of the identity>`.
//! 3. A missing target is cloned. An existing target is updated when
//!    requested and otherwise reported as [`SyncOutcome::AlreadyExists`].
//!
//! Existing directories are never inspected beyond their VCS marker, so a
//! partial clone left by an interrupted run counts as existing. Driver
//! failures surface as [`Error::DriverFailure`].
//!
//! Batches run strictly one target after another; a failing target is
//! logged and recorded, and the batch moves on.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, info};

use crate::driver::DriverRegistry;
use crate::error::{Error, Result};
use crate::path::{self, Layout};
use crate::remote::{RemoteIdentity, Resolver};
use crate::roots::Roots;
use crate::store;
use crate::vcs::{Classifier, VcsKind};

/// What a sync should do with an existing clone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Update the clone if it already exists
    pub update: bool,
    /// Ask for a shallow clone; ignored by backends that cannot do it
    pub shallow: bool,
}

/// Result of a successful sync, with the clone's full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Cloned(PathBuf),
    Updated(PathBuf),
    AlreadyExists(PathBuf),
}

/// Tally of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub cloned: usize,
    pub updated: usize,
    pub existing: usize,
    /// Specifier and error of every target that failed
    pub failures: Vec<(String, Error)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.cloned + self.updated + self.existing + self.failures.len()
    }

    fn record(&mut self, specifier: &str, result: Result<SyncOutcome>) {
        match result {
            Ok(SyncOutcome::Cloned(_)) => self.cloned += 1,
            Ok(SyncOutcome::Updated(_)) => self.updated += 1,
            Ok(SyncOutcome::AlreadyExists(_)) => self.existing += 1,
            Err(err) => {
                debug!("{} failed: {}", specifier, err);
                self.failures.push((specifier.to_string(), err));
            }
        }
    }
}

/// Clones and updates repositories below the primary root.
pub struct Syncer<'a> {
    roots: &'a Roots,
    drivers: &'a DriverRegistry,
    classifier: &'a Classifier,
    layout: Layout,
}

impl<'a> Syncer<'a> {
    pub fn new(
        roots: &'a Roots,
        drivers: &'a DriverRegistry,
        classifier: &'a Classifier,
        layout: Layout,
    ) -> Self {
        Self {
            roots,
            drivers,
            classifier,
            layout,
        }
    }

    /// Resolve a specifier, optionally rewrite it to SSH, and reject remotes
    /// no backend recognizes.
    pub fn identity_for(&self, resolver: &Resolver, raw: &str, ssh: bool) -> Result<RemoteIdentity> {
        let mut identity = resolver.resolve(raw)?;
        if ssh {
            identity = identity.to_ssh()?;
        }
        if !self.classifier.is_valid(&identity) {
            return Err(Error::UnknownVcs {
                remote: identity.url(),
            });
        }
        Ok(identity)
    }

    /// Where the clone of `identity` lives.
    pub fn target_path(&self, identity: &RemoteIdentity) -> PathBuf {
        store::lookup(self.roots, &path::to_rel_path(identity, self.layout))
    }

    /// Clone, update or skip one remote.
    pub fn sync(&self, identity: &RemoteIdentity, options: SyncOptions) -> Result<SyncOutcome> {
        let kind = self.classifier.classify(identity);
        let driver = self
            .drivers
            .driver(kind)
            .ok_or_else(|| Error::UnknownVcs {
                remote: identity.url(),
            })?;

        let target = self.target_path(identity);
        let exists = match fs::metadata(&target) {
            Ok(_) => true,
            Err(err) if err.kind() == io::ErrorKind::NotFound => false,
            Err(err) => {
                return Err(Error::Filesystem {
                    path: target.display().to_string(),
                    message: err.to_string(),
                })
            }
        };

        if !exists {
            info!("cloning {} into {}", identity, target.display());
            driver.clone_repository(&identity.url(), &target, options.shallow)?;
            return Ok(SyncOutcome::Cloned(target));
        }

        if !options.update {
            return Ok(SyncOutcome::AlreadyExists(target));
        }

        let local_kind = VcsKind::detect(&target).unwrap_or(kind);
        let driver = self.drivers.driver(local_kind).unwrap_or(driver);
        info!("updating {} ({})", target.display(), local_kind);
        driver.update(&target)?;
        Ok(SyncOutcome::Updated(target))
    }

    /// Sync every specifier in turn.
    ///
    /// `on_result` sees each target's result before it is tallied, so the
    /// caller can report progress.
    pub fn sync_batch<I, S, F>(
        &self,
        resolver: &Resolver,
        specifiers: I,
        options: SyncOptions,
        ssh: bool,
        mut on_result: F,
    ) -> BatchReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(&str, &Result<SyncOutcome>),
    {
        let mut report = BatchReport::default();
        for specifier in specifiers {
            let specifier = specifier.as_ref();
            let result = self
                .identity_for(resolver, specifier, ssh)
                .and_then(|identity| self.sync(&identity, options));
            on_result(specifier, &result);
            report.record(specifier, result);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::VcsDriver;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Mock driver recording every call; clones create the marker directory.
    #[derive(Clone)]
    struct MockDriver {
        calls: Arc<Mutex<Vec<String>>>,
        marker: &'static str,
        fail: bool,
    }

    impl MockDriver {
        fn new(marker: &'static str) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                marker,
                fail: false,
            }
        }

        fn failing(marker: &'static str) -> Self {
            Self {
                fail: true,
                ..Self::new(marker)
            }
        }

        fn failure(&self, command: &str, target: &str) -> Error {
            Error::DriverFailure {
                vcs: "mock".to_string(),
                command: command.to_string(),
                target: target.to_string(),
                message: "mock failure".to_string(),
            }
        }
    }

    impl VcsDriver for MockDriver {
        fn clone_repository(&self, url: &str, dest: &Path, shallow: bool) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{} clone {} shallow={}", self.marker, url, shallow));
            if self.fail {
                return Err(self.failure("clone", url));
            }
            fs::create_dir_all(dest.join(self.marker))?;
            Ok(())
        }

        fn update(&self, path: &Path) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{} update {}", self.marker, path.display()));
            if self.fail {
                return Err(self.failure("update", &path.display().to_string()));
            }
            Ok(())
        }
    }

    struct Fixture {
        _temp: TempDir,
        roots: Roots,
        drivers: DriverRegistry,
        classifier: Classifier,
        git: MockDriver,
        hg: MockDriver,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_git(MockDriver::new(".git"))
        }

        fn with_git(git: MockDriver) -> Self {
            let temp = TempDir::new().unwrap();
            let roots = Roots::new([temp.path().join("r1"), temp.path().join("r2")]).unwrap();
            let hg = MockDriver::new(".hg");
            let drivers = DriverRegistry::system()
                .with_driver(VcsKind::Git, Box::new(git.clone()))
                .with_driver(VcsKind::Mercurial, Box::new(hg.clone()))
                .with_driver(VcsKind::Subversion, Box::new(MockDriver::new(".svn")));
            Self {
                _temp: temp,
                roots,
                drivers,
                classifier: Classifier::default(),
                git,
                hg,
            }
        }

        fn syncer(&self) -> Syncer<'_> {
            Syncer::new(
                &self.roots,
                &self.drivers,
                &self.classifier,
                Layout::HostOwnerName,
            )
        }

        fn identity(&self, spec: &str) -> RemoteIdentity {
            Resolver::default().resolve(spec).unwrap()
        }
    }

    #[test]
    fn test_sync_clones_missing_target_under_primary_root() {
        let fx = Fixture::new();
        let id = fx.identity("alice/foo");

        let outcome = fx.syncer().sync(&id, SyncOptions::default()).unwrap();

        let expected = fx.roots.primary().join("github.com/alice/foo");
        assert_eq!(outcome, SyncOutcome::Cloned(expected.clone()));
        assert!(expected.join(".git").is_dir());
        assert_eq!(
            fx.git.calls.lock().unwrap().as_slice(),
            [".git clone https://github.com/alice/foo shallow=false"]
        );
    }

    #[test]
    fn test_sync_passes_shallow_flag() {
        let fx = Fixture::new();
        let id = fx.identity("alice/foo");
        let options = SyncOptions {
            update: false,
            shallow: true,
        };
        fx.syncer().sync(&id, options).unwrap();
        assert!(fx.git.calls.lock().unwrap()[0].ends_with("shallow=true"));
    }

    #[test]
    fn test_sync_existing_without_update_is_noop() {
        let fx = Fixture::new();
        let id = fx.identity("alice/foo");
        let target = fx.syncer().target_path(&id);
        fs::create_dir_all(target.join(".git")).unwrap();

        let outcome = fx.syncer().sync(&id, SyncOptions::default()).unwrap();

        assert_eq!(outcome, SyncOutcome::AlreadyExists(target));
        assert!(fx.git.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_sync_existing_with_update_calls_update() {
        let fx = Fixture::new();
        let id = fx.identity("alice/foo");
        let target = fx.syncer().target_path(&id);
        fs::create_dir_all(target.join(".git")).unwrap();

        let options = SyncOptions {
            update: true,
            shallow: false,
        };
        let outcome = fx.syncer().sync(&id, options).unwrap();

        assert_eq!(outcome, SyncOutcome::Updated(target.clone()));
        assert_eq!(
            fx.git.calls.lock().unwrap().as_slice(),
            [format!(".git update {}", target.display())]
        );
    }

    #[test]
    fn test_update_uses_backend_found_on_disk() {
        let fx = Fixture::new();
        let id = fx.identity("alice/foo");
        let target = fx.syncer().target_path(&id);
        fs::create_dir_all(target.join(".hg")).unwrap();

        let options = SyncOptions {
            update: true,
            shallow: false,
        };
        fx.syncer().sync(&id, options).unwrap();

        assert!(fx.git.calls.lock().unwrap().is_empty());
        assert_eq!(fx.hg.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_sync_ignores_copies_in_secondary_roots() {
        let fx = Fixture::new();
        let id = fx.identity("alice/foo");
        let secondary: Vec<&Path> = fx.roots.iter().collect();
        fs::create_dir_all(secondary[1].join("github.com/alice/foo/.git")).unwrap();

        let outcome = fx.syncer().sync(&id, SyncOptions::default()).unwrap();
        assert!(matches!(outcome, SyncOutcome::Cloned(_)));
    }

    #[test]
    fn test_sync_unknown_vcs_never_touches_filesystem() {
        let fx = Fixture::new();
        let id = RemoteIdentity {
            scheme: "https".to_string(),
            user: None,
            host: "github.com".to_string(),
            owner: String::new(),
            name: "foo".to_string(),
            vcs_hint: None,
        };

        let result = fx.syncer().sync(&id, SyncOptions::default());

        assert!(matches!(result, Err(Error::UnknownVcs { .. })));
        assert!(!fx.roots.primary().exists());
        assert!(fx.git.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_sync_driver_failure_propagates() {
        let fx = Fixture::with_git(MockDriver::failing(".git"));
        let id = fx.identity("alice/foo");
        let result = fx.syncer().sync(&id, SyncOptions::default());
        assert!(matches!(result, Err(Error::DriverFailure { .. })));
    }

    #[test]
    fn test_mercurial_remote_uses_mercurial_driver() {
        let fx = Fixture::new();
        let id = fx.identity("https://hg.example.org/team/proj");
        fx.syncer().sync(&id, SyncOptions::default()).unwrap();
        assert!(fx.git.calls.lock().unwrap().is_empty());
        assert_eq!(
            fx.hg.calls.lock().unwrap().as_slice(),
            [".hg clone https://hg.example.org/team/proj shallow=false"]
        );
    }

    #[test]
    fn test_identity_for_ssh_rewrite() {
        let fx = Fixture::new();
        let id = fx
            .syncer()
            .identity_for(&Resolver::default(), "alice/foo", true)
            .unwrap();
        assert_eq!(id.url(), "ssh://git@github.com/alice/foo");
        assert_eq!(
            fx.syncer().target_path(&id),
            fx.roots.primary().join("github.com/alice/foo")
        );
    }

    #[test]
    fn test_batch_continues_after_failures() {
        let fx = Fixture::new();
        let existing = fx.syncer().target_path(&fx.identity("bob/bar"));
        fs::create_dir_all(existing.join(".git")).unwrap();

        let mut seen = Vec::new();
        let report = fx.syncer().sync_batch(
            &Resolver::default(),
            ["alice/foo", "nope", "bob/bar", "https://github.com/x"],
            SyncOptions::default(),
            false,
            |spec, result| seen.push((spec.to_string(), result.is_ok())),
        );

        assert_eq!(report.cloned, 1);
        assert_eq!(report.existing, 1);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.total(), 4);
        assert!(!report.is_success());
        assert_eq!(
            seen,
            vec![
                ("alice/foo".to_string(), true),
                ("nope".to_string(), false),
                ("bob/bar".to_string(), true),
                ("https://github.com/x".to_string(), false),
            ]
        );
    }
}
