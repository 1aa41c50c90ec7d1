//! # Repo Roots Library
//!
//! Keeps local clones of remote repositories in a predictable layout below
//! one or more root directories, and finds them again by short names.
//!
//! ## Quick Example
//!
//! ```
//! use repo_roots::path::{self, Layout};
//! use repo_roots::remote::Resolver;
//! use repo_roots::vcs::{Classifier, VcsKind};
//!
//! let identity = Resolver::default().resolve("alice/foo").unwrap();
//! assert_eq!(identity.url(), "https://github.com/alice/foo");
//! assert_eq!(
//!     path::join_parts(&identity.path_parts(Layout::HostOwnerName)),
//!     "github.com/alice/foo"
//! );
//! assert_eq!(Classifier::default().classify(&identity), VcsKind::Git);
//! ```
//!
//! ## Core Concepts
//!
//! - **Remote resolution (`remote`)**: Turns URLs, SCP-like addresses and
//!   `owner/name` shorthands into a normalized [`remote::RemoteIdentity`].
//! - **Path model (`path`)**: Maps an identity to `host/owner/name` below a
//!   root and computes the suffix chains used for matching.
//! - **Classification (`vcs`)**: Decides whether a remote is served by Git,
//!   Mercurial or Subversion, and recognizes clones on disk by their marker
//!   directory.
//! - **Discovery (`store`)**: Walks every root and yields the clones found,
//!   in root order.
//! - **Matching (`matcher`)**: Filters clones by query, resolves a query to
//!   one clone, and computes the shortest unique name of each clone.
//! - **Sync (`sync`, `driver`)**: Clones or updates a remote in the primary
//!   root through a pluggable VCS driver.
//!
//! ## Configuration
//!
//! [`config::Settings`] reads the optional settings file and produces the
//! [`roots::Roots`], the resolver and the classifier. These are built once
//! per process and passed explicitly to everything that needs them.

pub mod config;
pub mod defaults;
pub mod driver;
pub mod error;
pub mod matcher;
pub mod output;
pub mod path;
pub mod remote;
pub mod roots;
pub mod store;
pub mod suggestions;
pub mod sync;
pub mod vcs;

#[cfg(test)]
mod path_proptest;
