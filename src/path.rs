//! Path model for repo-roots
//!
//! Maps a remote identity onto a relative directory path under a root and
//! back, and decomposes relative paths into the suffix chains used for
//! matching and display. Nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::remote::RemoteIdentity;

/// On-disk layout of clones below a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// `<host>/<owner>/<name>`
    #[default]
    HostOwnerName,
    /// `<owner>/<name>`, for roots dedicated to a single host
    OwnerName,
}

/// Path segments an identity occupies below a root.
///
/// Owners that carry enterprise sub-paths (`group/subgroup`) contribute one
/// segment per sub-path.
pub fn path_parts(identity: &RemoteIdentity, layout: Layout) -> Vec<String> {
    let mut parts = Vec::new();
    if layout == Layout::HostOwnerName {
        parts.push(identity.host.clone());
    }
    parts.extend(identity.owner.split('/').map(str::to_string));
    parts.push(identity.name.clone());
    parts
}

/// Relative path of an identity's clone, using the platform separator.
///
/// Case is kept verbatim.
pub fn to_rel_path(identity: &RemoteIdentity, layout: Layout) -> PathBuf {
    path_parts(identity, layout).iter().collect()
}

/// Split a relative path back into its segments.
///
/// `.` components and root/prefix components are dropped.
pub fn decompose(rel_path: &Path) -> Vec<String> {
    rel_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Join path segments with `/`, the display form of a relative path.
pub fn join_parts<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}

/// Every suffix of `parts`, shortest first.
///
/// For `[host, owner, name]` this yields `[name]`, `[owner, name]` and
/// `[host, owner, name]`. Element `k` always has length `k + 1`.
pub fn subpaths_of<T>(parts: &[T]) -> Vec<&[T]> {
    (0..parts.len()).rev().map(|start| &parts[start..]).collect()
}

/// Check whether a slash-separated relative path matches a query.
///
/// In exact mode the path must equal the query or end with `/<query>`, so
/// `foo`, `alice/foo` and `github.com/alice/foo` all name
/// `github.com/alice/foo`. Otherwise the query must occur as a contiguous
/// substring; an empty query then matches everything.
pub fn matches_query(rel_path: &str, query: &str, exact: bool) -> bool {
    if !exact {
        return rel_path.contains(query);
    }
    if query.is_empty() {
        return false;
    }
    rel_path == query
        || rel_path
            .strip_suffix(query)
            .is_some_and(|prefix| prefix.ends_with('/'))
}
