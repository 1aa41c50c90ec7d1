//! # Matching and Disambiguation
//!
//! Filters discovered repositories by a query and computes short display
//! names for them.
//!
//! All functions keep discovery order (root order, then walk order), so
//! repeated runs against an unchanged filesystem print the same thing.
//!
//! ## Unique Subpaths
//!
//! [`unique_subpaths`] gives every repository the shortest path suffix that
//! no other repository shares:
//!
//! 1. A relative path present under several roots is one logical
//!    repository; only its primary-root copy takes part. If the primary
//!    root has no copy, none does.
//! 2. Every suffix of every participating repository is counted.
//! 3. Each participant gets its first suffix, shortest first, with a count
//!    of one.
//!
//! The assignment is greedy and never trades a longer suffix on one
//! repository for a shorter one on another.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::path::{self, subpaths_of};
use crate::roots::Roots;
use crate::store::LocalRepository;

/// Repositories whose relative path matches `query`, in input order.
pub fn find_matches<I>(repos: I, query: &str, exact: bool) -> Vec<LocalRepository>
where
    I: IntoIterator<Item = LocalRepository>,
{
    repos
        .into_iter()
        .filter(|repo| repo.matches(query, exact))
        .collect()
}

/// Resolve a query to exactly one repository using exact matching.
///
/// Zero matches is [`Error::NotFound`]; several matches is
/// [`Error::AmbiguousMatch`] listing every candidate's path parts. The
/// function never guesses.
pub fn resolve_single<I>(repos: I, query: &str) -> Result<LocalRepository>
where
    I: IntoIterator<Item = LocalRepository>,
{
    let mut found = find_matches(repos, query, true);
    match found.len() {
        0 => Err(Error::NotFound {
            query: query.to_string(),
        }),
        1 => Ok(found.remove(0)),
        _ => Err(Error::AmbiguousMatch {
            query: query.to_string(),
            candidates: found
                .iter()
                .map(|repo| path::join_parts(&repo.path_parts))
                .collect(),
        }),
    }
}

/// Shortest globally unique suffix for each repository, in input order.
///
/// Repositories that do not take part (non-primary copies of a path that
/// exists under several roots) are left out.
pub fn unique_subpaths<'a>(
    repos: &'a [LocalRepository],
    roots: &Roots,
) -> Vec<(&'a LocalRepository, String)> {
    let mut copies: HashMap<&str, usize> = HashMap::new();
    for repo in repos {
        *copies.entry(repo.rel_path.as_str()).or_insert(0) += 1;
    }

    let eligible: Vec<&LocalRepository> = repos
        .iter()
        .filter(|repo| copies[repo.rel_path.as_str()] == 1 || repo.is_under_primary_root(roots))
        .collect();

    let mut frequency: HashMap<&[String], usize> = HashMap::new();
    for repo in &eligible {
        for subpath in subpaths_of(&repo.path_parts) {
            *frequency.entry(subpath).or_insert(0) += 1;
        }
    }

    eligible
        .into_iter()
        .filter_map(|repo| {
            subpaths_of(&repo.path_parts)
                .into_iter()
                .find(|subpath| frequency[subpath] == 1)
                .map(|subpath| (repo, path::join_parts(subpath)))
        })
        .collect()
}
