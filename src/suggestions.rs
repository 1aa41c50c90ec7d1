//! # Error Suggestions
//!
//! Helpers that turn library errors into messages telling the user what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use repo_roots::suggestions;
//!
//! // Instead of:
//! let repo = matcher::resolve_single(repos, query)?;
//!
//! // Use:
//! let repo = matcher::resolve_single(repos, query).map_err(suggestions::explain)?;
//! ```

use crate::defaults::{CONFIG_ENV, DEFAULT_HOST};
use crate::error::Error;

/// Error for a query that matched nothing, suggesting close repository names.
pub fn no_repository_found(query: &str, names: &[&str]) -> anyhow::Error {
    let did_you_mean = find_similar(query, names)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "No repository found for '{query}'{did_you_mean}\n\n\
         hint: Run 'repo-roots list' to see every local repository\n\
         hint: Queries match a trailing run of whole path segments, e.g. 'name' or 'owner/name'\n\
         hint: Run 'repo-roots get {query}' to clone it"
    )
}

/// Error for a query that matched several repositories.
pub fn ambiguous_repository(query: &str, candidates: &[String]) -> anyhow::Error {
    let listing = candidates
        .iter()
        .map(|c| format!("  - {c}"))
        .collect::<Vec<_>>()
        .join("\n");

    anyhow::anyhow!(
        "More than one repository found for '{query}':\n{listing}\n\n\
         hint: Add the owner or host to the query, e.g. 'owner/{query}'"
    )
}

/// Error for a specifier that could not be parsed.
pub fn invalid_specifier(specifier: &str, reason: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid repository specifier '{specifier}': {reason}\n\n\
         hint: Use 'owner/name' for {DEFAULT_HOST}, 'host/owner/name' for other hosts\n\
         hint: Full URLs ('https://host/owner/name') and 'user@host:owner/name' also work"
    )
}

/// Error for a remote that no backend serves.
pub fn unknown_vcs(remote: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Could not find version control system for {remote}\n\n\
         hint: Remotes need a host, an owner and a name\n\
         hint: Add the host to 'mercurial_hosts' or 'subversion_hosts' in the settings file ({CONFIG_ENV})"
    )
}

/// Attach hints to a library error where a fix is known.
pub fn explain(error: Error) -> anyhow::Error {
    match error {
        Error::NotFound { query } => no_repository_found(&query, &[]),
        Error::AmbiguousMatch { query, candidates } => ambiguous_repository(&query, &candidates),
        Error::InvalidSpecifier { specifier, reason } => invalid_specifier(&specifier, &reason),
        Error::AmbiguousShorthand { specifier } => {
            invalid_specifier(&specifier, "expected <owner>/<name>")
        }
        Error::UnknownVcs { remote } => unknown_vcs(&remote),
        other => anyhow::Error::new(other),
    }
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance, two rows at a time.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != *b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
