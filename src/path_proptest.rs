//! Property-based tests for the path model, resolver and matcher.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;
    use std::path::Path;

    use proptest::prelude::*;

    use crate::matcher::unique_subpaths;
    use crate::path::{decompose, join_parts, matches_query, subpaths_of, to_rel_path, Layout};
    use crate::remote::Resolver;
    use crate::roots::Roots;
    use crate::store::LocalRepository;
    use crate::vcs::VcsKind;

    fn segment() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,8}"
    }

    fn host() -> impl Strategy<Value = String> {
        "[a-z]{1,6}\\.(com|org|net)"
    }

    fn rel_path() -> impl Strategy<Value = Vec<String>> {
        (host(), segment(), segment()).prop_map(|(h, o, n)| vec![h, o, n])
    }

    proptest! {
        /// Property: resolving the rendered URL of an identity gives it back
        #[test]
        fn resolve_is_idempotent(owner in segment(), name in segment()) {
            let resolver = Resolver::default();
            let identity = resolver.resolve(&format!("{}/{}", owner, name)).unwrap();
            let again = resolver.resolve(&identity.url()).unwrap();
            prop_assert_eq!(again, identity);
        }

        /// Property: the relative path decomposes into the identity's path parts
        #[test]
        fn rel_path_round_trips(
            host in host(),
            owners in prop::collection::vec(segment(), 1..4),
            name in segment(),
        ) {
            let spec = format!("{}/{}/{}", host, owners.join("/"), name);
            let identity = Resolver::default().resolve(&spec).unwrap();
            for layout in [Layout::HostOwnerName, Layout::OwnerName] {
                let parts = decompose(&to_rel_path(&identity, layout));
                prop_assert_eq!(parts, identity.path_parts(layout));
            }
        }

        /// Property: subpaths are the suffixes of the parts, shortest first
        #[test]
        fn subpaths_are_ascending_suffixes(parts in prop::collection::vec(segment(), 1..6)) {
            let subpaths = subpaths_of(&parts);
            prop_assert_eq!(subpaths.len(), parts.len());
            for (i, subpath) in subpaths.iter().enumerate() {
                prop_assert_eq!(subpath.len(), i + 1);
                prop_assert!(parts.ends_with(subpath));
            }
        }

        /// Property: a repository always matches its name and its whole path exactly
        #[test]
        fn exact_match_accepts_name_and_full_path(parts in rel_path()) {
            let rel = join_parts(&parts);
            prop_assert!(matches_query(&rel, &parts[2], true));
            prop_assert!(matches_query(&rel, &rel, true));
            prop_assert!(matches_query(&rel, &parts[2], false));
        }

        /// Property: distinct repositories under one root get distinct,
        /// suffix-shaped unique subpaths, and every one of them gets one
        #[test]
        fn unique_subpaths_are_unique(paths in prop::collection::hash_set(rel_path(), 1..12)) {
            let roots = Roots::new(["/r1"]).unwrap();
            let repos: Vec<LocalRepository> = paths
                .iter()
                .map(|parts| {
                    let full = Path::new("/r1").join(join_parts(parts));
                    LocalRepository::new(Path::new("/r1"), &full, VcsKind::Git).unwrap()
                })
                .collect();

            let assigned = unique_subpaths(&repos, &roots);
            prop_assert_eq!(assigned.len(), repos.len());

            let mut seen = HashSet::new();
            for (repo, subpath) in &assigned {
                prop_assert!(seen.insert(subpath.clone()), "duplicate subpath {}", subpath);
                let rel = &repo.rel_path;
                let suffix = format!("/{}", subpath);
                prop_assert!(rel == subpath || rel.ends_with(&suffix));
            }
        }
    }
}
