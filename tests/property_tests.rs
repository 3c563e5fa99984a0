//! Property-based tests for metadata parsing and merging.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use patchmate::core::metadata::{parse_block, Markers, MetadataLine, ResultsContainer, Role};
use patchmate::core::types::PathPair;
use patchmate::resolve::{MemoryFileSystem, NullSink, Resolver};

/// Strategy for owner names.
fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.-]{0,15}"
}

fn role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Owner), Just(Role::Reviewer), Just(Role::Maintainer)]
}

/// Strategy for a container of owner entries declared in `declared_in`.
fn container(declared_in: &'static str) -> impl Strategy<Value = ResultsContainer> {
    (
        prop::collection::vec((role(), name()), 0..8),
        prop::option::of(prop_oneof![Just("0"), Just("1"), Just("")]),
    )
        .prop_map(move |(entries, recursive)| {
            let mut results = ResultsContainer::new();
            for (role, name) in entries {
                results.push_entry(role, name, Path::new(declared_in));
            }
            if let Some(value) = recursive {
                results.set_recursive(value);
            }
            results
        })
}

/// Strategy for relative paths of a few plain components.
fn relative_path() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec("[a-z]{1,6}", 1..5).prop_map(|parts| parts.iter().collect())
}

proptest! {
    /// Merge keeps every entry, local ones first, and the local directive.
    #[test]
    fn merge_preserves_order_and_local_directive(
        local in container("src/a.py"),
        inherited in container("src"),
    ) {
        let merged = ResultsContainer::merge(local.clone(), inherited.clone());

        let expected: Vec<_> = local
            .entries()
            .iter()
            .chain(inherited.entries())
            .cloned()
            .collect();
        prop_assert_eq!(merged.entries(), expected.as_slice());
        prop_assert_eq!(merged.recursive(), local.recursive());
    }

    /// Reviewer names are unique and in first-declared order.
    #[test]
    fn reviewers_are_unique(results in container("x")) {
        let reviewers = results.reviewers();
        let mut seen = std::collections::HashSet::new();
        for name in &reviewers {
            prop_assert!(seen.insert(*name));
        }
        prop_assert_eq!(reviewers.len(), seen.len());
    }

    /// Line parsing accepts any input without panicking.
    #[test]
    fn line_parse_never_panics(line in "\\PC{0,80}") {
        let _ = MetadataLine::parse(&line);
    }

    /// Extraction never panics and always returns a slice of the input.
    #[test]
    fn extract_is_a_substring(content in "\\PC{0,200}") {
        if let Some(block) = Markers::default().extract(&content) {
            prop_assert!(content.contains(block));
        }
    }

    /// Rendered owner lines parse back to the same names.
    #[test]
    fn owner_lines_parse(role in role(), names in prop::collection::vec(name(), 1..5)) {
        let block = format!("{}: {}\n", role, names.join(", "));
        let results = parse_block(&block, Path::new("f"));

        let parsed: Vec<&str> = results.entries().iter().map(|e| e.name.as_str()).collect();
        let expected: Vec<&str> = names.iter().map(String::as_str).collect();
        prop_assert_eq!(parsed, expected);
        prop_assert!(results.entries().iter().all(|e| e.role == role));
    }

    /// Parent pairs always shrink both halves until the change root.
    #[test]
    fn parent_walk_terminates_at_root(rel in relative_path()) {
        let mut pair = PathPair::under_root("/repo", rel.clone()).unwrap();
        let mut steps = 0;
        while let Some(parent) = pair.parent() {
            prop_assert!(parent.absolute().starts_with("/repo"));
            pair = parent;
            steps += 1;
        }
        prop_assert_eq!(steps, rel.components().count());
        prop_assert_eq!(pair.relative(), Path::new(""));
    }

    /// Resolving twice gives the same result.
    #[test]
    fn resolution_is_idempotent(recursive in prop_oneof![Just("0"), Just("1")]) {
        let fs = MemoryFileSystem::new()
            .with_file(
                "/repo/src/a.py",
                format!("@REVIEW-METADATA-BEGIN\nowner: alice\nrecursive: {}\n@REVIEW-METADATA-END\n", recursive),
            )
            .with_file(
                "/repo/src/review.metadata",
                "@REVIEW-METADATA-BEGIN\nowner: bob\n@REVIEW-METADATA-END\n",
            );
        let resolver = Resolver::new(&fs, &NullSink);
        let file = PathPair::under_root("/repo", "src/a.py").unwrap();

        let first = resolver.resolve_file(&file).unwrap();
        let second = resolver.resolve_file(&file).unwrap();

        prop_assert_eq!(first, second);
    }
}
