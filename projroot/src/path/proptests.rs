//! Property-based tests for lexical path handling.

use super::normalize::{absolutize, resolve_components};
use proptest::prelude::*;
use std::path::{Component, PathBuf};

fn path_component_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => "[a-z0-9_-]{1,12}",
        1 => Just("..".to_string()),
        1 => Just(".".to_string()),
    ]
}

fn absolute_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 0..8).prop_map(|parts| {
        let mut path = PathBuf::from("/");
        for part in parts {
            path.push(part);
        }
        path
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Folding is idempotent.
    #[test]
    fn resolve_components_idempotent(path in absolute_path_strategy()) {
        let once = resolve_components(&path);
        let twice = resolve_components(&once);
        prop_assert_eq!(once, twice);
    }

    // Folded absolute paths contain no `.` or `..` and stay absolute.
    #[test]
    fn resolved_absolute_paths_are_clean(path in absolute_path_strategy()) {
        let resolved = resolve_components(&path);
        prop_assert!(resolved.is_absolute());
        prop_assert!(resolved
            .components()
            .all(|c| !matches!(c, Component::ParentDir | Component::CurDir)));
    }

    // Absolute paths ignore the base entirely.
    #[test]
    fn absolutize_keeps_absolute(path in absolute_path_strategy(), base in absolute_path_strategy()) {
        prop_assert_eq!(absolutize(&path, &base), path);
    }
}
