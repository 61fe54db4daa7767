//! Property-based tests for specifier narrowing and inference.

use super::{infer_target_versions, SpecifierSet, TargetVersion, Version};
use proptest::prelude::*;

fn version_text() -> impl Strategy<Value = String> {
    prop::collection::vec(0u64..20, 1..4).prop_map(|parts| {
        let mut parts = parts;
        parts[0] = 3;
        parts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    })
}

fn clause() -> impl Strategy<Value = String> {
    let op = prop_oneof![
        Just("=="),
        Just("!="),
        Just("<="),
        Just(">="),
        Just("<"),
        Just(">"),
    ];
    (op, version_text()).prop_map(|(op, v)| format!("{op}{v}"))
}

fn compatible_clause() -> impl Strategy<Value = String> {
    (0u64..20, 0u64..20).prop_map(|(minor, patch)| format!("~=3.{minor}.{patch}"))
}

fn set_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![3 => clause(), 1 => compatible_clause()], 1..4)
        .prop_map(|clauses| clauses.join(","))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Narrowing twice changes nothing.
    #[test]
    fn strip_is_idempotent(text in set_text()) {
        let set = SpecifierSet::parse(&text).unwrap();
        let once = set.strip_to_minor().unwrap();
        let twice = once.strip_to_minor().unwrap();
        prop_assert_eq!(once.to_string(), twice.to_string());
        for target in TargetVersion::ALL {
            let v = target.as_version();
            prop_assert_eq!(once.contains(&v), twice.contains(&v));
        }
    }

    // Inferred targets are non-empty and each satisfies the narrowed set.
    #[test]
    fn inferred_targets_satisfy_set(text in set_text()) {
        let narrowed = SpecifierSet::parse(&text).unwrap().strip_to_minor().unwrap();
        if let Some(targets) = infer_target_versions(&text) {
            prop_assert!(!targets.is_empty());
            for target in &targets {
                prop_assert!(narrowed.contains(&target.as_version()));
            }
        }
    }

    // A bare 3.x version infers exactly its own minor when supported.
    #[test]
    fn exact_version_infers_own_minor(minor in 0u64..20, patch in 0u64..20) {
        let text = format!("3.{minor}.{patch}");
        prop_assert!(Version::parse(&text).is_ok());
        let expected = TargetVersion::from_minor(minor).map(|t| vec![t]);
        let got = infer_target_versions(&text).map(|s| s.into_iter().collect::<Vec<_>>());
        prop_assert_eq!(got, expected);
    }
}
