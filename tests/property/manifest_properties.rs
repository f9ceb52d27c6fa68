//! Manifest writer and rule engine properties

use super::{listing_strategy, render};
use culler::manifest::{write_manifest, Manifest, ManifestEntry, Operation};
use proptest::prelude::*;
use culler::rules::{apply_script, parse_script};
use culler::similarity::classify;
use culler::tree::build_tree;

/// Written manifests parse back to the same lines and keep every copy
#[test]
fn test_manifest_round_trip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(listing_strategy(), proptest::bool::ANY), |(lines, include_files)| {
            let tree = build_tree(&render(&lines), &[]).unwrap();
            let (manifest, summary) =
                write_manifest(&tree, &classify(&tree), include_files).unwrap();

            let text = manifest.serialize();
            let parsed = Manifest::parse(&text).unwrap();
            assert_eq!(parsed, manifest);
            assert_eq!(parsed.serialize(), text);
            assert_eq!(parsed.entries().count(), summary.entries);
            assert_eq!(parsed.hash_groups().len(), summary.groups);
            assert!(parsed.entries().all(|e| e.operation == Operation::Keep));
            assert!(parsed.verify_keeps().is_ok());
            Ok(())
        })
        .unwrap();
}

/// Any entry with a single-line path survives serialize then parse
#[test]
fn test_arbitrary_entries_round_trip() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let entry = (
        prop_oneof![Just(Operation::Keep), Just(Operation::Move)],
        "[0-9a-f]{1,16}",
        "[^\r\n]{1,24}",
    )
        .prop_map(|(operation, hash, path)| ManifestEntry::new(operation, hash, path));

    runner
        .run(&prop::collection::vec(entry, 1..8), |entries| {
            let mut manifest = Manifest::new();
            for entry in &entries {
                manifest.push_entry(entry.clone());
            }
            let parsed = Manifest::parse(&manifest.serialize()).unwrap();
            assert_eq!(parsed.entries().cloned().collect::<Vec<_>>(), entries);
            Ok(())
        })
        .unwrap();
}

/// Keeping one named copy and moving the rest never empties a group
#[test]
fn test_keep_one_move_other_keeps_a_copy() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let script = parse_script("if \"/a\" as keeper then keep keeper and move other").unwrap();

    runner
        .run(&listing_strategy(), |lines| {
            let tree = build_tree(&render(&lines), &[]).unwrap();
            let (manifest, _) = write_manifest(&tree, &classify(&tree), true).unwrap();
            let applied = apply_script(&manifest, &script).unwrap();
            assert!(applied.verify_keeps().is_ok());
            assert_eq!(applied.entries().count(), manifest.entries().count());
            Ok(())
        })
        .unwrap();
}
