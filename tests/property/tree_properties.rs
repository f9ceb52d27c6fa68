//! Structural properties of built and classified trees

use super::{listing_strategy, render};
use culler::similarity::{classify, collect_reports, SimilarityState};
use culler::tree::build_tree;
use std::collections::HashSet;

/// A directory with one child carries that child's hash
#[test]
fn test_single_child_bubble_up_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&listing_strategy(), |lines| {
            let tree = build_tree(&render(&lines), &[]).unwrap();
            for id in tree.preorder() {
                let children: Vec<_> = tree.children(id).collect();
                if children.len() == 1 {
                    assert_eq!(tree.node(id).hash, tree.node(children[0]).hash);
                }
            }
            Ok(())
        })
        .unwrap();
}

/// Directory sizes and file counts are the sums over their children
#[test]
fn test_aggregation_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&listing_strategy(), |lines| {
            let tree = build_tree(&render(&lines), &[]).unwrap();
            for id in tree.preorder() {
                if tree.is_file(id) {
                    assert_eq!(tree.node(id).file_count, 1);
                    continue;
                }
                let (size, count) = tree.children(id).fold((0, 0), |(s, c), child| {
                    let node = tree.node(child);
                    (s + node.size, c + node.file_count)
                });
                assert_eq!(tree.node(id).size, size);
                assert_eq!(tree.node(id).file_count, count);
            }
            let total: u64 = lines.iter().map(|(_, size, _)| size).sum();
            assert_eq!(tree.node(tree.root()).size, total);
            Ok(())
        })
        .unwrap();
}

/// Line order does not change any hash or state
#[test]
fn test_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&listing_strategy(), |lines| {
            let forward = build_tree(&render(&lines), &[]).unwrap();
            let mut reversed_lines = lines.clone();
            reversed_lines.reverse();
            let backward = build_tree(&render(&reversed_lines), &[]).unwrap();

            let forward_states = classify(&forward);
            let backward_states = classify(&backward);
            let a: Vec<_> = forward
                .preorder()
                .into_iter()
                .map(|id| (forward.full_path(id).to_string(), forward.node(id).hash, forward_states.state(id)))
                .collect();
            let b: Vec<_> = backward
                .preorder()
                .into_iter()
                .map(|id| (backward.full_path(id).to_string(), backward.node(id).hash, backward_states.state(id)))
                .collect();
            assert_eq!(a, b);
            Ok(())
        })
        .unwrap();
}

/// Classification never leaves a node Unknown
#[test]
fn test_classification_is_total() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&listing_strategy(), |lines| {
            let tree = build_tree(&render(&lines), &[]).unwrap();
            let classification = classify(&tree);
            for id in tree.preorder() {
                assert_ne!(classification.state(id), SimilarityState::Unknown);
            }
            Ok(())
        })
        .unwrap();
}

/// Every node is the subject of at most one report, groups share one hash,
/// and nothing below a full duplicate without same-hash children is a subject
#[test]
fn test_reports_cover_without_overlap() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&listing_strategy(), |lines| {
            let tree = build_tree(&render(&lines), &[]).unwrap();
            let classification = classify(&tree);
            let reports = collect_reports(&tree);

            let mut subjects = HashSet::new();
            for report in &reports {
                assert!(subjects.insert(report.subject));
                let hash = tree.node(report.subject).hash;
                assert!(report.group.iter().all(|id| tree.node(*id).hash == hash));
            }

            for id in tree.preorder() {
                if classification.state(id) == SimilarityState::FullDuplicate
                    && !tree.has_child_with_same_hash(id)
                {
                    for child in tree.children(id) {
                        assert!(!subjects.contains(&child));
                    }
                }
            }
            Ok(())
        })
        .unwrap();
}
