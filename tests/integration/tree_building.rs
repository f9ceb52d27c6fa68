//! Integration tests for tree building from listings

use super::test_utils::{hash_of, listing};
use culler::error::LoadError;
use culler::tree::{build_tree, merge_trees, name_roots_alphabetically, TreeBuilder};

#[test]
fn test_single_child_hash_bubbles_up() {
    let text = listing(
        "a1/b1/c1 1 c11
         a1/b1/c2 2 c22
         a2/b2/c1 1 c11",
    );
    let tree = build_tree(&text, &[]).unwrap();

    assert_eq!(hash_of(&tree, "a1"), hash_of(&tree, "a1/b1"));
    assert_ne!(hash_of(&tree, "a1/b1/c1"), hash_of(&tree, "a1/b1/c2"));
    assert_eq!(hash_of(&tree, "a1/b1/c1"), hash_of(&tree, "a2/b2/c1"));
    assert_eq!(hash_of(&tree, "a2"), hash_of(&tree, "a2/b2/c1"));
}

#[test]
fn test_sizes_and_counts_aggregate() {
    let text = listing(
        "/d/x 10 s1
         /d/e/y 20 s2
         /d/e/z 30 s3
         /f 5 s4",
    );
    let tree = build_tree(&text, &[]).unwrap();
    let d = tree.node(tree.lookup("d").unwrap());
    assert_eq!((d.size, d.file_count), (60, 3));
    let root = tree.node(tree.root());
    assert_eq!((root.size, root.file_count), (65, 4));
}

#[test]
fn test_same_listing_in_any_order_gives_same_hashes() {
    let forward = listing("/a/x 1 s1\n/a/y 2 s2\n/b/z 3 s3");
    let backward = listing("/b/z 3 s3\n/a/y 2 s2\n/a/x 1 s1");
    let one = build_tree(&forward, &[]).unwrap();
    let two = build_tree(&backward, &[]).unwrap();
    assert_eq!(one.node(one.root()).hash, two.node(two.root()).hash);
}

#[test]
fn test_ignored_names_drop_whole_lines() {
    let text = listing("/a/x 1 s1\n/a/Thumbs.db 9 s9\n/a/cache/y 2 s2");
    let tree = TreeBuilder::new()
        .with_ignored_names(["Thumbs.db", "cache"])
        .build_from_str(&text)
        .unwrap();
    assert!(tree.lookup("a/Thumbs.db").is_none());
    assert!(tree.lookup("a/cache").is_none());
    assert_eq!(tree.node(tree.root()).size, 1);
}

#[test]
fn test_bad_lines_are_reported_with_line_numbers() {
    let err = build_tree("/a\t1\ts\n/b\tx\ts\n", &[]).unwrap_err();
    assert!(matches!(err, LoadError::BadSize { line: 2, .. }));

    let err = build_tree("/a\t1\n", &[]).unwrap_err();
    assert!(matches!(err, LoadError::BadColumnCount { line: 1, columns: 2, .. }));

    let err = build_tree("/a\t1\ts\n/a/b\t1\ts\n", &[]).unwrap_err();
    assert!(matches!(err, LoadError::PathConflict { line: 2, .. }));
}

#[test]
fn test_merged_listings_get_letter_roots() {
    let mut trees = vec![
        build_tree(&listing("/p/x 1 s1"), &[]).unwrap(),
        build_tree(&listing("/q/x 1 s1"), &[]).unwrap(),
        build_tree(&listing("/r/y 2 s2"), &[]).unwrap(),
    ];
    name_roots_alphabetically(&mut trees).unwrap();
    let merged = merge_trees(trees).unwrap();

    assert_eq!(merged.full_path(merged.lookup("c/r/y").unwrap()), "/c/r/y");
    assert_eq!(hash_of(&merged, "a/p"), hash_of(&merged, "b/q"));
    let root = merged.node(merged.root());
    assert_eq!((root.size, root.file_count), (4, 3));
}

#[test]
fn test_merge_without_naming_fails() {
    let trees = vec![
        build_tree(&listing("/p/x 1 s1"), &[]).unwrap(),
        build_tree(&listing("/q/x 1 s1"), &[]).unwrap(),
    ];
    assert!(matches!(
        merge_trees(trees),
        Err(LoadError::DuplicateRootName(_))
    ));
}
