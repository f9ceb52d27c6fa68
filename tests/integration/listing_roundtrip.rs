//! Integration tests for generated listings feeding the tree builder

use culler::listing::{generate_listing, HashMode, Signer, WalkerConfig, DEFAULT_SAMPLE_SIZE};
use culler::similarity::{classify, SimilarityState};
use culler::tree::build_tree;
use std::fs;
use tempfile::TempDir;

fn populate(root: &std::path::Path) {
    for copy in ["original", "copy"] {
        let dir = root.join(copy).join("docs");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("a.txt"), "alpha").unwrap();
        fs::write(dir.join("b.txt"), "beta").unwrap();
    }
    fs::write(root.join("original").join("unique.txt"), "only here").unwrap();
}

fn list(root: &std::path::Path, mode: HashMode) -> String {
    let mut out = Vec::new();
    generate_listing(
        root,
        Signer::new(mode, DEFAULT_SAMPLE_SIZE),
        WalkerConfig::default(),
        &mut out,
    )
    .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_listing_detects_copied_directory() {
    let temp = TempDir::new().unwrap();
    populate(temp.path());

    for mode in [HashMode::Full, HashMode::Sample, HashMode::NameSize] {
        let text = list(temp.path(), mode);
        assert_eq!(text.lines().count(), 5, "{mode}");

        let tree = build_tree(&text, &[]).unwrap();
        let classification = classify(&tree);
        let docs = tree
            .preorder()
            .into_iter()
            .filter(|id| tree.full_path(*id).ends_with("/docs/"))
            .collect::<Vec<_>>();
        assert_eq!(docs.len(), 2);
        for id in docs {
            assert_eq!(classification.state(id), SimilarityState::FullDuplicate);
        }
    }
}

#[test]
fn test_listing_is_sorted_and_stable() {
    let temp = TempDir::new().unwrap();
    populate(temp.path());
    let first = list(temp.path(), HashMode::Full);
    let second = list(temp.path(), HashMode::Full);
    assert_eq!(first, second);

    let paths: Vec<&str> = first.lines().map(|l| l.split('\t').next().unwrap()).collect();
    let mut sorted = paths.clone();
    sorted.sort();
    assert_eq!(paths, sorted);
}

#[test]
fn test_full_mode_tells_different_content_apart() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a"), "same size 1").unwrap();
    fs::write(temp.path().join("b"), "same size 2").unwrap();

    let full = list(temp.path(), HashMode::Full);
    let sigs: Vec<&str> = full.lines().map(|l| l.rsplit('\t').next().unwrap()).collect();
    assert_ne!(sigs[0], sigs[1]);
    assert!(sigs.iter().all(|s| s.starts_with('h')));
}
