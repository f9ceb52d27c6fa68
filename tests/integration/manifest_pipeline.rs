//! Integration tests for listing -> manifest -> rules -> verify

use super::test_utils::listing;
use culler::error::ManifestError;
use culler::manifest::{write_manifest, Manifest, Operation};
use culler::rules::{apply_script, parse_script};
use culler::similarity::classify;
use culler::tree::build_tree;

const LISTING: &str = "
    /home/photos/2019/a.jpg 2048 pa
    /home/photos/2019/b.jpg 1024 pb
    /mnt/old/photos-2019/a.jpg 2048 pa
    /mnt/old/photos-2019/b.jpg 1024 pb
    /mnt/usb/photos-2019/a.jpg 2048 pa
    /mnt/usb/photos-2019/b.jpg 1024 pb
    /home/notes.txt 10 pn
";

#[test]
fn test_full_pipeline() {
    let tree = build_tree(&listing(LISTING), &[]).unwrap();
    let classification = classify(&tree);
    let (manifest, summary) = write_manifest(&tree, &classification, false).unwrap();

    assert_eq!(summary.groups, 1);
    assert_eq!(summary.entries, 3);
    assert_eq!(summary.reclaimable, 2 * 3072);
    let text = manifest.serialize();
    assert!(text.contains("# 3 dirs, each 3.0KB in 2 files\n#\n"));
    assert!(text.ends_with("# Total 6.0KB of duplicates to remove\n"));

    let reparsed = Manifest::parse(&text).unwrap();
    assert_eq!(reparsed, manifest);

    let script = parse_script("if \"/home/\" as h and other then keep h and move other").unwrap();
    let applied = apply_script(&reparsed, &script).unwrap();
    applied.verify_keeps().unwrap();

    let ops: Vec<(Operation, &str)> = applied
        .entries()
        .map(|e| (e.operation, e.path.as_str()))
        .collect();
    assert_eq!(
        ops,
        vec![
            (Operation::Keep, "/home/photos/2019/"),
            (Operation::Move, "/mnt/old/photos-2019/"),
            (Operation::Move, "/mnt/usb/photos-2019/"),
        ]
    );
}

#[test]
fn test_moving_every_copy_fails_verification() {
    let tree = build_tree(&listing(LISTING), &[]).unwrap();
    let (manifest, _) = write_manifest(&tree, &classify(&tree), false).unwrap();
    let script = parse_script("if \"photos\" as p then move p").unwrap();
    let applied = apply_script(&manifest, &script).unwrap();
    assert!(matches!(
        applied.verify_keeps(),
        Err(ManifestError::NoKeep { hashes }) if hashes.len() == 1
    ));
}

#[test]
fn test_illegal_manifest_line() {
    let err = Manifest::parse("keep\th\t/a/\nkeep h /b/\n").unwrap_err();
    assert_eq!(
        err,
        ManifestError::IllegalLine {
            line: 2,
            text: "keep h /b/".to_string()
        }
    );
}
