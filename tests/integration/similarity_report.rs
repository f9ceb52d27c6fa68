//! Integration tests for classification and the duplicate reporter

use super::test_utils::listing;
use culler::similarity::{classify, collect_reports, find_similarities, SimilarityState};
use culler::tree::build_tree;

fn state_of(text: &str, path: &str) -> SimilarityState {
    let tree = build_tree(&listing(text), &[]).unwrap();
    let classification = classify(&tree);
    classification.state(tree.lookup(path).unwrap())
}

const MIXED: &str = "
    /photos/2019/a.jpg 100 pa
    /photos/2019/b.jpg 200 pb
    /backup/2019/a.jpg 100 pa
    /backup/2019/b.jpg 200 pb
    /backup/notes.txt 3 pn
    /scratch/a.jpg 100 pa
    /scratch/c.jpg 50 pc
    /misc/only.txt 7 po
";

#[test]
fn test_lattice_states() {
    assert_eq!(state_of(MIXED, "photos/2019"), SimilarityState::FullDuplicate);
    assert_eq!(state_of(MIXED, "backup"), SimilarityState::PartiallyUnique);
    assert_eq!(state_of(MIXED, "misc"), SimilarityState::Unique);
    assert_eq!(state_of(MIXED, "misc/only.txt"), SimilarityState::Unique);
    assert_eq!(state_of(MIXED, "scratch"), SimilarityState::PartiallyUnique);
}

#[test]
fn test_weak_duplicate_when_children_duplicated_separately() {
    let text = "
        /left/x 1 sx
        /left/y 2 sy
        /right/x 1 sx
        /other/y 2 sy
        /other/z 3 sz
    ";
    assert_eq!(state_of(text, "left"), SimilarityState::WeakDuplicate);
    assert_eq!(state_of(text, "other"), SimilarityState::PartiallyUnique);
}

#[test]
fn test_no_node_is_unknown() {
    let tree = build_tree(&listing(MIXED), &[]).unwrap();
    let classification = classify(&tree);
    for id in tree.preorder() {
        assert_ne!(
            classification.state(id),
            SimilarityState::Unknown,
            "{} is unknown",
            tree.full_path(id)
        );
    }
    let unknown = classification
        .counts()
        .iter()
        .find(|(state, _)| *state == SimilarityState::Unknown)
        .map(|(_, count)| *count);
    assert_eq!(unknown, Some(0));
}

#[test]
fn test_reports_cover_duplicate_group_once() {
    let tree = build_tree(&listing(MIXED), &[]).unwrap();
    let reports = collect_reports(&tree);

    let year_groups: Vec<Vec<&str>> = reports
        .iter()
        .filter(|r| r.state == SimilarityState::FullDuplicate)
        .map(|r| r.group.iter().map(|id| tree.full_path(*id)).collect::<Vec<&str>>())
        .filter(|paths| paths.iter().any(|p| p.ends_with("2019/")))
        .collect();
    // photos/ shares the hash of photos/2019/ and reports the same group again
    assert_eq!(year_groups.len(), 2);
    assert!(year_groups
        .iter()
        .all(|paths| paths == &vec!["/backup/2019/", "/photos/2019/"]));

    // photos/2019/ was covered by the report on backup/2019/
    assert!(reports
        .iter()
        .all(|r| tree.full_path(r.subject) != "/photos/2019/"));
}

#[test]
fn test_find_similarities_returns_the_classification() {
    let tree = build_tree(&listing(MIXED), &[]).unwrap();
    let mut seen = 0;
    let classification = find_similarities(&tree, |_| seen += 1);
    assert!(seen > 0);
    assert_eq!(
        classification.state(tree.lookup("misc").unwrap()),
        SimilarityState::Unique
    );
}
