//! Minimal covering set of similarity reports

use crate::similarity::classify::{classify, Classification};
use crate::similarity::state::SimilarityState;
use crate::tree::Tree;
use crate::types::NodeId;
use std::collections::HashSet;
use tracing::debug;

/// One report emitted by [`find_similarities`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Node the walk was visiting
    pub subject: NodeId,
    pub state: SimilarityState,
    /// Nodes sharing the subject's hash, sorted by full path
    pub group: Vec<NodeId>,
}

/// Classify `tree` and report it top-down.
///
/// Nodes that already appeared in an earlier report's group do not trigger the
/// callback again. A `FullDuplicate` subtree is not descended into unless a
/// direct child shares its hash.
pub fn find_similarities<F>(tree: &Tree, on_report: F) -> Classification
where
    F: FnMut(&Report),
{
    let classification = classify(tree);
    report_similarities(tree, &classification, on_report);
    classification
}

/// Walk an existing classification
pub fn report_similarities<F>(tree: &Tree, classification: &Classification, mut on_report: F)
where
    F: FnMut(&Report),
{
    let mut reported: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![tree.root()];

    while let Some(id) = stack.pop() {
        let state = classification.state(id);
        reported = visit(tree, classification, id, state, reported, &mut on_report);

        if state == SimilarityState::FullDuplicate && !tree.has_child_with_same_hash(id) {
            debug!(path = tree.full_path(id), "Full duplicate, not descending");
            continue;
        }
        let children: Vec<NodeId> = tree.children(id).collect();
        stack.extend(children.into_iter().rev());
    }
}

fn visit<F>(
    tree: &Tree,
    classification: &Classification,
    id: NodeId,
    state: SimilarityState,
    mut reported: HashSet<NodeId>,
    on_report: &mut F,
) -> HashSet<NodeId>
where
    F: FnMut(&Report),
{
    let group = classification.group(tree, id);
    if !reported.contains(&id) {
        debug!(path = tree.full_path(id), state = %state, "Reporting node");
        on_report(&Report {
            subject: id,
            state,
            group: group.to_vec(),
        });
    }
    reported.insert(id);
    reported.extend(group.iter().copied());
    reported
}

/// Collect every report of `tree` in walk order
pub fn collect_reports(tree: &Tree) -> Vec<Report> {
    let mut reports = Vec::new();
    find_similarities(tree, |report| reports.push(report.clone()));
    reports
}
