//! Duplication states assigned to tree nodes

use serde::Serialize;
use std::fmt;

/// Five-state duplication lattice.
///
/// `FullDuplicate` means the node's hash occurs elsewhere. `WeakDuplicate`
/// means every child is duplicated somewhere, but not as one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityState {
    Unknown,
    FullDuplicate,
    WeakDuplicate,
    PartiallyUnique,
    Unique,
}

impl SimilarityState {
    /// Single-character code used in compact reports
    pub fn code(self) -> char {
        match self {
            SimilarityState::Unknown => 'x',
            SimilarityState::FullDuplicate => 'D',
            SimilarityState::WeakDuplicate => 'd',
            SimilarityState::PartiallyUnique => 'u',
            SimilarityState::Unique => 'U',
        }
    }

    pub fn is_duplicate(self) -> bool {
        matches!(
            self,
            SimilarityState::FullDuplicate | SimilarityState::WeakDuplicate
        )
    }

    pub fn is_unique(self) -> bool {
        matches!(
            self,
            SimilarityState::Unique | SimilarityState::PartiallyUnique
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            SimilarityState::Unknown => "unknown",
            SimilarityState::FullDuplicate => "full_duplicate",
            SimilarityState::WeakDuplicate => "weak_duplicate",
            SimilarityState::PartiallyUnique => "partially_unique",
            SimilarityState::Unique => "unique",
        }
    }
}

impl fmt::Display for SimilarityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
