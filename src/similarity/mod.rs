//! Duplicate detection over a hashed tree
//!
//! [`classify`] assigns every node a [`SimilarityState`]; [`find_similarities`]
//! walks the classified tree and emits a non-redundant set of [`Report`]s.

pub mod classify;
pub mod index;
pub mod report;
pub mod state;

pub use classify::{classify, Classification};
pub use index::HashIndex;
pub use report::{collect_reports, find_similarities, report_similarities, Report};
pub use state::SimilarityState;
