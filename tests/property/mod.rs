//! Property-based tests over generated listings

mod manifest_properties;
mod tree_properties;

use proptest::prelude::*;
use std::collections::BTreeMap;

/// Listings with up to three directory levels over names `a`, `b`, `c`.
///
/// File names start with `f` so a path is never both a file and a directory,
/// and the size is derived from the signature so equal hashes mean equal sizes.
pub fn listing_strategy() -> impl Strategy<Value = Vec<(String, u64, String)>> {
    prop::collection::vec(
        (
            prop::collection::vec(0..3usize, 0..4),
            0..4usize,
            0..5u64,
        ),
        1..24,
    )
    .prop_map(|entries| {
        let mut unique: BTreeMap<String, (u64, String)> = BTreeMap::new();
        for (dirs, leaf, signature) in entries {
            let mut path = String::new();
            for dir in dirs {
                path.push('/');
                path.push(['a', 'b', 'c'][dir]);
            }
            path.push_str(&format!("/f{}", leaf));
            unique.insert(path, ((signature + 1) * 10, format!("s{}", signature)));
        }
        unique
            .into_iter()
            .map(|(path, (size, signature))| (path, size, signature))
            .collect()
    })
}

pub fn render(lines: &[(String, u64, String)]) -> String {
    lines
        .iter()
        .map(|(path, size, signature)| format!("{}\t{}\t{}\n", path, size, signature))
        .collect()
}
