//! Applying rule scripts to manifests
//!
//! Every instruction is evaluated against every hash group on its own. The
//! per-entry results are then combined in script order, and an entry that two
//! instructions want to treat differently aborts the whole transform.

use crate::error::{ApiError, RuleError};
use crate::manifest::{Manifest, ManifestEntry, ManifestLine, Operation};
use crate::rules::script::{parse_script, Instruction, Pattern, Script, DEFAULT_OTHER_ALIAS};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, info};

/// An entry bound by one condition term
struct Binding<'a> {
    index: usize,
    alias: Option<&'a str>,
}

impl Binding<'_> {
    /// Unaliased terms only filter, and unaliased actions bind nothing.
    fn targeted_by(&self, action_alias: Option<&str>) -> bool {
        action_alias.is_some() && self.alias == action_alias
    }
}

/// Apply one instruction to one hash group.
///
/// Returns only the entries an action was applied to, in group order. An
/// instruction whose literal term matches nothing, or whose `other` set is
/// empty, returns nothing.
pub fn apply_instruction(
    instruction: &Instruction,
    group: &[&ManifestEntry],
) -> Result<Vec<ManifestEntry>, RuleError> {
    check_same_hash(group)?;

    let mut bindings: Vec<Binding<'_>> = Vec::new();
    let mut claimed: HashSet<usize> = HashSet::new();

    for term in &instruction.matches {
        let Pattern::Literal(needle) = &term.pattern else {
            continue;
        };
        let matched: Vec<usize> = group
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.path.contains(needle.as_str()))
            .map(|(index, _)| index)
            .collect();
        if matched.is_empty() {
            return Ok(Vec::new());
        }
        claimed.extend(matched.iter().copied());
        bindings.extend(matched.into_iter().map(|index| Binding {
            index,
            alias: term.alias.as_deref(),
        }));
    }

    let other_terms: Vec<Option<&str>> = instruction
        .matches
        .iter()
        .filter(|term| term.pattern == Pattern::Other)
        .map(|term| term.binding_alias())
        .collect();
    let other_defined = instruction
        .matches
        .iter()
        .any(|term| term.binding_alias() == Some(DEFAULT_OTHER_ALIAS));
    let implicit_other = !other_defined
        && instruction
            .actions
            .iter()
            .any(|action| action.alias.as_deref() == Some(DEFAULT_OTHER_ALIAS));

    if !other_terms.is_empty() || implicit_other {
        let remainder: Vec<usize> = (0..group.len()).filter(|i| !claimed.contains(i)).collect();
        if remainder.is_empty() {
            return Ok(Vec::new());
        }
        for alias in &other_terms {
            bindings.extend(remainder.iter().map(|&index| Binding {
                index,
                alias: *alias,
            }));
        }
        if implicit_other {
            bindings.extend(remainder.iter().map(|&index| Binding {
                index,
                alias: Some(DEFAULT_OTHER_ALIAS),
            }));
        }
    }

    let mut assigned: BTreeMap<usize, BTreeSet<Operation>> = BTreeMap::new();
    for action in &instruction.actions {
        for binding in bindings
            .iter()
            .filter(|b| b.targeted_by(action.alias.as_deref()))
        {
            assigned
                .entry(binding.index)
                .or_default()
                .insert(action.operation);
        }
    }

    let contradictory: Vec<String> = assigned
        .iter()
        .filter(|(_, operations)| operations.len() > 1)
        .map(|(index, _)| group[*index].path.clone())
        .collect();
    if !contradictory.is_empty() {
        return Err(RuleError::ContradictoryActions {
            instruction: instruction.source.clone(),
            entries: contradictory,
        });
    }

    Ok(assigned
        .into_iter()
        .filter_map(|(index, operations)| {
            operations
                .into_iter()
                .next()
                .map(|operation| group[index].with_operation(operation))
        })
        .collect())
}

fn check_same_hash(group: &[&ManifestEntry]) -> Result<(), RuleError> {
    let Some(first) = group.first() else {
        return Ok(());
    };
    match group.iter().find(|entry| entry.hash != first.hash) {
        Some(entry) => Err(RuleError::MixedHashGroup {
            expected: first.hash.clone(),
            found: entry.hash.clone(),
            path: entry.path.clone(),
        }),
        None => Ok(()),
    }
}

/// Rewrite `manifest` according to `script`. Passthrough lines are copied unchanged.
pub fn apply_script(manifest: &Manifest, script: &Script) -> Result<Manifest, RuleError> {
    let groups = manifest.hash_groups();

    // results[hash][i] holds what instruction i did to that group.
    let mut results: BTreeMap<&str, Vec<Vec<ManifestEntry>>> = BTreeMap::new();
    for (hash, group) in &groups {
        let per_instruction = script
            .instructions
            .iter()
            .map(|instruction| apply_instruction(instruction, group))
            .collect::<Result<Vec<_>, _>>()?;
        results.insert(*hash, per_instruction);
    }

    let mut output = Manifest::new();
    let mut changed = 0usize;
    for line in &manifest.lines {
        let entry = match line {
            ManifestLine::Entry(entry) => entry,
            ManifestLine::Passthrough(_) => {
                output.lines.push(line.clone());
                continue;
            }
        };

        let mut result = entry.clone();
        let mut asserted: BTreeMap<Operation, &Instruction> = BTreeMap::new();
        let per_instruction = results
            .get(entry.hash.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        for (instruction, modified) in script.instructions.iter().zip(per_instruction) {
            if let Some(found) = modified.iter().find(|m| m.path == entry.path) {
                result = found.clone();
                asserted.entry(found.operation).or_insert(instruction);
            }
        }
        if asserted.len() > 1 {
            return Err(RuleError::ContradictoryInstructions {
                entry: entry.to_string(),
                instructions: asserted.values().map(|i| i.source.clone()).collect(),
            });
        }
        if result.operation != entry.operation {
            debug!(path = %entry.path, from = %entry.operation, to = %result.operation, "Operation changed");
            changed += 1;
        }
        output.push_entry(result);
    }

    info!(
        groups = groups.len(),
        instructions = script.len(),
        changed,
        "Script applied"
    );
    Ok(output)
}

/// Parse both texts, apply the script and render the resulting manifest
pub fn apply_script_text(manifest: &str, script: &str) -> Result<String, ApiError> {
    let manifest = Manifest::parse(manifest)?;
    let script = parse_script(script)?;
    Ok(apply_script(&manifest, &script)?.serialize())
}
