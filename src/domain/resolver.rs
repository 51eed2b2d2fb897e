//! Entity resolution: map question tokens onto known fund names.

use std::collections::BTreeSet;

/// Resolve candidate tokens against the known-entity set.
///
/// Exact token matches win. Only when there are none, every known entity that
/// contains any token as a substring is returned instead.
pub fn resolve_entities(tokens: &BTreeSet<String>, known: &BTreeSet<String>) -> BTreeSet<String> {
    let exact: BTreeSet<String> = tokens.intersection(known).cloned().collect();
    if !exact.is_empty() {
        return exact;
    }

    known
        .iter()
        .filter(|entity| {
            let entity = entity.to_lowercase();
            tokens.iter().any(|t| entity.contains(&t.to_lowercase()))
        })
        .cloned()
        .collect()
}
