//! Shared fixtures for Curie tests.

use curie_common::{Modifier, ModifierSet};
use serde_json::{Map, Value};

/// Modifier set with exactly the given flags set.
pub fn modifiers(set: &[Modifier]) -> ModifierSet {
    set.iter().copied().collect()
}

/// Every one of the 128 possible modifier sets, starting with the empty set.
pub fn all_modifier_sets() -> impl Iterator<Item = ModifierSet> {
    (0u8..1 << Modifier::ALL.len()).map(|mask| {
        Modifier::ALL
            .into_iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, m)| m)
            .collect()
    })
}

/// JSON object in the front end's wire form, listing only the set flags.
pub fn modifiers_json(set: &[Modifier]) -> Value {
    let map: Map<String, Value> = set
        .iter()
        .map(|m| (m.key().to_string(), Value::Bool(true)))
        .collect();
    Value::Object(map)
}
