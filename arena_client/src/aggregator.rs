use std::collections::{HashMap, HashSet};

use ahash::RandomState;
use arena_schema::{ActiveTrait, GameUnit};
use tracing::warn;

use crate::catalog::{normalize_trait_id, TraitCatalog};

/// Which unit positions contribute to trait counts.
///
/// Standard genre convention is board-only; bench inclusion is kept as an
/// explicit policy rather than a hardcoded assumption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraitScope {
    #[default]
    BoardOnly,
    BoardAndBench,
}

/// Result of one aggregation pass.
///
/// `unknown_traits` lists trait ids referenced by units but absent from the
/// catalog, a configuration error that is reported rather than silently
/// dropped, since omission would hide a real roster effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub active: Vec<ActiveTrait>,
    pub unknown_traits: Vec<String>,
}

/// Convert a roster into its active traits.
///
/// For each distinct trait id referenced by an in-scope unit, counts the
/// distinct units carrying it (a unit contributes at most once per trait,
/// regardless of duplicates in its own trait list) and selects the highest
/// breakpoint whose `min_units` does not exceed the count. Traits below
/// their lowest breakpoint produce no entry. Pure and idempotent; the
/// output is sorted by trait id for determinism but carries no semantic
/// order.
pub fn aggregate_traits(
    units: &[GameUnit],
    catalog: &TraitCatalog,
    scope: TraitScope,
) -> Aggregation {
    let mut contributors: HashMap<String, HashSet<&str, RandomState>, RandomState> =
        HashMap::default();
    for unit in units {
        let in_scope = match scope {
            TraitScope::BoardOnly => unit.is_on_board(),
            TraitScope::BoardAndBench => true,
        };
        if !in_scope {
            continue;
        }
        for trait_name in &unit.traits {
            contributors
                .entry(normalize_trait_id(trait_name))
                .or_default()
                .insert(unit.id.as_str());
        }
    }

    let table = catalog.table();
    let mut aggregation = Aggregation::default();
    for (trait_id, units_with_trait) in contributors {
        let count = units_with_trait.len() as u32;
        let Some(definition) = table.get(&trait_id) else {
            warn!(trait_id = %trait_id, "no trait definition registered for trait");
            aggregation.unknown_traits.push(trait_id);
            continue;
        };
        let Some(active_level) = definition
            .effects
            .iter()
            .rposition(|effect| effect.min_units <= count)
        else {
            // below the lowest breakpoint: omitted, not emitted at level 0
            continue;
        };
        aggregation.active.push(ActiveTrait {
            id: definition.id.clone(),
            name: definition.name.clone(),
            description: definition.description.clone(),
            count,
            active_level: active_level as u32,
        });
    }

    aggregation.active.sort_by(|a, b| a.id.cmp(&b.id));
    aggregation.unknown_traits.sort();
    aggregation
}
