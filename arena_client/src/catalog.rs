use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use ahash::RandomState;
use arena_schema::{TraitDefinition, TraitEffect, TraitKind, TraitStyle};
use thiserror::Error;
use tracing::info;

/// Lookup table behind the catalog; replaced wholesale, never edited.
pub type TraitTable = HashMap<String, TraitDefinition, RandomState>;

/// Normalize a trait name into its catalog id: lowercase, with whitespace
/// runs collapsed to a single underscore. Leading and trailing whitespace
/// is trimmed rather than turned into separator underscores, so `" straw
/// hat "` resolves to `straw_hat`, not `_straw_hat_`. Idempotent, so
/// normalized ids pass through unchanged ("Straw Hat", "straw hat" and
/// "STRAW_HAT" all resolve to `straw_hat`).
pub fn normalize_trait_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.trim().chars() {
        if ch.is_whitespace() {
            pending_separator = !id.is_empty();
        } else {
            if pending_separator {
                id.push('_');
                pending_separator = false;
            }
            id.extend(ch.to_lowercase());
        }
    }
    id
}

/// Error raised when a trait-definition bulk load or animation table is
/// rejected. Any variant aborts the whole load; the previous catalog stays
/// visible untouched.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("trait definition {index} has an empty id after normalization")]
    EmptyTraitId { index: usize },
    #[error("duplicate trait id {id}")]
    DuplicateTrait { id: String },
    #[error("trait {id} has no breakpoint effects")]
    NoEffects { id: String },
    #[error("trait {id} has a zero minUnits threshold")]
    ZeroThreshold { id: String },
    #[error("trait {id} breakpoints are not strictly increasing")]
    BreakpointsNotAscending { id: String },
    #[error("animation {table} table is missing the _default entry")]
    MissingDefault { table: &'static str },
    #[error("trait definition payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Registry of trait definitions with atomic hot-swap.
///
/// Readers clone the inner `Arc` and work against one consistent table;
/// [`TraitCatalog::replace_all`] validates the incoming set completely
/// before swapping it in, so a concurrent reader observes either the old
/// table or the new one, never a mix. Intended to be owned and injected,
/// not held as ambient global state.
pub struct TraitCatalog {
    table: RwLock<Arc<TraitTable>>,
}

impl TraitCatalog {
    /// Empty catalog, for sessions that load definitions from the server
    /// before anything renders.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Arc::new(TraitTable::default())),
        }
    }

    /// Catalog preloaded with the built-in definitions, used until a
    /// server-provided set arrives.
    pub fn with_builtins() -> Self {
        let catalog = Self::new();
        catalog
            .replace_all(builtin_traits())
            .expect("built-in trait table is valid");
        catalog
    }

    /// Atomically replace every entry with the given set.
    ///
    /// All-or-nothing: validation failures leave the previous table
    /// visible to readers. Definition ids are normalized on the way in.
    pub fn replace_all(&self, definitions: Vec<TraitDefinition>) -> Result<(), CatalogError> {
        let mut table = TraitTable::with_capacity_and_hasher(definitions.len(), RandomState::new());
        for (index, mut definition) in definitions.into_iter().enumerate() {
            let id = normalize_trait_id(&definition.id);
            if id.is_empty() {
                return Err(CatalogError::EmptyTraitId { index });
            }
            validate_effects(&id, &definition.effects)?;
            definition.id = id.clone();
            if table.insert(id.clone(), definition).is_some() {
                return Err(CatalogError::DuplicateTrait { id });
            }
        }

        let count = table.len();
        let mut guard = self.table.write().expect("trait catalog lock poisoned");
        *guard = Arc::new(table);
        drop(guard);
        info!(traits = count, "trait catalog replaced");
        Ok(())
    }

    /// Replace the catalog from a JSON array of trait definitions, the
    /// shape the server sends on game/config load.
    pub fn replace_all_from_json(&self, payload: &str) -> Result<(), CatalogError> {
        let definitions: Vec<TraitDefinition> = serde_json::from_str(payload)?;
        self.replace_all(definitions)
    }

    /// Current table as one consistent view. Callers doing several lookups
    /// against the same tick should hold this instead of calling
    /// [`TraitCatalog::lookup`] repeatedly.
    pub fn table(&self) -> Arc<TraitTable> {
        Arc::clone(&self.table.read().expect("trait catalog lock poisoned"))
    }

    /// Look up a definition by display name or id; the query is normalized
    /// before matching.
    pub fn lookup(&self, name: &str) -> Option<TraitDefinition> {
        self.table().get(&normalize_trait_id(name)).cloned()
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }
}

impl Default for TraitCatalog {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn validate_effects(id: &str, effects: &[TraitEffect]) -> Result<(), CatalogError> {
    if effects.is_empty() {
        return Err(CatalogError::NoEffects { id: id.to_string() });
    }
    let mut previous = 0u32;
    for effect in effects {
        if effect.min_units == 0 {
            return Err(CatalogError::ZeroThreshold { id: id.to_string() });
        }
        if effect.min_units <= previous {
            return Err(CatalogError::BreakpointsNotAscending { id: id.to_string() });
        }
        previous = effect.min_units;
    }
    Ok(())
}

fn effect(min_units: u32, description: &str, style: TraitStyle) -> TraitEffect {
    TraitEffect {
        min_units,
        description: description.to_string(),
        style,
    }
}

/// Built-in trait definitions, mirrored from the default game data. A
/// server-provided bulk load replaces these wholesale.
pub fn builtin_traits() -> Vec<TraitDefinition> {
    vec![
        TraitDefinition {
            id: "straw_hat".into(),
            name: "Straw Hat".into(),
            description: "Straw Hat crew members gain health and attack speed.".into(),
            kind: TraitKind::Origin,
            effects: vec![
                effect(2, "+200 health, +10% attack speed", TraitStyle::Bronze),
                effect(4, "+400 health, +25% attack speed", TraitStyle::Silver),
                effect(6, "+700 health, +50% attack speed", TraitStyle::Gold),
            ],
            icon_color: Some("#ef4444".into()),
        },
        TraitDefinition {
            id: "fighter".into(),
            name: "Fighter".into(),
            description: "Fighters gain bonus health.".into(),
            kind: TraitKind::Class,
            effects: vec![
                effect(2, "+150 health", TraitStyle::Bronze),
                effect(4, "+350 health", TraitStyle::Silver),
                effect(6, "+700 health", TraitStyle::Gold),
            ],
            icon_color: Some("#f59e0b".into()),
        },
        TraitDefinition {
            id: "navigator".into(),
            name: "Navigator".into(),
            description: "The Navigator grants bonus mana regeneration to the whole board.".into(),
            kind: TraitKind::Class,
            effects: vec![effect(1, "Board-wide mana regeneration", TraitStyle::Gold)],
            icon_color: Some("#38bdf8".into()),
        },
    ]
}
