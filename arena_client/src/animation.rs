use std::collections::HashMap;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogError;

/// Key of the mandatory fallback entry in both animation tables.
pub const DEFAULT_ANIMATION_KEY: &str = "_default";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttackStyle {
    Punch,
    Slash,
    Projectile,
}

/// Auto-attack presentation for one unit template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttackAnimation {
    #[serde(rename = "type")]
    pub style: AttackStyle,
    pub color: String,
}

/// Ability-cast presentation for one unit template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AbilityAnimation {
    pub color: String,
}

type AttackTable = HashMap<String, AttackAnimation, RandomState>;
type AbilityTable = HashMap<String, AbilityAnimation, RandomState>;

/// Static animation configuration keyed by unit `definition_id`.
///
/// Lookups always succeed: an unrecognized definition id resolves to the
/// `_default` entry. That fallback is mandatory; construction fails with
/// [`CatalogError::MissingDefault`] when either table lacks it, so a
/// missing fallback is a load-time configuration error rather than a
/// render-time gap.
pub struct AnimationRegistry {
    attack: AttackTable,
    ability: AbilityTable,
    attack_default: AttackAnimation,
    ability_default: AbilityAnimation,
}

impl AnimationRegistry {
    pub fn new(attack: AttackTable, ability: AbilityTable) -> Result<Self, CatalogError> {
        let attack_default = attack
            .get(DEFAULT_ANIMATION_KEY)
            .cloned()
            .ok_or(CatalogError::MissingDefault { table: "attack" })?;
        let ability_default = ability
            .get(DEFAULT_ANIMATION_KEY)
            .cloned()
            .ok_or(CatalogError::MissingDefault { table: "ability" })?;
        Ok(Self {
            attack,
            ability,
            attack_default,
            ability_default,
        })
    }

    /// Registry carrying the built-in per-unit tables.
    pub fn with_builtins() -> Self {
        let attack: AttackTable = [
            ("luffy_v1", AttackStyle::Punch, "#f59e0b"),
            ("zoro_v1", AttackStyle::Slash, "#22c55e"),
            ("nami_v1", AttackStyle::Projectile, "#38bdf8"),
            ("charmander", AttackStyle::Punch, "#f97316"),
            ("squirtle", AttackStyle::Projectile, "#3b82f6"),
            ("bulbasaur", AttackStyle::Slash, "#22c55e"),
            (DEFAULT_ANIMATION_KEY, AttackStyle::Punch, "#94a3b8"),
        ]
        .into_iter()
        .map(|(id, style, color)| {
            (
                id.to_string(),
                AttackAnimation {
                    style,
                    color: color.to_string(),
                },
            )
        })
        .collect();

        let ability: AbilityTable = [
            ("luffy_v1", "#ef4444"),
            ("zoro_v1", "#22c55e"),
            ("nami_v1", "#38bdf8"),
            ("charmander", "#f97316"),
            ("squirtle", "#3b82f6"),
            ("bulbasaur", "#22c55e"),
            (DEFAULT_ANIMATION_KEY, "#fbbf24"),
        ]
        .into_iter()
        .map(|(id, color)| {
            (
                id.to_string(),
                AbilityAnimation {
                    color: color.to_string(),
                },
            )
        })
        .collect();

        Self::new(attack, ability).expect("built-in animation tables carry _default")
    }

    /// Attack animation for a unit template, falling back to `_default`
    /// for unrecognized ids.
    pub fn attack_config(&self, definition_id: &str) -> &AttackAnimation {
        self.attack
            .get(definition_id)
            .unwrap_or(&self.attack_default)
    }

    /// Ability animation for a unit template, falling back to `_default`
    /// for unrecognized ids.
    pub fn ability_config(&self, definition_id: &str) -> &AbilityAnimation {
        self.ability
            .get(definition_id)
            .unwrap_or(&self.ability_default)
    }
}
