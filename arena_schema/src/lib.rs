//! Wire-facing data model for the arena autobattler client.
//!
//! Mirrors the authoritative server's JSON contract: snapshots arrive as
//! self-contained [`GameState`] documents every tick, and player intents
//! leave as [`GameAction`] requests. Field names follow the authority's
//! camelCase spelling; closed enums replace the wire's string tags.

use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};

use ahash::RandomState;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board columns; valid board x is `0..BOARD_WIDTH`.
pub const BOARD_WIDTH: i32 = 7;
/// Board rows; valid board y is `0..BOARD_HEIGHT`.
pub const BOARD_HEIGHT: i32 = 8;
/// Bench capacity; a benched unit has `y == BENCH_ROW` and x as slot index.
pub const BENCH_SLOTS: i32 = 9;
/// Sentinel row encoding "on the bench".
pub const BENCH_ROW: i32 = -1;
/// Shop slot count; valid shop index is `0..SHOP_SLOTS`.
pub const SHOP_SLOTS: u32 = 5;

/// Coarse round stage. Transitions are monotonic within one game instance
/// when ordered by `(round, phase.rank())`; only a new `roomId` resets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Lobby,
    Planning,
    Combat,
    End,
}

impl GamePhase {
    /// Ordering rank used for regression detection within one round.
    pub fn rank(self) -> u8 {
        match self {
            GamePhase::Lobby => 0,
            GamePhase::Planning => 1,
            GamePhase::Combat => 2,
            GamePhase::End => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TraitKind {
    Origin,
    Class,
}

/// Visual tier of an activated breakpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TraitStyle {
    Bronze,
    Silver,
    Gold,
    Prismatic,
}

/// One breakpoint tier of a trait.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TraitEffect {
    pub min_units: u32,
    pub description: String,
    pub style: TraitStyle,
}

/// Static trait definition. `id` is normalized (lowercase, whitespace runs
/// collapsed to `_`) and globally unique; `effects` are sorted ascending by
/// `min_units` with strictly increasing thresholds. Both invariants are
/// enforced when a catalog loads the definition, not by construction here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TraitDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TraitKind,
    pub effects: Vec<TraitEffect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
}

/// Derived per-player trait activation for one tick. Rebuilt every tick,
/// never mutated incrementally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTrait {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Distinct contributing units.
    pub count: u32,
    /// Index into the definition's `effects` of the highest satisfied
    /// breakpoint. Traits below their lowest breakpoint are omitted
    /// entirely rather than emitted with a sentinel level.
    pub active_level: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbilityKind {
    Damage,
    Stun,
    Heal,
    BuffAtk,
    BuffSpd,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbilityPattern {
    Single,
    Line,
    Surround,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AbilityDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AbilityKind,
    pub pattern: AbilityPattern,
    pub value: i32,
    pub range: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub stat_bonuses: HashMap<String, i32>,
}

fn default_buff() -> f32 {
    1.0
}

/// A placed or benched unit instance. `id` is unique per game and stable
/// across ticks; `definition_id` keys the static template catalog. Moving
/// between bench and board changes only `(x, y)`, never identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameUnit {
    pub id: String,
    pub definition_id: String,
    pub name: String,
    pub cost: u32,
    pub max_health: i32,
    pub current_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub attack_damage: i32,
    pub ability_power: i32,
    pub armor: i32,
    pub magic_resist: i32,
    pub attack_speed: f32,
    pub range: i32,
    pub traits: Vec<String>,
    #[serde(default)]
    pub items: Vec<GameItem>,
    pub x: i32,
    pub y: i32,
    pub star_level: u32,
    pub owner_id: String,
    #[serde(default)]
    pub ability: Option<AbilityDefinition>,
    #[serde(default)]
    pub active_ability: Option<String>,
    #[serde(default)]
    pub stun_ticks_remaining: u32,
    #[serde(default = "default_buff")]
    pub atk_buff: f32,
    #[serde(default = "default_buff")]
    pub spd_buff: f32,
}

impl GameUnit {
    pub fn is_benched(&self) -> bool {
        self.y == BENCH_ROW
    }

    pub fn is_on_board(&self) -> bool {
        self.y >= 0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LootType {
    Gold,
    Unit,
}

/// Authority-spawned collectible. Lifecycle is owned by the server; the
/// client only reflects presence per snapshot and requests collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LootOrb {
    pub id: String,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub loot_type: LootType,
    pub content_id: String,
    pub amount: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatEventKind {
    Damage,
    Skill,
    Death,
    Move,
}

/// One combat presentation event. Delivery through `recentEvents` windows
/// is at-least-once; [`CombatEvent::key`] identifies duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CombatEvent {
    pub timestamp: u64,
    #[serde(rename = "type")]
    pub kind: CombatEventKind,
    pub source_id: String,
    pub target_id: String,
    pub value: i32,
}

/// Deduplication key for overlapping event windows.
pub type EventKey = (u64, String, String, CombatEventKind);

impl CombatEvent {
    pub fn key(&self) -> EventKey {
        (
            self.timestamp,
            self.source_id.clone(),
            self.target_id.clone(),
            self.kind,
        )
    }
}

/// Cumulative damage attributed to one contributing entity. Authoritative:
/// clients replace the whole log each tick and never increment locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DamageEntry {
    pub source_name: String,
    pub total_damage: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatSide {
    Top,
    Bottom,
}

/// Static unit template as the shop presents it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShopOffer {
    pub id: String,
    pub name: String,
    pub cost: u32,
    pub traits: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub player_id: String,
    pub name: String,
    pub health: i32,
    pub gold: u32,
    pub level: u32,
    pub xp: u32,
    pub next_level_xp: u32,
    /// Final placement; `None` while still active, set exactly once on
    /// elimination and immutable afterwards.
    #[serde(default)]
    pub place: Option<u32>,
    #[serde(default)]
    pub combat_side: Option<CombatSide>,
    pub bench: Vec<GameUnit>,
    pub board: Vec<GameUnit>,
    pub active_traits: Vec<ActiveTrait>,
    pub shop: Vec<ShopOffer>,
    #[serde(default)]
    pub loot_orbs: Vec<LootOrb>,
}

/// One authoritative tick. A snapshot is a total replacement, never a diff:
/// every field fully describes currently-relevant state. The one additive
/// surface is `recent_events`, a bounded most-recent window that may overlap
/// between consecutive snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub room_id: String,
    pub host_id: String,
    pub phase: GamePhase,
    pub round: u64,
    pub time_remaining_ms: u64,
    pub total_phase_duration: u64,
    pub players: HashMap<String, PlayerState>,
    /// Symmetric pairing map; a player with no live opponent may be absent.
    pub matchups: HashMap<String, String>,
    pub recent_events: Vec<CombatEvent>,
    /// Session-scoped cumulative damage, reset by the authority at each
    /// transition into COMBAT.
    #[serde(default)]
    pub damage_log: HashMap<String, DamageEntry>,
    pub game_mode: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Buy,
    Sell,
    Move,
    Reroll,
    Exp,
    Lock,
    CollectOrb,
}

/// A player intent sent toward the authority. A request, not a guaranteed
/// mutation: the server may reject or ignore it, and the only signal of
/// rejection is the absence of the expected change in the next snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub player_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_index: Option<u32>,
}

impl GameAction {
    fn bare(kind: ActionKind, player_id: impl Into<String>) -> Self {
        Self {
            kind,
            player_id: player_id.into(),
            unit_id: None,
            orb_id: None,
            target_x: None,
            target_y: None,
            shop_index: None,
        }
    }

    pub fn buy(player_id: impl Into<String>, shop_index: u32) -> Self {
        Self {
            shop_index: Some(shop_index),
            ..Self::bare(ActionKind::Buy, player_id)
        }
    }

    pub fn sell(player_id: impl Into<String>, unit_id: impl Into<String>) -> Self {
        Self {
            unit_id: Some(unit_id.into()),
            ..Self::bare(ActionKind::Sell, player_id)
        }
    }

    pub fn move_unit(
        player_id: impl Into<String>,
        unit_id: impl Into<String>,
        target_x: i32,
        target_y: i32,
    ) -> Self {
        Self {
            unit_id: Some(unit_id.into()),
            target_x: Some(target_x),
            target_y: Some(target_y),
            ..Self::bare(ActionKind::Move, player_id)
        }
    }

    pub fn reroll(player_id: impl Into<String>) -> Self {
        Self::bare(ActionKind::Reroll, player_id)
    }

    pub fn buy_xp(player_id: impl Into<String>) -> Self {
        Self::bare(ActionKind::Exp, player_id)
    }

    pub fn lock_shop(player_id: impl Into<String>) -> Self {
        Self::bare(ActionKind::Lock, player_id)
    }

    pub fn collect_orb(player_id: impl Into<String>, orb_id: impl Into<String>) -> Self {
        Self {
            orb_id: Some(orb_id.into()),
            ..Self::bare(ActionKind::CollectOrb, player_id)
        }
    }
}

/// JSON schema for the outbound action contract, for authority-side
/// validation tooling.
pub fn action_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(GameAction)
}

/// Failure while encoding or decoding a wire payload.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid binary payload: {0}")]
    Binary(#[from] bincode::Error),
}

pub fn encode_snapshot_json(snapshot: &GameState) -> Result<String, CodecError> {
    Ok(serde_json::to_string(snapshot)?)
}

pub fn decode_snapshot_json(data: &str) -> Result<GameState, CodecError> {
    Ok(serde_json::from_str(data)?)
}

pub fn encode_snapshot(snapshot: &GameState) -> Result<Vec<u8>, CodecError> {
    Ok(bincode::serialize(snapshot)?)
}

pub fn decode_snapshot(data: &[u8]) -> Result<GameState, CodecError> {
    Ok(bincode::deserialize(data)?)
}

pub fn encode_action_json(action: &GameAction) -> Result<String, CodecError> {
    Ok(serde_json::to_string(action)?)
}

pub fn decode_action_json(data: &str) -> Result<GameAction, CodecError> {
    Ok(serde_json::from_str(data)?)
}

/// Content digest of a snapshot, stable across map iteration order.
///
/// Goes through [`serde_json::Value`] first: its object map is ordered by
/// key, so two structurally equal snapshots always hash equal regardless
/// of `HashMap` iteration order.
pub fn hash_snapshot(snapshot: &GameState) -> u64 {
    let canonical = serde_json::to_value(snapshot).expect("snapshot serialization for hashing");
    let encoded = serde_json::to_vec(&canonical).expect("snapshot serialization for hashing");
    let mut hasher = RandomState::with_seeds(0, 0, 0, 0).build_hasher();
    hasher.write(&encoded);
    hasher.finish()
}
