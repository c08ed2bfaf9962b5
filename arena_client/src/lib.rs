//! Client-side core for the arena autobattler.
//!
//! Consumes the authoritative snapshot stream defined in [`arena_schema`]
//! and derives client-visible state from it: the trait catalog and
//! aggregator, the animation registry, outbound action validation, and the
//! snapshot synchronization channel. Everything here is synchronous and
//! free of I/O; the transport feeding snapshots in and carrying actions
//! out lives elsewhere.

mod actions;
mod aggregator;
mod animation;
mod catalog;
mod channel;

pub use actions::{validate_action, ActionValidationError};
pub use aggregator::{aggregate_traits, Aggregation, TraitScope};
pub use animation::{
    AbilityAnimation, AnimationRegistry, AttackAnimation, AttackStyle, DEFAULT_ANIMATION_KEY,
};
pub use catalog::{builtin_traits, normalize_trait_id, CatalogError, TraitCatalog, TraitTable};
pub use channel::{
    ProtocolViolation, SnapshotApplied, SyncChannel, SyncState, EVENT_FEED_CAPACITY,
};
