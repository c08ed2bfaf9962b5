use std::collections::{HashSet, VecDeque};

use ahash::RandomState;
use arena_schema::{CombatEvent, EventKey, GamePhase, GameState};
use thiserror::Error;
use tracing::{debug, warn};

/// Per-session synchronization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Disconnected,
    Syncing,
    Live,
}

/// Protocol-level fault in the inbound snapshot stream. Recovered locally
/// by dropping back to [`SyncState::Syncing`]; never a panic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolViolation {
    #[error(
        "room {room_id}: snapshot regressed from round {last_round} {last_phase:?} \
         to round {round} {phase:?}"
    )]
    PhaseRegression {
        room_id: String,
        last_round: u64,
        last_phase: GamePhase,
        round: u64,
        phase: GamePhase,
    },
    #[error("snapshot received while the channel is disconnected")]
    ChannelDisconnected,
}

/// Summary of one accepted snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotApplied {
    pub round: u64,
    pub phase: GamePhase,
    /// Events from this snapshot's window not seen in earlier windows.
    pub new_events: usize,
    /// True when this snapshot started a new game instance (first snapshot
    /// after connect, or a changed room id).
    pub new_session: bool,
}

/// Bounded client-side event feed fed from overlapping `recentEvents`
/// windows. Delivery upstream is at-least-once; duplicates are dropped by
/// `(timestamp, sourceId, targetId, type)` key.
struct EventFeed {
    pending: VecDeque<CombatEvent>,
    seen: HashSet<EventKey, RandomState>,
    seen_order: VecDeque<EventKey>,
    capacity: usize,
}

impl EventFeed {
    fn new(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            seen: HashSet::default(),
            seen_order: VecDeque::new(),
            capacity,
        }
    }

    /// Fold one snapshot window into the feed, returning how many events
    /// were new.
    fn fold(&mut self, window: &[CombatEvent]) -> usize {
        let mut added = 0;
        for event in window {
            let key = event.key();
            if !self.seen.insert(key.clone()) {
                continue;
            }
            self.seen_order.push_back(key);
            if self.seen_order.len() > self.capacity * 4 {
                if let Some(retired) = self.seen_order.pop_front() {
                    self.seen.remove(&retired);
                }
            }
            self.pending.push_back(event.clone());
            if self.pending.len() > self.capacity {
                self.pending.pop_front();
            }
            added += 1;
        }
        added
    }

    fn drain(&mut self) -> Vec<CombatEvent> {
        self.pending.drain(..).collect()
    }

    fn clear(&mut self) {
        self.pending.clear();
        self.seen.clear();
        self.seen_order.clear();
    }
}

/// Consumer side of the snapshot stream.
///
/// Holds at most one "current" [`GameState`]; each accepted snapshot
/// replaces it atomically from the reader's perspective (a single
/// assignment, no partially applied fields). The channel observes phase
/// transitions, it never drives them: within one room, snapshots must
/// arrive in non-decreasing `(round, phase)` order, and a regression
/// triggers resynchronization.
pub struct SyncChannel {
    state: SyncState,
    current: Option<GameState>,
    feed: EventFeed,
}

/// Default bound of the client event feed. Must be at least the maximum
/// events one combat tick can produce; sized well above that.
pub const EVENT_FEED_CAPACITY: usize = 256;

impl SyncChannel {
    pub fn new() -> Self {
        Self {
            state: SyncState::Disconnected,
            current: None,
            feed: EventFeed::new(EVENT_FEED_CAPACITY),
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// The held snapshot, if the channel is live.
    pub fn current(&self) -> Option<&GameState> {
        self.current.as_ref()
    }

    /// Begin (or restart) a session: drops any held state and waits for
    /// the first snapshot.
    pub fn connect(&mut self) {
        self.state = SyncState::Syncing;
        self.current = None;
        self.feed.clear();
    }

    pub fn disconnect(&mut self) {
        self.state = SyncState::Disconnected;
        self.current = None;
        self.feed.clear();
    }

    /// Apply one inbound snapshot as a total replacement of client state.
    ///
    /// A snapshot with a new `roomId` starts a fresh session (ordering
    /// state and event feed reset). Within the same room a snapshot whose
    /// `(round, phase)` regresses is rejected: the channel returns to
    /// [`SyncState::Syncing`], discards the held snapshot, and the caller
    /// is expected to keep feeding snapshots until one is accepted.
    pub fn apply_snapshot(
        &mut self,
        snapshot: GameState,
    ) -> Result<SnapshotApplied, ProtocolViolation> {
        if self.state == SyncState::Disconnected {
            return Err(ProtocolViolation::ChannelDisconnected);
        }

        let new_session = match &self.current {
            Some(held) => held.room_id != snapshot.room_id,
            None => true,
        };

        if let Some(held) = &self.current {
            let held_order = (held.round, held.phase.rank());
            let incoming_order = (snapshot.round, snapshot.phase.rank());
            if !new_session && incoming_order < held_order {
                warn!(
                    room_id = %snapshot.room_id,
                    last_round = held.round,
                    round = snapshot.round,
                    "phase regression, resynchronizing"
                );
                let violation = ProtocolViolation::PhaseRegression {
                    room_id: snapshot.room_id,
                    last_round: held.round,
                    last_phase: held.phase,
                    round: snapshot.round,
                    phase: snapshot.phase,
                };
                self.state = SyncState::Syncing;
                self.current = None;
                self.feed.clear();
                return Err(violation);
            }
        }

        if new_session {
            debug!(room_id = %snapshot.room_id, "new game instance observed");
            self.feed.clear();
        }

        let new_events = self.feed.fold(&snapshot.recent_events);
        let applied = SnapshotApplied {
            round: snapshot.round,
            phase: snapshot.phase,
            new_events,
            new_session,
        };
        // total replacement: the previous snapshot contributes nothing
        self.current = Some(snapshot);
        self.state = SyncState::Live;
        Ok(applied)
    }

    /// Events newly observed since the last drain, deduplicated across
    /// overlapping snapshot windows, oldest first.
    pub fn drain_new_events(&mut self) -> Vec<CombatEvent> {
        self.feed.drain()
    }
}

impl Default for SyncChannel {
    fn default() -> Self {
        Self::new()
    }
}
