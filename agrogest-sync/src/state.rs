//! Sync state tracking.
//!
//! [`SyncState`] is a pure state machine with no I/O; the orchestrator and
//! connectivity listeners drive its transitions through a shared
//! [`SyncTracker`]. UI indicators read [`SyncStatus`] snapshots.
//!
//! Invariants: `is_syncing` implies `is_online`; pending counts are
//! non-negative and reflect locally queued, not-yet-acknowledged mutations.

use agrogest_types::{Category, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Client-observable connectivity and pending-change state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    is_online: bool,
    is_syncing: bool,
    last_sync_time: Option<Timestamp>,
    /// Pending mutation counts per collection, so a partial cycle can
    /// clear only the collections that fully succeeded.
    pending: BTreeMap<Category, u64>,
}

impl SyncState {
    /// Creates the initial state from a connectivity probe result.
    #[must_use]
    pub fn new(is_online: bool) -> Self {
        Self {
            is_online,
            is_syncing: false,
            last_sync_time: None,
            pending: BTreeMap::new(),
        }
    }

    /// Returns true if the client believes it is online.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.is_online
    }

    /// Returns true while a sync cycle is in flight.
    #[must_use]
    pub fn is_syncing(&self) -> bool {
        self.is_syncing
    }

    /// Returns the completion time of the last successful cycle.
    #[must_use]
    pub fn last_sync_time(&self) -> Option<Timestamp> {
        self.last_sync_time
    }

    /// Total count of locally queued, unacknowledged mutations.
    #[must_use]
    pub fn pending_changes(&self) -> u64 {
        self.pending.values().sum()
    }

    /// Pending count for one collection.
    #[must_use]
    pub fn pending_for(&self, category: &Category) -> u64 {
        self.pending.get(category).copied().unwrap_or(0)
    }

    // ── transitions ──────────────────────────────────────────────

    /// Network-down event. Forces `is_syncing` off to preserve the
    /// `is_syncing ⇒ is_online` invariant.
    pub fn network_down(&mut self) {
        self.is_online = false;
        self.is_syncing = false;
    }

    /// Network-up event.
    pub fn network_up(&mut self) {
        self.is_online = true;
    }

    /// Attempts to start a cycle. Returns false (and changes nothing) when
    /// offline or already syncing — the concurrent-sync no-op.
    pub fn begin_sync(&mut self) -> bool {
        if !self.is_online || self.is_syncing {
            return false;
        }
        self.is_syncing = true;
        true
    }

    /// Cycle finished with every queued mutation acknowledged: pending
    /// resets to zero and `last_sync_time` records the completion time.
    pub fn finish_sync(&mut self, at: Timestamp) {
        self.is_syncing = false;
        self.pending.clear();
        self.last_sync_time = Some(at);
    }

    /// Cycle finished having fully completed only the `succeeded`
    /// collections. Pending is cleared for exactly those; counts for
    /// failed collections and for collections outside the cycle stay
    /// queued, since nothing acknowledged them. `last_sync_time` advances
    /// only on a fully successful cycle: it doubles as the pull cursor,
    /// and moving it forward while a collection still needs a retry would
    /// skip that collection's changes.
    pub fn finish_sync_partial(
        &mut self,
        at: Timestamp,
        succeeded: &[Category],
        failed: &[Category],
    ) {
        self.is_syncing = false;
        self.pending.retain(|category, _| !succeeded.contains(category));
        if failed.is_empty() {
            self.last_sync_time = Some(at);
        }
    }

    /// Cycle abandoned entirely; pending and `last_sync_time` unchanged.
    pub fn abort_sync(&mut self) {
        self.is_syncing = false;
    }

    /// A mutation was queued locally.
    pub fn queue_mutation(&mut self, category: &Category) {
        *self.pending.entry(category.clone()).or_insert(0) += 1;
    }

    /// Read-only snapshot for UI indicators.
    #[must_use]
    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            is_online: self.is_online,
            is_syncing: self.is_syncing,
            last_sync_time: self.last_sync_time,
            pending_changes: self.pending_changes(),
        }
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Snapshot of the sync state exposed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub is_online: bool,
    pub is_syncing: bool,
    pub last_sync_time: Option<Timestamp>,
    pub pending_changes: u64,
}

/// Shared handle to the sync state.
///
/// Cheap to clone; connectivity listeners, the replication layer, and the
/// orchestrator all hold the same tracker.
#[derive(Clone)]
pub struct SyncTracker {
    inner: Arc<RwLock<SyncState>>,
}

impl SyncTracker {
    /// Creates a tracker seeded from a connectivity probe result.
    #[must_use]
    pub fn new(is_online: bool) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SyncState::new(is_online))),
        }
    }

    /// Network-down event.
    pub async fn network_down(&self) {
        self.inner.write().await.network_down();
    }

    /// Network-up event.
    pub async fn network_up(&self) {
        self.inner.write().await.network_up();
    }

    /// Attempts to start a cycle; false means offline or already syncing.
    pub async fn begin_sync(&self) -> bool {
        self.inner.write().await.begin_sync()
    }

    /// Records a fully successful cycle.
    pub async fn finish_sync(&self, at: Timestamp) {
        self.inner.write().await.finish_sync(at);
    }

    /// Records a cycle that fully completed only the `succeeded`
    /// collections.
    pub async fn finish_sync_partial(
        &self,
        at: Timestamp,
        succeeded: &[Category],
        failed: &[Category],
    ) {
        self.inner
            .write()
            .await
            .finish_sync_partial(at, succeeded, failed);
    }

    /// Records an abandoned cycle.
    pub async fn abort_sync(&self) {
        self.inner.write().await.abort_sync();
    }

    /// Records a locally queued mutation.
    pub async fn queue_mutation(&self, category: &Category) {
        self.inner.write().await.queue_mutation(category);
    }

    /// Current UI snapshot.
    pub async fn status(&self) -> SyncStatus {
        self.inner.read().await.status()
    }

    /// Pending count for one collection.
    pub async fn pending_for(&self, category: &Category) -> u64 {
        self.inner.read().await.pending_for(category)
    }
}
