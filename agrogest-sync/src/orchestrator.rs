//! Sync orchestration.
//!
//! One cycle pushes queued changes and pulls server changes for every
//! managed collection, in a fixed order. A single collection's failure or
//! timeout never aborts the others; only a network-level failure ends the
//! cycle early, since it would fail every remaining collection anyway.
//!
//! Overlapping cycles are rejected through the tracker's `begin_sync`
//! guard: `request_sync` while a cycle is in flight returns `None` without
//! issuing a single network call.

use crate::error::{SyncError, SyncResult};
use crate::replica::{LocalReplica, RemoteApi, RemoteRecord};
use crate::state::SyncTracker;
use agrogest_types::{Category, Timestamp};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for the sync orchestrator.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Collections to sync, in cycle order.
    pub collections: Vec<Category>,
    /// Per-collection timeout (ms). A collection that exceeds it is
    /// abandoned for this cycle; partial results already applied are kept.
    pub timeout_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            collections: Category::managed(),
            timeout_ms: 30_000,
        }
    }
}

/// Outcome of one collection within a cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionOutcome {
    /// The collection.
    pub category: Category,
    /// Queued changes pushed to the server.
    pub pushed: usize,
    /// Pulled records applied locally (after last-write-wins).
    pub pulled: usize,
    /// Failure description, if the collection did not complete.
    pub error: Option<String>,
}

/// Collective result of one sync cycle, surfaced to the UI as a
/// non-blocking notification.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// When the cycle started.
    pub started_at: Timestamp,
    /// When the cycle finished.
    pub finished_at: Timestamp,
    /// Per-collection outcomes, in cycle order.
    pub outcomes: Vec<CollectionOutcome>,
}

impl SyncReport {
    /// True if every collection completed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.error.is_none())
    }

    /// Collections that did not complete and will be retried.
    #[must_use]
    pub fn failed_categories(&self) -> Vec<Category> {
        self.outcomes
            .iter()
            .filter(|o| o.error.is_some())
            .map(|o| o.category.clone())
            .collect()
    }

    /// Collections that fully completed; only their pending counts may be
    /// cleared.
    #[must_use]
    pub fn succeeded_categories(&self) -> Vec<Category> {
        self.outcomes
            .iter()
            .filter(|o| o.error.is_none())
            .map(|o| o.category.clone())
            .collect()
    }
}

/// Drives sync cycles over the collaborator seams.
pub struct SyncOrchestrator {
    config: SyncConfig,
    tracker: SyncTracker,
    remote: Arc<dyn RemoteApi>,
    replica: Arc<dyn LocalReplica>,
}

impl SyncOrchestrator {
    /// Creates an orchestrator over the given collaborators.
    pub fn new(
        config: SyncConfig,
        tracker: SyncTracker,
        remote: Arc<dyn RemoteApi>,
        replica: Arc<dyn LocalReplica>,
    ) -> Self {
        Self {
            config,
            tracker,
            remote,
            replica,
        }
    }

    /// Returns the shared tracker handle.
    #[must_use]
    pub fn tracker(&self) -> &SyncTracker {
        &self.tracker
    }

    /// Probes connectivity and records the result in the tracker.
    pub async fn probe_connectivity(&self) -> bool {
        if self.remote.probe().await {
            self.tracker.network_up().await;
            true
        } else {
            self.tracker.network_down().await;
            false
        }
    }

    /// Runs one sync cycle if preconditions hold.
    ///
    /// Returns `None` without any network traffic when offline or when a
    /// cycle is already in flight (the expected concurrent-sync race).
    pub async fn request_sync(&self) -> Option<SyncReport> {
        if !self.tracker.begin_sync().await {
            debug!("sync request ignored: offline or already syncing");
            return None;
        }
        Some(self.run_cycle().await)
    }

    async fn run_cycle(&self) -> SyncReport {
        let started_at = Timestamp::now();
        let since = self.tracker.status().await.last_sync_time;
        let timeout = Duration::from_millis(self.config.timeout_ms);

        let mut outcomes = Vec::with_capacity(self.config.collections.len());
        let mut went_offline = false;

        for category in &self.config.collections {
            if went_offline {
                outcomes.push(CollectionOutcome {
                    category: category.clone(),
                    pushed: 0,
                    pulled: 0,
                    error: Some("skipped: network unavailable".to_string()),
                });
                continue;
            }

            let outcome = tokio::time::timeout(timeout, self.sync_collection(category, since)).await;
            match outcome {
                Ok(Ok((pushed, pulled))) => {
                    debug!(%category, pushed, pulled, "collection synced");
                    outcomes.push(CollectionOutcome {
                        category: category.clone(),
                        pushed,
                        pulled,
                        error: None,
                    });
                }
                Ok(Err(e)) => {
                    warn!(%category, error = %e, "collection sync failed");
                    if matches!(e, SyncError::Network(_)) {
                        went_offline = true;
                    }
                    outcomes.push(CollectionOutcome {
                        category: category.clone(),
                        pushed: 0,
                        pulled: 0,
                        error: Some(e.to_string()),
                    });
                }
                Err(_) => {
                    warn!(%category, timeout_ms = self.config.timeout_ms, "collection sync timed out");
                    outcomes.push(CollectionOutcome {
                        category: category.clone(),
                        pushed: 0,
                        pulled: 0,
                        error: Some(SyncError::Timeout.to_string()),
                    });
                }
            }
        }

        let finished_at = Timestamp::now();
        let report = SyncReport {
            started_at,
            finished_at,
            outcomes,
        };

        // Clear pending only for the collections this cycle actually
        // completed; anything queued under a category outside the cycle is
        // still unacknowledged.
        let failed = report.failed_categories();
        self.tracker
            .finish_sync_partial(finished_at, &report.succeeded_categories(), &failed)
            .await;
        if went_offline {
            self.tracker.network_down().await;
        }

        if report.is_success() {
            info!(
                collections = report.outcomes.len(),
                "sync cycle completed"
            );
        } else {
            info!(
                collections = report.outcomes.len(),
                failed = failed.len(),
                "sync cycle completed with failures"
            );
        }

        report
    }

    /// Push-then-pull for one collection. Returns (pushed, pulled applied).
    async fn sync_collection(
        &self,
        category: &Category,
        since: Option<Timestamp>,
    ) -> SyncResult<(usize, usize)> {
        let queued = self.replica.queued(category).await?;
        if !queued.is_empty() {
            self.remote.push(category, &queued).await?;
            self.replica.mark_flushed(category).await?;
        }

        let pulled = self.remote.pull(category, since).await?;
        let fresh = self.resolve_pulled(category, pulled).await?;
        let applied = fresh.len();
        if applied > 0 {
            self.replica.store_remote(category, fresh).await?;
        }

        Ok((queued.len(), applied))
    }

    /// Last-write-wins by server-assigned `updated_at`: a pulled record is
    /// dropped only when the local copy is strictly newer; ties defer to
    /// the server copy. Nothing finer-grained is attempted — true
    /// concurrent edits to the same field have no defined merge semantics
    /// upstream.
    async fn resolve_pulled(
        &self,
        category: &Category,
        pulled: Vec<RemoteRecord>,
    ) -> SyncResult<Vec<RemoteRecord>> {
        let mut fresh = Vec::with_capacity(pulled.len());
        for record in pulled {
            match self.replica.updated_at(category, record.id).await? {
                Some(local) if local.is_after(&record.updated_at) => {
                    debug!(%category, id = %record.id, "keeping newer local copy");
                }
                _ => fresh.push(record),
            }
        }
        Ok(fresh)
    }
}
