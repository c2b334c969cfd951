//! File-backed tombstone store.
//!
//! Wraps a [`TombstoneLedger`] with durable storage at an injected path.
//! Every mutation is a full read-modify-write of the backing file; writers
//! are serialized through the store's lock so concurrent `add` calls cannot
//! lose updates. Persists go through a temp file and an atomic rename so
//! readers never observe a partially written ledger.

use crate::error::StoreResult;
use crate::ledger::TombstoneLedger;
use agrogest_types::{Category, RecordId};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Durable store of deleted record ids.
///
/// Constructed once at process start with an explicit ledger path and
/// passed by reference to all consumers.
pub struct TombstoneStore {
    path: PathBuf,
    ledger: RwLock<TombstoneLedger>,
}

impl TombstoneStore {
    /// Opens the store, loading the ledger from `path`.
    ///
    /// A missing or corrupt file yields a fresh empty ledger which is
    /// persisted immediately. Read failures fall back to an empty
    /// in-memory ledger with a warning — tombstone suppression is
    /// best-effort and must never block startup.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ledger = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<TombstoneLedger>(&bytes) {
                Ok(ledger) => {
                    debug!(path = %path.display(), tombstones = ledger.len(), "loaded tombstone ledger");
                    ledger
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt tombstone ledger, starting fresh");
                    let fresh = TombstoneLedger::new();
                    Self::try_persist(&path, &fresh).await;
                    fresh
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let fresh = TombstoneLedger::new();
                Self::try_persist(&path, &fresh).await;
                fresh
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "tombstone ledger unreadable, running with empty ledger");
                TombstoneLedger::new()
            }
        };

        Self {
            path,
            ledger: RwLock::new(ledger),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records a deletion. Idempotent: an already-tombstoned id is a no-op
    /// with no disk write. Otherwise the full ledger is persisted before
    /// this returns. Returns true if the id was newly recorded.
    pub async fn add(&self, category: &Category, id: RecordId) -> StoreResult<bool> {
        let mut ledger = self.ledger.write().await;
        if !ledger.insert(category, id) {
            return Ok(false);
        }
        persist(&self.path, &ledger).await?;
        debug!(%category, %id, "recorded tombstone");
        Ok(true)
    }

    /// Returns true if the id is tombstoned in the category.
    pub async fn contains(&self, category: &Category, id: RecordId) -> bool {
        self.ledger.read().await.contains(category, id)
    }

    /// Returns the tombstoned ids for a category.
    pub async fn ids(&self, category: &Category) -> BTreeSet<RecordId> {
        self.ledger.read().await.ids(category)
    }

    /// Prunes tombstones whose records no longer exist anywhere, bounding
    /// ledger growth. Returns the number of ids removed; persists only
    /// when something changed.
    pub async fn cleanup(
        &self,
        category: &Category,
        live: &BTreeSet<RecordId>,
    ) -> StoreResult<usize> {
        let mut ledger = self.ledger.write().await;
        let removed = ledger.retain_live(category, live);
        if removed > 0 {
            persist(&self.path, &ledger).await?;
            debug!(%category, removed, "pruned tombstone ledger");
        }
        Ok(removed)
    }

    /// Returns a snapshot of the full ledger.
    pub async fn snapshot(&self) -> TombstoneLedger {
        self.ledger.read().await.clone()
    }

    /// Best-effort persist used on recovery paths, where a write failure
    /// must not propagate.
    async fn try_persist(path: &Path, ledger: &TombstoneLedger) {
        if let Err(e) = persist(path, ledger).await {
            warn!(path = %path.display(), error = %e, "could not persist fresh tombstone ledger");
        }
    }
}

/// Writes the ledger to `<path>.tmp` then renames over the target, so a
/// crash mid-write leaves the previous ledger intact.
async fn persist(path: &Path, ledger: &TombstoneLedger) -> StoreResult<()> {
    let json = serde_json::to_vec_pretty(ledger)?;

    let mut tmp_name: OsString = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    tokio::fs::write(&tmp, &json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
