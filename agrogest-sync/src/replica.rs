//! Collaborator seams for the out-of-scope layers.
//!
//! The REST transport and the local replication/storage layer are external
//! collaborators: the orchestrator only decides *when* and *whether* to
//! flush, never how queuing or HTTP work. Both appear here as object-safe
//! async traits so tests can substitute in-process fakes.
//!
//! Authentication is assumed to already be handled by the transport behind
//! [`RemoteApi`].

use crate::error::SyncResult;
use agrogest_types::{Category, RecordId, Timestamp};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One record-level mutation, queued locally or pulled from the server.
///
/// Local copies carry the client clock in `updated_at`; copies pulled from
/// the server carry the server-assigned timestamp, which is authoritative
/// for last-write-wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// The record this change applies to.
    pub id: RecordId,
    /// When the record was last written.
    pub updated_at: Timestamp,
    /// Full JSON representation of the record.
    pub payload: serde_json::Value,
}

impl ChangeRecord {
    /// Creates a change record.
    #[must_use]
    pub fn new(id: RecordId, updated_at: Timestamp, payload: serde_json::Value) -> Self {
        Self {
            id,
            updated_at,
            payload,
        }
    }
}

/// A record as returned by the server. Same shape as [`ChangeRecord`];
/// the alias marks which direction the copy travelled.
pub type RemoteRecord = ChangeRecord;

/// The REST API layer, seen from the sync cycle.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Lightweight connectivity probe. Never errors; unreachable is false.
    async fn probe(&self) -> bool;

    /// Pushes locally queued changes for one collection.
    async fn push(&self, category: &Category, changes: &[ChangeRecord]) -> SyncResult<()>;

    /// Pulls server-side changes for one collection, optionally since a
    /// cursor timestamp.
    async fn pull(
        &self,
        category: &Category,
        since: Option<Timestamp>,
    ) -> SyncResult<Vec<RemoteRecord>>;
}

/// The local replication/storage layer, seen from the sync cycle.
#[async_trait]
pub trait LocalReplica: Send + Sync {
    /// Returns the queued, unacknowledged mutations for one collection.
    async fn queued(&self, category: &Category) -> SyncResult<Vec<ChangeRecord>>;

    /// Returns the local `updated_at` for a record, if the record exists
    /// locally. Drives the last-write-wins comparison.
    async fn updated_at(
        &self,
        category: &Category,
        id: RecordId,
    ) -> SyncResult<Option<Timestamp>>;

    /// Writes pulled records into local storage.
    async fn store_remote(
        &self,
        category: &Category,
        records: Vec<RemoteRecord>,
    ) -> SyncResult<()>;

    /// Acknowledges that the queued changes for a collection reached the
    /// server; the queue for that collection empties.
    async fn mark_flushed(&self, category: &Category) -> SyncResult<()>;
}
