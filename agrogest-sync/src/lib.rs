//! Offline-first sync for AgroGest clients.
//!
//! The client queues mutations locally while offline and reconciles them
//! when connectivity returns. This crate provides:
//!
//! - [`SyncState`] / [`SyncTracker`] — the connectivity and pending-change
//!   state machine feeding UI indicators
//! - [`SyncOrchestrator`] — drives one push-then-pull cycle over every
//!   managed collection in a fixed order
//! - [`RemoteApi`] / [`LocalReplica`] — seams to the REST transport and the
//!   local replication layer, which are collaborators, not part of this
//!   crate
//!
//! Only one cycle may be in flight at a time; `request_sync` while syncing
//! is a silent no-op, not an error. No failure here is fatal: everything
//! degrades to "stale but available".

mod error;
mod orchestrator;
mod replica;
mod state;

pub use error::{SyncError, SyncResult};
pub use orchestrator::{CollectionOutcome, SyncConfig, SyncOrchestrator, SyncReport};
pub use replica::{ChangeRecord, LocalReplica, RemoteApi, RemoteRecord};
pub use state::{SyncState, SyncStatus, SyncTracker};
