//! Soft-delete tombstone ledger for AgroGest.
//!
//! Deletions are recorded separately from the entity store: a record exists
//! for clients only if it is present in the primary store *and* absent from
//! the tombstone ledger. This join is a deliberate design, not a side
//! effect — it lets offline replicas resurrect rows on reconnect without
//! those rows ever reaching a listing response.
//!
//! # Architecture
//!
//! - [`TombstoneLedger`] is the pure in-memory model (category → id set)
//! - [`TombstoneStore`] persists the ledger to a JSON file with atomic
//!   write-then-rename, serializing writers through a single lock
//! - [`DeletionFilter`] strips tombstoned ids from listing results
//!
//! Storage failures on load are recovered by falling back to an empty
//! ledger: suppressing resurrected deletions is best-effort and must never
//! block the application.

mod error;
mod filter;
mod ledger;
mod store;

pub use error::{StoreError, StoreResult};
pub use filter::DeletionFilter;
pub use ledger::TombstoneLedger;
pub use store::TombstoneStore;
