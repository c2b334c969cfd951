//! Error types for the tombstone store.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting the ledger.
///
/// Load failures never surface here — `TombstoneStore::open` recovers them
/// by starting from an empty ledger. These variants cover explicit persists
/// (`add`, `cleanup`) only.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error while writing or renaming the ledger file.
    #[error("ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ledger could not be serialized.
    #[error("ledger serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
