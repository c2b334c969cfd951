//! Error types for the sync layer.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in sync operations.
///
/// A concurrent `request_sync` is deliberately not represented here — it is
/// an expected race and surfaces as a `None` report, never as an error.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The network is unreachable. Ends the current cycle and flips the
    /// tracker offline; retried automatically on the next connectivity
    /// event.
    #[error("network error: {0}")]
    Network(String),

    /// A per-collection operation timed out.
    #[error("operation timed out")]
    Timeout,

    /// The remote API rejected or failed a push/pull.
    #[error("remote API error: {0}")]
    Remote(String),

    /// The local replication layer failed.
    #[error("local replica error: {0}")]
    Replica(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
