//! Core type definitions for the AgroGest sync subsystem.
//!
//! This crate defines the fundamental types shared by the tombstone store
//! and the sync orchestrator:
//! - Entity categories and integer record identifiers
//! - Monotonic sync timestamps
//! - The `Identified` seam used by the deletion filter
//!
//! Domain-specific row types (pastures, animals, machines, finances, ...)
//! belong to the REST layer, not here.

mod category;
mod ids;
mod timestamp;

pub use category::Category;
pub use ids::RecordId;
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid category: {0}")]
    InvalidCategory(String),
}

/// Anything that carries a record identifier.
///
/// Listing results are filtered against the tombstone ledger through this
/// trait, so the filter never needs to know the row's shape.
pub trait Identified {
    /// Returns the record's identifier within its category.
    fn record_id(&self) -> RecordId;
}
