//! Deletion filter for listing paths.
//!
//! Every list endpoint for a managed category must pass its rows through
//! [`DeletionFilter::filter`] before responding, so tombstoned records
//! never reach a client even when an offline replica has pushed them back
//! into the primary store.

use crate::store::TombstoneStore;
use agrogest_types::{Category, Identified};

/// Excludes tombstoned records from listing results.
///
/// Pure with respect to the ledger snapshot taken at call time; never
/// mutates the store.
pub struct DeletionFilter<'a> {
    store: &'a TombstoneStore,
}

impl<'a> DeletionFilter<'a> {
    /// Creates a filter over the given store.
    #[must_use]
    pub fn new(store: &'a TombstoneStore) -> Self {
        Self { store }
    }

    /// Returns `items` minus any row whose id is tombstoned in `category`.
    /// Order of the surviving rows is preserved.
    pub async fn filter<T: Identified>(&self, category: &Category, items: Vec<T>) -> Vec<T> {
        let deleted = self.store.ids(category).await;
        if deleted.is_empty() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| !deleted.contains(&item.record_id()))
            .collect()
    }
}
