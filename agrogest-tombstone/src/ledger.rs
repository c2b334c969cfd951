//! The in-memory tombstone ledger.
//!
//! A mapping from entity category to the set of deleted record ids. Pure
//! data — persistence and locking live in [`crate::TombstoneStore`].
//!
//! Serialized form is a JSON object keyed by category name, each value an
//! array of integers: `{"machines":[3],"animals":[],"pastures":[]}`.
//! `BTreeMap`/`BTreeSet` keep the output stable across persists.

use agrogest_types::{Category, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Deleted record ids, grouped by category.
///
/// Invariant: an id present in a category's set must never be returned by
/// any read path for that category. The ledger itself only stores the ids;
/// [`crate::DeletionFilter`] enforces the invariant at listing sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TombstoneLedger {
    entries: BTreeMap<Category, BTreeSet<RecordId>>,
}

impl TombstoneLedger {
    /// Creates an empty ledger seeded with the managed categories, so a
    /// freshly persisted file has the documented shape.
    #[must_use]
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        for category in Category::managed() {
            entries.insert(category, BTreeSet::new());
        }
        Self { entries }
    }

    /// Records a deletion. Returns true if the id was newly inserted,
    /// false if it was already tombstoned (idempotent).
    pub fn insert(&mut self, category: &Category, id: RecordId) -> bool {
        self.entries.entry(category.clone()).or_default().insert(id)
    }

    /// Returns true if the id is tombstoned in the category.
    /// Unknown categories are simply empty.
    #[must_use]
    pub fn contains(&self, category: &Category, id: RecordId) -> bool {
        self.entries
            .get(category)
            .is_some_and(|ids| ids.contains(&id))
    }

    /// Returns the tombstoned ids for a category.
    #[must_use]
    pub fn ids(&self, category: &Category) -> BTreeSet<RecordId> {
        self.entries.get(category).cloned().unwrap_or_default()
    }

    /// Drops every id in the category that is not in `live`. Returns the
    /// number of ids removed. Other categories are untouched.
    ///
    /// Only safe to call once downstream consumers have confirmed the
    /// missing records are permanently purged, otherwise a later restore
    /// would resurrect them.
    pub fn retain_live(&mut self, category: &Category, live: &BTreeSet<RecordId>) -> usize {
        let Some(ids) = self.entries.get_mut(category) else {
            return 0;
        };
        let before = ids.len();
        ids.retain(|id| live.contains(id));
        before - ids.len()
    }

    /// Returns an iterator over the tracked categories.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.entries.keys()
    }

    /// Total number of tombstones across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    /// Returns true if no category holds any tombstone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TombstoneLedger {
    fn default() -> Self {
        Self::new()
    }
}
