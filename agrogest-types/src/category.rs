//! Entity-category keys.
//!
//! A category names one managed collection ("machines", "animals",
//! "pastures"). The set is open: any non-empty string is a valid category,
//! so new collections can be added without touching this crate.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The key identifying one managed collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Creates a category from an arbitrary name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The machinery collection.
    #[must_use]
    pub fn machines() -> Self {
        Self::new("machines")
    }

    /// The livestock collection.
    #[must_use]
    pub fn animals() -> Self {
        Self::new("animals")
    }

    /// The pasture collection.
    #[must_use]
    pub fn pastures() -> Self {
        Self::new("pastures")
    }

    /// The three collections managed out of the box, in sync order.
    #[must_use]
    pub fn managed() -> Vec<Self> {
        vec![Self::machines(), Self::animals(), Self::pastures()]
    }

    /// Returns the category name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::InvalidCategory("empty category name".to_string()));
        }
        Ok(Self::new(s))
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
