//! Monotonic sync timestamps.
//!
//! A wall-clock millisecond value with a logical counter appended, so two
//! local writes inside the same millisecond still order deterministically.
//! Server-assigned stamps arrive as plain milliseconds ([`Timestamp::from_millis`])
//! and compare against local ones on the wall component, which is all
//! last-write-wins needs here.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

fn wall_clock_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before Unix epoch")
        .as_millis() as u64
}

/// A sync timestamp.
///
/// Field order matters: the derived `Ord` compares wall time first, then
/// the logical counter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp {
    wall_time: u64,
    logical: u32,
}

impl Timestamp {
    /// The current time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_millis(wall_clock_millis())
    }

    /// A server-assigned stamp: plain milliseconds, logical counter zero.
    #[must_use]
    pub const fn from_millis(wall_time: u64) -> Self {
        Self {
            wall_time,
            logical: 0,
        }
    }

    /// A timestamp from explicit components.
    #[must_use]
    pub const fn new(wall_time: u64, logical: u32) -> Self {
        Self { wall_time, logical }
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub const fn wall_time(&self) -> u64 {
        self.wall_time
    }

    /// The logical counter.
    #[must_use]
    pub const fn logical(&self) -> u32 {
        self.logical
    }

    /// The next local timestamp. Never goes backwards: if the system clock
    /// has not advanced past `self`, the logical counter bumps instead.
    #[must_use]
    pub fn tick(&self) -> Self {
        let now = wall_clock_millis();
        if now > self.wall_time {
            Self::from_millis(now)
        } else {
            Self {
                wall_time: self.wall_time,
                logical: self.logical.saturating_add(1),
            }
        }
    }

    /// True if this timestamp is strictly newer than the other.
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
