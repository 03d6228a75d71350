//! Strongly-typed identifiers for occupants, rooms, and spaces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies an entity capable of having a location: a character, or
/// an inanimate object carried into a wilderness space.
///
/// The wilderness core never allocates these: the embedding game's
/// entity model assigns them and the core only tracks them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OccupantId(pub u64);

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for OccupantId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Handle to a projected room within one space's room slab.
///
/// Room identity is always resolved through the owning space's tables
/// rather than reference aliasing, keeping the pool lifecycle auditable.
/// A `RoomId` is only meaningful together with the [`SpaceId`] of the
/// space that allocated it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl RoomId {
    /// Index of this room in the owning space's slab.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room{}", self.0)
    }
}

impl From<u32> for RoomId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Counter for unique [`SpaceId`] allocation.
static SPACE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a wilderness space.
///
/// Allocated from a monotonic atomic counter via [`SpaceId::next`]. Two
/// distinct space instances always have different IDs, even when they
/// share a name (e.g. a space restored from a snapshot). Used to decide
/// whether an entity's location pointer refers to a room of *this*
/// space or of a foreign one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceId(u64);

impl SpaceId {
    /// Allocate a fresh, unique space ID.
    ///
    /// Each call returns an ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(SPACE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
