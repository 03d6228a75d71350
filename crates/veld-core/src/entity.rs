//! The boundary to the embedding game's entity model.
//!
//! The wilderness core never owns entities. It reads and writes their
//! location pointers, inspects room contents and connection liveness,
//! and delegates move vetoes and messaging through [`EntityBackend`].
//! [`MemoryEntities`] is a self-contained implementation for tests and
//! embedders without an entity model of their own.

use crate::id::{OccupantId, RoomId, SpaceId};
use indexmap::IndexMap;
use smallvec::SmallVec;

/// Where an entity currently is.
///
/// The "no location" state is represented by the entity model returning
/// `None` rather than by a variant here, so a `Location` value always
/// names an actual place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// A projected room inside a wilderness space.
    Wilderness {
        /// The space that owns the room.
        space: SpaceId,
        /// The room within that space's slab.
        room: RoomId,
    },
    /// Any location outside the wilderness system, keyed however the
    /// embedder likes.
    Outside(u64),
}

/// Entity-model operations the wilderness core consumes.
///
/// Implementations must treat `set_location` as authoritative: after
/// `set_location(o, None)`, `o` no longer appears in any `contents`
/// result. The wilderness core relies on this when detaching occupants
/// from rooms that are about to be rebound or recycled.
pub trait EntityBackend {
    /// Current location pointer of `occupant`, or `None` if detached.
    fn location(&self, occupant: OccupantId) -> Option<Location>;

    /// Set or clear the location pointer of `occupant`.
    fn set_location(&mut self, occupant: OccupantId, location: Option<Location>);

    /// Entities currently located at `location`, in a stable order.
    fn contents(&self, location: Location) -> SmallVec<[OccupantId; 8]>;

    /// Whether `occupant` has a live session attached.
    ///
    /// Rooms whose every occupant lacks a live connection are eligible
    /// for recycling; a single live-connected occupant pins the room.
    fn has_live_connection(&self, occupant: OccupantId) -> bool;

    /// Short display name for `occupant`, used in departure and arrival
    /// announcements.
    fn name(&self, occupant: OccupantId) -> String {
        occupant.to_string()
    }

    /// Generic pre-move veto. Returning `false` aborts the traversal;
    /// the entity model communicates the refusal to the occupant.
    fn before_move(&mut self, _occupant: OccupantId) -> bool {
        true
    }

    /// Called after a traversal completed.
    fn after_move(&mut self, _occupant: OccupantId) {}

    /// Deliver `message` to every entity at `location` except `exclude`.
    fn announce(&mut self, _location: Location, _exclude: Option<OccupantId>, _message: &str) {}
}

/// Simple in-memory entity backend.
///
/// Tracks location pointers and connection flags in insertion order and
/// records every announcement for later inspection. Suitable for tests
/// and for embedders that have no persistent entity model.
#[derive(Debug, Default)]
pub struct MemoryEntities {
    locations: IndexMap<OccupantId, Location>,
    connected: IndexMap<OccupantId, bool>,
    messages: Vec<(Location, Option<OccupantId>, String)>,
}

impl MemoryEntities {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an occupant with a live connection and no location.
    pub fn add_connected(&mut self, occupant: OccupantId) {
        self.connected.insert(occupant, true);
    }

    /// Register an occupant without a live connection (e.g. an NPC).
    pub fn add_disconnected(&mut self, occupant: OccupantId) {
        self.connected.insert(occupant, false);
    }

    /// Flip an occupant's connection flag, simulating a session drop or
    /// reconnect.
    pub fn set_connected(&mut self, occupant: OccupantId, connected: bool) {
        self.connected.insert(occupant, connected);
    }

    /// Announcements recorded so far, in delivery order, as
    /// `(location, excluded occupant, message)`.
    pub fn messages(&self) -> &[(Location, Option<OccupantId>, String)] {
        &self.messages
    }
}

impl EntityBackend for MemoryEntities {
    fn location(&self, occupant: OccupantId) -> Option<Location> {
        self.locations.get(&occupant).copied()
    }

    fn set_location(&mut self, occupant: OccupantId, location: Option<Location>) {
        match location {
            Some(loc) => {
                self.locations.insert(occupant, loc);
            }
            None => {
                self.locations.shift_remove(&occupant);
            }
        }
    }

    fn contents(&self, location: Location) -> SmallVec<[OccupantId; 8]> {
        self.locations
            .iter()
            .filter(|(_, &loc)| loc == location)
            .map(|(&o, _)| o)
            .collect()
    }

    fn has_live_connection(&self, occupant: OccupantId) -> bool {
        self.connected.get(&occupant).copied().unwrap_or(false)
    }

    fn announce(&mut self, location: Location, exclude: Option<OccupantId>, message: &str) {
        self.messages.push((location, exclude, message.to_string()));
    }
}
