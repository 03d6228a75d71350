//! Pluggable map policy: coordinate validity, naming, room customization.

use crate::room::ProjectedRoom;
use indexmap::IndexMap;
use veld_core::{Coord, OccupantId};

/// Read-only view of a space, handed to [`MapProvider::is_valid`].
///
/// Providers may consult the view (e.g. to make validity depend on
/// crowding) but most only look at the coordinate.
#[derive(Debug)]
pub struct SpaceView<'a> {
    /// The space's name.
    pub name: &'a str,
    /// Tracked coordinates of every occupant currently in the space.
    pub occupant_coordinates: &'a IndexMap<OccupantId, Coord>,
}

/// Map policy supplied by the embedding application.
///
/// A provider decides which coordinates exist, what they are called,
/// and how a room is dressed up each time it is bound to a coordinate.
/// One implementation level is all that is expected: implement the
/// trait, override what you need, and pass it to
/// [`Space::new`](crate::Space::new) or
/// [`SpaceRegistry::create_space`](crate::SpaceRegistry::create_space).
///
/// # Example
///
/// A small pyramid-shaped map where only `.` cells are walkable:
///
/// ```
/// use veld_space::{MapProvider, SpaceView};
/// use veld_core::Coord;
///
/// const MAP: [&str; 4] = ["  .  ", " ... ", ".....", "....."];
///
/// struct Pyramid;
///
/// impl MapProvider for Pyramid {
///     fn is_valid(&self, _space: &SpaceView<'_>, coord: Coord) -> bool {
///         usize::try_from(coord.y)
///             .ok()
///             .and_then(|y| MAP.iter().rev().nth(y))
///             .and_then(|row| usize::try_from(coord.x).ok().and_then(|x| row.as_bytes().get(x)))
///             .map_or(false, |&cell| cell == b'.')
///     }
///
///     fn location_name(&self, coord: Coord) -> String {
///         if coord.y == 3 { "Atop the pyramid".into() } else { "Inside the pyramid".into() }
///     }
/// }
/// ```
pub trait MapProvider: Send + Sync + 'static {
    /// Whether `coord` can be occupied.
    ///
    /// Must be a pure function of `coord` (and the read-only view): the
    /// manager re-evaluates it on every rebind to refresh link
    /// permissions, and inconsistent answers would corrupt them.
    fn is_valid(&self, space: &SpaceView<'_>, coord: Coord) -> bool;

    /// Descriptive name for the location at `coord`.
    fn location_name(&self, coord: Coord) -> String {
        let _ = coord;
        "The wilderness".to_string()
    }

    /// Customization hook invoked every time a room's active coordinate
    /// is (re)bound, after occupants have been attached. `mover` is the
    /// occupant whose movement caused the rebind. Side effects on the
    /// room only, typically setting its description.
    fn on_room_bound(&self, coord: Coord, mover: OccupantId, room: &mut ProjectedRoom) {
        let _ = (coord, mover, room);
    }
}

/// Default provider: an infinite grid covering the first quadrant.
///
/// Valid iff `x >= 0 && y >= 0`; every location is called
/// "The wilderness"; rooms are left undecorated.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridMapProvider;

impl MapProvider for GridMapProvider {
    fn is_valid(&self, _space: &SpaceView<'_>, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0
    }
}
