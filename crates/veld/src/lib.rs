//! Veld: wilderness maps for games. Huge coordinate grids backed by a
//! small recycled room pool.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Veld sub-crates. For most users, adding `veld` as a single
//! dependency is sufficient.
//!
//! A wilderness space does not pre-build a room per coordinate. Instead
//! each occupant gets a room that is *rebound* to wherever they walk;
//! occupants meeting at the same coordinate merge into one room, and
//! vacated rooms return to a pool for reuse. The map itself (which
//! coordinates exist, what they are called, how rooms are decorated)
//! is a [`MapProvider`] policy supplied by the embedding game.
//!
//! # Quick start
//!
//! ```rust
//! use veld::{Coord, Direction, GridMapProvider, MemoryEntities, OccupantId, SpaceRegistry};
//!
//! let mut entities = MemoryEntities::new();
//! let ada = OccupantId(1);
//! entities.add_connected(ada);
//!
//! let mut registry = SpaceRegistry::new();
//! registry.create_space("default", Box::new(GridMapProvider));
//! registry.enter(&mut entities, ada, Coord::ORIGIN, "default").unwrap();
//!
//! let space = registry.space_mut("default").unwrap();
//! space.traverse(&mut entities, ada, Direction::Northeast).unwrap();
//! assert_eq!(space.coordinates_of(ada), Some(Coord::new(1, 1)));
//!
//! // Only one room was ever allocated: it moved with ada.
//! assert_eq!(space.allocated_room_count(), 1);
//! ```
//!
//! # Crates
//!
//! | Module source | Contents |
//! |---------------|----------|
//! | `veld-core` | [`Coord`], [`Direction`], IDs, [`WildError`], [`EntityBackend`] |
//! | `veld-space` | [`Space`], [`SpaceRegistry`], [`MapProvider`], rooms and links |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use veld_core::{
    Coord, Direction, EntityBackend, Location, MemoryEntities, OccupantId, RoomId, SpaceId,
    UnknownDirection, WildError,
};
pub use veld_space::{
    DirectionalLink, GridMapProvider, MapProvider, ProjectedRoom, Space, SpaceRegistry,
    SpaceSnapshot, SpaceView, DEFAULT_SPACE_NAME,
};
