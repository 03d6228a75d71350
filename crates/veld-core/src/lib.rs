//! Core types for the Veld wilderness system.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Veld workspace:
//! grid coordinates and compass directions, strongly-typed identifiers,
//! the error taxonomy, and the [`EntityBackend`] boundary through which
//! the wilderness core talks to the embedding game's entity model.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod entity;
pub mod error;
pub mod id;

pub use coord::{Coord, Direction, UnknownDirection};
pub use entity::{EntityBackend, Location, MemoryEntities};
pub use error::WildError;
pub use id::{OccupantId, RoomId, SpaceId};
