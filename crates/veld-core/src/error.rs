//! Error types for wilderness operations.
//!
//! Every variant is a clean refusal: an operation that returns one of
//! these has not mutated any space state. Corrupted room/coordinate
//! mappings are never surfaced as errors; they are programming-invariant
//! violations guarded by debug assertions inside the manager.

use crate::coord::{Coord, Direction};
use crate::id::OccupantId;
use std::error::Error;
use std::fmt;

/// Errors from wilderness operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WildError {
    /// The requested coordinate was rejected by the space's map provider.
    InvalidCoordinate {
        /// The rejected coordinate.
        coord: Coord,
    },
    /// No space with the requested name has been created.
    UnknownSpace {
        /// The name that was looked up.
        name: String,
    },
    /// The directional link's destination is currently invalid,
    /// surfaced to the user as a normal "you cannot go there" outcome.
    TraversalBlocked {
        /// The direction that was attempted.
        direction: Direction,
    },
    /// The entity model's pre-move hook refused the move. The entity
    /// model owns communicating the refusal to the occupant.
    MoveVetoed {
        /// The occupant whose move was refused.
        occupant: OccupantId,
    },
    /// A traversal was requested for an occupant with no coordinate
    /// record (or no room) in this space.
    NotInSpace {
        /// The occupant that is not a member of the space.
        occupant: OccupantId,
    },
}

impl fmt::Display for WildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate { coord } => {
                write!(f, "coordinate {coord} is not a valid location")
            }
            Self::UnknownSpace { name } => write!(f, "no space named '{name}' exists"),
            Self::TraversalBlocked { direction } => {
                write!(f, "cannot go {direction} from here")
            }
            Self::MoveVetoed { occupant } => {
                write!(f, "occupant {occupant} refused the move")
            }
            Self::NotInSpace { occupant } => {
                write!(f, "occupant {occupant} is not inside this space")
            }
        }
    }
}

impl Error for WildError {}
