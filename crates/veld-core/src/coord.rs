//! Integer grid coordinates and the 8 compass directions.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// A coordinate inside a wilderness space.
///
/// `x` grows to the east and `y` grows to the north, so `(0, 0)` is the
/// south-west corner of the default first-quadrant map. Coordinates
/// have no inherent bounds; validity is decided by the space's map
/// provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// West–east axis, growing eastward.
    pub x: i32,
    /// South–north axis, growing northward.
    pub y: i32,
}

impl Coord {
    /// The `(0, 0)` coordinate.
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    /// Create a coordinate from its two axes.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent coordinate one step in `direction`.
    ///
    /// North-family directions adjust `y` by `+1`, south-family by `-1`;
    /// west-family adjust `x` by `-1`, east-family by `+1`; diagonals
    /// adjust both axes. Pure and total; validity of the result is a
    /// separate, policy-defined question.
    pub fn neighbour(self, direction: Direction) -> Coord {
        let (dx, dy) = direction.offset();
        Coord::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

/// One of the 8 compass directions a wilderness room links out to.
///
/// The discriminant order matches [`Direction::ALL`], so a direction
/// can index a per-direction array directly via `dir as usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `(0, +1)`
    North,
    /// `(+1, +1)`
    Northeast,
    /// `(+1, 0)`
    East,
    /// `(+1, -1)`
    Southeast,
    /// `(0, -1)`
    South,
    /// `(-1, -1)`
    Southwest,
    /// `(-1, 0)`
    West,
    /// `(-1, +1)`
    Northwest,
}

impl Direction {
    /// All 8 directions, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::Northeast,
        Direction::East,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::West,
        Direction::Northwest,
    ];

    /// The `(dx, dy)` offset applied to a coordinate when stepping this way.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::Northeast => (1, 1),
            Direction::East => (1, 0),
            Direction::Southeast => (1, -1),
            Direction::South => (0, -1),
            Direction::Southwest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::Northwest => (-1, 1),
        }
    }

    /// Full lowercase name, e.g. `"northeast"`.
    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::Northeast => "northeast",
            Direction::East => "east",
            Direction::Southeast => "southeast",
            Direction::South => "south",
            Direction::Southwest => "southwest",
            Direction::West => "west",
            Direction::Northwest => "northwest",
        }
    }

    /// Conventional abbreviation, e.g. `"ne"`.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::Northeast => "ne",
            Direction::East => "e",
            Direction::Southeast => "se",
            Direction::South => "s",
            Direction::Southwest => "sw",
            Direction::West => "w",
            Direction::Northwest => "nw",
        }
    }

    /// The direction pointing the opposite way.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::Northeast => Direction::Southwest,
            Direction::East => Direction::West,
            Direction::Southeast => Direction::Northwest,
            Direction::South => Direction::North,
            Direction::Southwest => Direction::Northeast,
            Direction::West => Direction::East,
            Direction::Northwest => Direction::Southeast,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognized direction name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownDirection {
    /// The input that failed to parse.
    pub input: String,
}

impl fmt::Display for UnknownDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction '{}'", self.input)
    }
}

impl Error for UnknownDirection {}

impl FromStr for Direction {
    type Err = UnknownDirection;

    /// Accepts both full names (`"northeast"`) and abbreviations
    /// (`"ne"`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Direction::ALL
            .into_iter()
            .find(|d| d.name() == lower || d.abbreviation() == lower)
            .ok_or_else(|| UnknownDirection {
                input: s.to_string(),
            })
    }
}
