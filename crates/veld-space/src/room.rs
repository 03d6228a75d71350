//! Room resources projected onto coordinates, and their fixed links.

use veld_core::{Coord, Direction, RoomId};

/// One of the 8 fixed traversal links on a [`ProjectedRoom`].
///
/// Links are created once when the room is allocated and live for the
/// room's entire life. A link carries no destination of its own: the
/// destination coordinate is computed from the room's bound coordinate
/// at traversal time. Its only mutable state is the traversal
/// permission, refreshed on every rebind.
#[derive(Clone, Copy, Debug)]
pub struct DirectionalLink {
    direction: Direction,
    passable: bool,
}

impl DirectionalLink {
    fn new(direction: Direction) -> Self {
        // Inert until the owning room is first bound.
        Self {
            direction,
            passable: false,
        }
    }

    /// The compass direction this link points.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the link's destination was a valid coordinate at the
    /// last rebind of the owning room.
    pub fn is_passable(&self) -> bool {
        self.passable
    }

    pub(crate) fn set_passable(&mut self, passable: bool) {
        self.passable = passable;
    }
}

/// A recyclable room resource, bound to at most one coordinate at a time.
///
/// A projected room is a passive container: the owning
/// [`Space`](crate::Space) drives every binding and recycling decision.
/// While pooled, `bound_coordinate` is `None` and all links are inert.
#[derive(Clone, Debug)]
pub struct ProjectedRoom {
    id: RoomId,
    bound: Option<Coord>,
    name: String,
    description: String,
    links: [DirectionalLink; 8],
}

impl ProjectedRoom {
    pub(crate) fn new(id: RoomId) -> Self {
        Self {
            id,
            bound: None,
            name: "Wilderness".to_string(),
            description: String::new(),
            links: Direction::ALL.map(DirectionalLink::new),
        }
    }

    /// This room's handle within the owning space.
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// The coordinate this room currently projects, `None` while pooled.
    pub fn bound_coordinate(&self) -> Option<Coord> {
        self.bound
    }

    pub(crate) fn set_bound(&mut self, coord: Option<Coord>) {
        self.bound = coord;
    }

    /// The link pointing in `direction`.
    pub fn link(&self, direction: Direction) -> &DirectionalLink {
        &self.links[direction as usize]
    }

    /// All 8 links, in [`Direction::ALL`] order.
    pub fn links(&self) -> &[DirectionalLink; 8] {
        &self.links
    }

    pub(crate) fn set_link_permissions(&mut self, passable: [bool; 8]) {
        for (link, ok) in self.links.iter_mut().zip(passable) {
            link.set_passable(ok);
        }
    }

    /// Display name of the location this room currently projects.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the display name. Called by the manager on every rebind;
    /// providers may override it again from their
    /// [`on_room_bound`](crate::MapProvider::on_room_bound) hook.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Descriptive text for the current location, if any.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Set the descriptive text, typically from a provider hook.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Name plus active coordinate, e.g. `"The wilderness (3, 4)"`.
    pub fn display_name(&self) -> String {
        match self.bound {
            Some(coord) => format!("{} {}", self.name, coord),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_room_is_inert() {
        let room = ProjectedRoom::new(RoomId(0));
        assert_eq!(room.bound_coordinate(), None);
        assert!(room.links().iter().all(|l| !l.is_passable()));
    }

    #[test]
    fn links_cover_all_directions_once() {
        let room = ProjectedRoom::new(RoomId(0));
        for d in Direction::ALL {
            assert_eq!(room.link(d).direction(), d);
        }
    }

    #[test]
    fn permissions_follow_direction_order() {
        let mut room = ProjectedRoom::new(RoomId(0));
        let mut passable = [false; 8];
        passable[Direction::East as usize] = true;
        room.set_link_permissions(passable);
        assert!(room.link(Direction::East).is_passable());
        assert!(!room.link(Direction::West).is_passable());
    }

    #[test]
    fn display_name_includes_coordinate() {
        let mut room = ProjectedRoom::new(RoomId(0));
        room.set_name("The moors");
        room.set_bound(Some(Coord::new(3, 4)));
        assert_eq!(room.display_name(), "The moors (3, 4)");
    }
}
