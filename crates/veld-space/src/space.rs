//! The `Space` manager: occupant tracking, room binding, merge/split/recycle.
//!
//! A space owns three tables (occupant→coordinate, coordinate→room, and
//! the free pool) plus the slab of every room it ever allocated. Rooms
//! are recycled into the pool when vacated, never destroyed, so the slab
//! only grows to the peak number of simultaneously occupied coordinates.
//!
//! [`Space::move_occupant`] is the core algorithm. Given a valid target
//! coordinate it resolves the room to use (an existing room at the target
//! merges occupants; a shared origin room splits off a fresh one; an
//! unaccompanied in-space move rebinds the occupant's own room in place,
//! allocating nothing), rebinds it, and recycles whatever the move left
//! empty. All of this happens behind `&mut self`, so two moves on one
//! space can never interleave.

use crate::provider::{MapProvider, SpaceView};
use crate::room::ProjectedRoom;
use indexmap::IndexMap;
use log::{debug, trace};
use smallvec::SmallVec;
use veld_core::{Coord, Direction, EntityBackend, Location, OccupantId, RoomId, SpaceId, WildError};

/// The manager of a single named coordinate-addressed region and its
/// room pool.
pub struct Space {
    id: SpaceId,
    name: String,
    provider: Box<dyn MapProvider>,
    /// Tracked coordinate of every occupant currently in the space.
    pub(crate) occupant_coordinates: IndexMap<OccupantId, Coord>,
    /// At most one room per coordinate; a coordinate with no occupant
    /// has no entry.
    pub(crate) active_rooms: IndexMap<Coord, RoomId>,
    /// Every room ever allocated, indexed by [`RoomId`].
    pub(crate) rooms: Vec<ProjectedRoom>,
    /// Rooms not currently bound to any coordinate.
    pub(crate) free_pool: Vec<RoomId>,
}

impl Space {
    /// Create an empty space with the given name and map policy.
    ///
    /// The provider is fixed for the space's lifetime.
    pub fn new(name: impl Into<String>, provider: Box<dyn MapProvider>) -> Self {
        Self {
            id: SpaceId::next(),
            name: name.into(),
            provider,
            occupant_coordinates: IndexMap::new(),
            active_rooms: IndexMap::new(),
            rooms: Vec::new(),
            free_pool: Vec::new(),
        }
    }

    /// Unique identifier of this space instance.
    pub fn id(&self) -> SpaceId {
        self.id
    }

    /// The space's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `coord` can be occupied, per the map provider.
    pub fn is_valid_coordinate(&self, coord: Coord) -> bool {
        let view = SpaceView {
            name: &self.name,
            occupant_coordinates: &self.occupant_coordinates,
        };
        self.provider.is_valid(&view, coord)
    }

    /// Tracked coordinate of `occupant`, if it is a member of this space.
    pub fn coordinates_of(&self, occupant: OccupantId) -> Option<Coord> {
        self.occupant_coordinates.get(&occupant).copied()
    }

    /// Every occupant tracked at `coord`, in entry order.
    ///
    /// Linear scan of the occupant table; fine at expected occupancy.
    pub fn occupants_at(&self, coord: Coord) -> SmallVec<[OccupantId; 8]> {
        self.occupant_coordinates
            .iter()
            .filter(|(_, &c)| c == coord)
            .map(|(&o, _)| o)
            .collect()
    }

    /// The room currently bound to `coord`, if any.
    pub fn room_at(&self, coord: Coord) -> Option<&ProjectedRoom> {
        let id = self.active_rooms.get(&coord).copied()?;
        Some(&self.rooms[id.index()])
    }

    /// Resolve a room handle. `None` if the handle was never allocated
    /// by this space.
    pub fn room(&self, id: RoomId) -> Option<&ProjectedRoom> {
        self.rooms.get(id.index())
    }

    /// Number of rooms currently bound to a coordinate.
    pub fn active_room_count(&self) -> usize {
        self.active_rooms.len()
    }

    /// Number of rooms waiting in the free pool.
    pub fn free_room_count(&self) -> usize {
        self.free_pool.len()
    }

    /// Total rooms ever allocated (active + pooled).
    pub fn allocated_room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Move `occupant` to `new_coord`, entering the space if it was not
    /// already a member.
    ///
    /// Fails with [`WildError::InvalidCoordinate`], with zero state
    /// mutation, if the provider rejects the target. Otherwise the
    /// occupant's tracked coordinate is updated and a room is resolved:
    ///
    /// - a room already bound to `new_coord` is reused (merge);
    /// - an occupant arriving from outside the space gets a room from
    ///   the pool, or a new one if the pool is empty;
    /// - an in-space move away from co-occupants allocates a fresh room
    ///   and leaves theirs untouched (split);
    /// - an in-space move that empties the old room rebinds that same
    ///   room in place, allocating nothing.
    ///
    /// The tracked coordinate, never the possibly stale location
    /// pointer, decides which room an occupant belongs to, so a
    /// dropped-and-resumed occupant always rejoins the room at its
    /// recorded coordinate.
    pub fn move_occupant(
        &mut self,
        entities: &mut dyn EntityBackend,
        occupant: OccupantId,
        new_coord: Coord,
    ) -> Result<(), WildError> {
        if !self.is_valid_coordinate(new_coord) {
            return Err(WildError::InvalidCoordinate { coord: new_coord });
        }

        let old_room = self.own_room(entities.location(occupant));
        self.occupant_coordinates.insert(occupant, new_coord);
        // Detach now so the occupant cannot dangle in a room that is
        // recycled or rebound below.
        entities.set_location(occupant, None);

        let (target, leftover) = match self.active_rooms.get(&new_coord).copied() {
            // Merge: a room is already projecting the target coordinate.
            Some(existing) => (existing, old_room),
            None => match old_room.filter(|&r| self.room_is_active(r)) {
                // Split: co-occupants with live connections keep the old
                // room where it is.
                Some(old) if self.room_has_live_occupant(&*entities, old) => {
                    (self.allocate(new_coord), None)
                }
                // The old room is being vacated entirely: rebind it in
                // place instead of allocating.
                Some(old) => (old, None),
                // Fresh entry from outside the space (or a stale pointer
                // to a room that has since been pooled).
                None => (self.allocate(new_coord), None),
            },
        };

        self.bind(entities, target, new_coord, occupant);
        if let Some(room) = leftover {
            self.try_recycle(entities, room, Some(target));
        }
        debug!(
            "space '{}': {} now at {} in {}",
            self.name, occupant, new_coord, target
        );
        Ok(())
    }

    /// Traverse one of the 8 directional links out of the occupant's
    /// current room.
    ///
    /// Rejects with [`WildError::TraversalBlocked`] if the link's
    /// destination was invalid at the last rebind, and with
    /// [`WildError::MoveVetoed`] if the entity model's pre-move hook
    /// refuses (the entity model communicates that refusal itself).
    /// Departure and arrival are announced to the rooms involved.
    pub fn traverse(
        &mut self,
        entities: &mut dyn EntityBackend,
        occupant: OccupantId,
        direction: Direction,
    ) -> Result<(), WildError> {
        let current = self
            .coordinates_of(occupant)
            .ok_or(WildError::NotInSpace { occupant })?;
        let room = self
            .own_room(entities.location(occupant))
            .ok_or(WildError::NotInSpace { occupant })?;

        if !self.rooms[room.index()].link(direction).is_passable() {
            return Err(WildError::TraversalBlocked { direction });
        }
        if !entities.before_move(occupant) {
            return Err(WildError::MoveVetoed { occupant });
        }

        let destination = current.neighbour(direction);
        let who = entities.name(occupant);
        entities.announce(
            Location::Wilderness {
                space: self.id,
                room,
            },
            Some(occupant),
            &format!("{who} leaves to {destination}"),
        );

        self.move_occupant(entities, occupant, destination)?;

        if let Some(arrived) = entities.location(occupant) {
            entities.announce(
                arrived,
                Some(occupant),
                &format!("{who} arrives from {current}"),
            );
        }
        entities.after_move(occupant);
        Ok(())
    }

    /// Notification that `occupant` left the space by external means
    /// (teleport, deletion, …).
    ///
    /// The entity model is obligated to invoke this after the occupant's
    /// location pointer has been updated to its new, non-wilderness
    /// value. Drops the coordinate record and recycles the formerly
    /// occupied room if nothing live remains in it.
    pub fn leave(&mut self, entities: &mut dyn EntityBackend, occupant: OccupantId) {
        let Some(coord) = self.occupant_coordinates.shift_remove(&occupant) else {
            return;
        };
        debug!("space '{}': {} left from {}", self.name, occupant, coord);
        if let Some(room) = self.active_rooms.get(&coord).copied() {
            self.try_recycle(entities, room, None);
        }
    }

    /// Rebind `room` so that it projects `new_coord`.
    ///
    /// The atomic unit of "what a room is" changing: re-registers the
    /// room under the new coordinate, detaches occupants being split
    /// away, attaches everyone tracked at the new coordinate, refreshes
    /// link permissions, and runs the provider hook.
    pub(crate) fn bind(
        &mut self,
        entities: &mut dyn EntityBackend,
        room: RoomId,
        new_coord: Coord,
        mover: OccupantId,
    ) {
        if let Some(old_coord) = self.rooms[room.index()].bound_coordinate() {
            if self.active_rooms.get(&old_coord).copied() == Some(room) {
                self.active_rooms.shift_remove(&old_coord);
            }
        }
        self.active_rooms.insert(new_coord, room);
        self.rooms[room.index()].set_bound(Some(new_coord));
        trace!("space '{}': bound {} to {}", self.name, room, new_coord);

        let here = Location::Wilderness {
            space: self.id,
            room,
        };
        // Occupants whose tracked coordinate moved elsewhere are being
        // intentionally separated by a split.
        for straggler in entities.contents(here) {
            if self.occupant_coordinates.get(&straggler).copied() != Some(new_coord) {
                trace!("space '{}': detached {} from {}", self.name, straggler, room);
                entities.set_location(straggler, None);
            }
        }
        // Everyone tracked at the new coordinate joins the room: merges
        // and reconnects alike.
        let arrivals: SmallVec<[OccupantId; 8]> = self
            .occupant_coordinates
            .iter()
            .filter(|(_, &c)| c == new_coord)
            .map(|(&o, _)| o)
            .collect();
        for arrival in arrivals {
            entities.set_location(arrival, Some(here));
        }

        let passable = Direction::ALL.map(|d| self.is_valid_coordinate(new_coord.neighbour(d)));
        let name = self.provider.location_name(new_coord);
        let room_ref = &mut self.rooms[room.index()];
        room_ref.set_link_permissions(passable);
        room_ref.set_name(name);
        self.provider
            .on_room_bound(new_coord, mover, &mut self.rooms[room.index()]);
    }

    /// Take a room from the free pool, or grow the slab if it is empty,
    /// and register it under `coord`.
    pub(crate) fn allocate(&mut self, coord: Coord) -> RoomId {
        let id = match self.free_pool.pop() {
            Some(id) => {
                debug!("space '{}': reusing pooled {} for {}", self.name, id, coord);
                id
            }
            None => {
                let id = RoomId(self.rooms.len() as u32);
                self.rooms.push(ProjectedRoom::new(id));
                debug!("space '{}': allocated new {} for {}", self.name, id, coord);
                id
            }
        };
        self.active_rooms.insert(coord, id);
        id
    }

    /// Return `room` to the free pool if nothing live remains in it.
    ///
    /// Skipped when the room is `just_bound`, already pooled, or still
    /// holds any occupant with a live connection (conservative: a room
    /// is never torn down around a connected occupant). Contents without
    /// live connections are detached when the room is pooled.
    fn try_recycle(
        &mut self,
        entities: &mut dyn EntityBackend,
        room: RoomId,
        just_bound: Option<RoomId>,
    ) {
        if Some(room) == just_bound {
            return;
        }
        let Some(coord) = self.rooms[room.index()].bound_coordinate() else {
            return;
        };
        if self.active_rooms.get(&coord).copied() != Some(room) {
            return;
        }
        let here = Location::Wilderness {
            space: self.id,
            room,
        };
        let contents = entities.contents(here);
        if contents
            .iter()
            .any(|&o| entities.has_live_connection(o))
        {
            return;
        }
        // A live-connected occupant tracked here but not attached would
        // mean the coordinate tables and location pointers disagree.
        debug_assert!(
            self.occupant_coordinates
                .iter()
                .all(|(&o, &c)| c != coord || !entities.has_live_connection(o)),
            "recycling a room whose coordinate still has live occupants"
        );
        for straggler in contents {
            trace!(
                "space '{}': detached {} from recycled {}",
                self.name,
                straggler,
                room
            );
            entities.set_location(straggler, None);
        }
        self.active_rooms.shift_remove(&coord);
        self.rooms[room.index()].set_bound(None);
        self.free_pool.push(room);
        debug!("space '{}': recycled {} from {}", self.name, room, coord);
    }

    /// `location` as a room handle, if it is a projected room of *this*
    /// space.
    fn own_room(&self, location: Option<Location>) -> Option<RoomId> {
        match location {
            Some(Location::Wilderness { space, room }) if space == self.id => Some(room),
            _ => None,
        }
    }

    /// Whether `room` is currently bound and registered under its
    /// coordinate.
    fn room_is_active(&self, room: RoomId) -> bool {
        self.rooms[room.index()]
            .bound_coordinate()
            .is_some_and(|c| self.active_rooms.get(&c).copied() == Some(room))
    }

    /// Whether any physical occupant of `room` has a live connection.
    ///
    /// Iterates room contents (not the coordinate table) on purpose:
    /// contents left behind without a live connection do not force a
    /// split, matching the conservative recycling policy.
    fn room_has_live_occupant(&self, entities: &dyn EntityBackend, room: RoomId) -> bool {
        let here = Location::Wilderness {
            space: self.id,
            room,
        };
        entities
            .contents(here)
            .iter()
            .any(|&o| entities.has_live_connection(o))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::GridMapProvider;
    use veld_core::MemoryEntities;

    const A: OccupantId = OccupantId(1);
    const B: OccupantId = OccupantId(2);

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    fn space() -> Space {
        Space::new("default", Box::new(GridMapProvider))
    }

    fn entities() -> MemoryEntities {
        let mut e = MemoryEntities::new();
        e.add_connected(A);
        e.add_connected(B);
        e
    }

    fn room_of(e: &MemoryEntities, o: OccupantId) -> RoomId {
        match e.location(o) {
            Some(Location::Wilderness { room, .. }) => room,
            other => panic!("{o} is not in a wilderness room: {other:?}"),
        }
    }

    // ── Entry and coherence ─────────────────────────────────────

    #[test]
    fn entering_binds_a_room_and_attaches() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();

        assert_eq!(s.coordinates_of(A), Some(c(0, 0)));
        assert_eq!(s.occupants_at(c(0, 0)).as_slice(), &[A]);
        let room = room_of(&e, A);
        assert_eq!(s.room(room).unwrap().bound_coordinate(), Some(c(0, 0)));
        assert_eq!(s.active_room_count(), 1);
        assert_eq!(s.free_room_count(), 0);
    }

    #[test]
    fn location_always_matches_active_room() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        s.move_occupant(&mut e, B, c(2, 3)).unwrap();
        s.move_occupant(&mut e, A, c(2, 3)).unwrap();
        s.move_occupant(&mut e, B, c(4, 4)).unwrap();

        for (&o, &coord) in &s.occupant_coordinates {
            let room = room_of(&e, o);
            assert_eq!(s.active_rooms.get(&coord).copied(), Some(room));
            assert_eq!(s.room(room).unwrap().bound_coordinate(), Some(coord));
        }
    }

    // ── Merge ───────────────────────────────────────────────────

    #[test]
    fn converging_occupants_share_one_room() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        s.move_occupant(&mut e, B, c(1, 1)).unwrap();
        s.move_occupant(&mut e, B, c(0, 0)).unwrap();

        assert_eq!(room_of(&e, A), room_of(&e, B));
        assert_eq!(s.occupants_at(c(0, 0)).as_slice(), &[A, B]);
        assert_eq!(s.active_room_count(), 1);
        // B's vacated room went back to the pool.
        assert_eq!(s.free_room_count(), 1);
    }

    // ── Split ───────────────────────────────────────────────────

    #[test]
    fn departing_occupant_gets_a_fresh_room() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        s.move_occupant(&mut e, B, c(0, 0)).unwrap();
        let shared = room_of(&e, A);

        s.move_occupant(&mut e, A, c(1, 0)).unwrap();

        assert_ne!(room_of(&e, A), room_of(&e, B));
        assert_eq!(room_of(&e, B), shared);
        assert_eq!(s.room(shared).unwrap().bound_coordinate(), Some(c(0, 0)));
        assert_eq!(
            s.room(room_of(&e, A)).unwrap().bound_coordinate(),
            Some(c(1, 0))
        );
    }

    #[test]
    fn room_left_to_disconnected_occupant_is_reused() {
        // The split check iterates room contents for live connections:
        // an NPC left behind does not force a fresh allocation.
        let mut s = space();
        let mut e = entities();
        let npc = OccupantId(3);
        e.add_disconnected(npc);

        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        s.move_occupant(&mut e, npc, c(0, 0)).unwrap();
        let shared = room_of(&e, A);

        s.move_occupant(&mut e, A, c(1, 0)).unwrap();

        // A took the old room with it; the NPC is detached but still
        // tracked at the old coordinate.
        assert_eq!(room_of(&e, A), shared);
        assert_eq!(e.location(npc), None);
        assert_eq!(s.coordinates_of(npc), Some(c(0, 0)));
        assert_eq!(s.allocated_room_count(), 1);

        // Moving back re-attaches the NPC.
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        assert_eq!(room_of(&e, npc), room_of(&e, A));
    }

    // ── Unaccompanied moves ─────────────────────────────────────

    #[test]
    fn unaccompanied_move_allocates_nothing() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        let room = room_of(&e, A);

        s.move_occupant(&mut e, A, c(5, 7)).unwrap();

        assert_eq!(room_of(&e, A), room);
        assert_eq!(s.allocated_room_count(), 1);
        assert_eq!(s.free_room_count(), 0);
        assert_eq!(s.room(room).unwrap().bound_coordinate(), Some(c(5, 7)));
        assert!(s.room_at(c(0, 0)).is_none());
    }

    #[test]
    fn moving_to_own_coordinate_is_harmless() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(2, 2)).unwrap();
        let room = room_of(&e, A);

        s.move_occupant(&mut e, A, c(2, 2)).unwrap();

        assert_eq!(room_of(&e, A), room);
        assert_eq!(s.active_room_count(), 1);
        assert_eq!(s.free_room_count(), 0);
    }

    // ── Invalid moves ───────────────────────────────────────────

    #[test]
    fn invalid_target_mutates_nothing() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        let room = room_of(&e, A);

        let err = s.move_occupant(&mut e, A, c(-1, 0)).unwrap_err();
        assert_eq!(err, WildError::InvalidCoordinate { coord: c(-1, 0) });

        assert_eq!(s.coordinates_of(A), Some(c(0, 0)));
        assert_eq!(room_of(&e, A), room);
        assert_eq!(s.active_room_count(), 1);
        assert_eq!(s.free_room_count(), 0);
    }

    #[test]
    fn invalid_entry_leaves_space_empty() {
        let mut s = space();
        let mut e = entities();
        assert!(s.move_occupant(&mut e, A, c(0, -5)).is_err());
        assert_eq!(s.coordinates_of(A), None);
        assert_eq!(s.allocated_room_count(), 0);
    }

    // ── Pool conservation ───────────────────────────────────────

    #[test]
    fn rooms_are_recycled_never_destroyed() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        s.move_occupant(&mut e, B, c(3, 3)).unwrap();
        assert_eq!(s.allocated_room_count(), 2);

        s.move_occupant(&mut e, B, c(0, 0)).unwrap(); // merge
        assert_eq!(s.allocated_room_count(), 2);
        assert_eq!(s.free_room_count(), 1);

        s.move_occupant(&mut e, B, c(3, 3)).unwrap(); // split re-uses the pool
        assert_eq!(s.allocated_room_count(), 2);
        assert_eq!(s.free_room_count(), 0);
    }

    // ── Leaving ─────────────────────────────────────────────────

    #[test]
    fn leaving_recycles_the_vacated_room() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();

        // Teleported elsewhere: the entity model moved the pointer and
        // then notifies the space.
        e.set_location(A, Some(Location::Outside(99)));
        s.leave(&mut e, A);

        assert_eq!(s.coordinates_of(A), None);
        assert_eq!(s.active_room_count(), 0);
        assert_eq!(s.free_room_count(), 1);
    }

    #[test]
    fn leaving_a_shared_room_keeps_it_active() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        s.move_occupant(&mut e, B, c(0, 0)).unwrap();

        e.set_location(A, Some(Location::Outside(99)));
        s.leave(&mut e, A);

        assert_eq!(s.occupants_at(c(0, 0)).as_slice(), &[B]);
        assert_eq!(s.active_room_count(), 1);
        assert_eq!(s.free_room_count(), 0);
    }

    #[test]
    fn leave_for_unknown_occupant_is_a_no_op() {
        let mut s = space();
        let mut e = entities();
        s.leave(&mut e, A);
        assert_eq!(s.allocated_room_count(), 0);
    }

    // ── Reconnection ────────────────────────────────────────────

    #[test]
    fn reconnecting_occupant_rejoins_its_recorded_room() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(1, 1)).unwrap();
        s.move_occupant(&mut e, B, c(1, 1)).unwrap();

        // A's session drops: pointer externally cleared.
        e.set_location(A, None);
        e.set_connected(A, false);

        // B wanders off and returns, churning the room pool.
        s.move_occupant(&mut e, B, c(2, 2)).unwrap();
        s.move_occupant(&mut e, B, c(1, 1)).unwrap();

        e.set_connected(A, true);
        s.move_occupant(&mut e, A, c(1, 1)).unwrap();

        assert_eq!(room_of(&e, A), room_of(&e, B));
        assert_eq!(s.occupants_at(c(1, 1)).as_slice(), &[A, B]);
    }

    // ── Link permissions ────────────────────────────────────────

    #[test]
    fn origin_room_blocks_out_of_map_links() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        let room = s.room_at(c(0, 0)).unwrap();

        assert!(room.link(Direction::North).is_passable());
        assert!(room.link(Direction::Northeast).is_passable());
        assert!(room.link(Direction::East).is_passable());
        assert!(!room.link(Direction::South).is_passable());
        assert!(!room.link(Direction::Southwest).is_passable());
        assert!(!room.link(Direction::Southeast).is_passable());
        assert!(!room.link(Direction::West).is_passable());
        assert!(!room.link(Direction::Northwest).is_passable());
    }

    #[test]
    fn link_permissions_refresh_on_rebind() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        s.move_occupant(&mut e, A, c(5, 5)).unwrap();
        let room = s.room_at(c(5, 5)).unwrap();
        assert!(room.links().iter().all(|l| l.is_passable()));
    }

    // ── Traversal ───────────────────────────────────────────────

    #[test]
    fn traversal_moves_one_step() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        s.traverse(&mut e, A, Direction::Northeast).unwrap();
        assert_eq!(s.coordinates_of(A), Some(c(1, 1)));
    }

    #[test]
    fn blocked_link_refuses_traversal() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        let err = s.traverse(&mut e, A, Direction::West).unwrap_err();
        assert_eq!(
            err,
            WildError::TraversalBlocked {
                direction: Direction::West
            }
        );
        assert_eq!(s.coordinates_of(A), Some(c(0, 0)));
    }

    #[test]
    fn traversal_requires_membership() {
        let mut s = space();
        let mut e = entities();
        let err = s.traverse(&mut e, A, Direction::North).unwrap_err();
        assert_eq!(err, WildError::NotInSpace { occupant: A });
    }

    /// Backend whose pre-move hook can refuse, recording completions.
    struct Hooked {
        inner: MemoryEntities,
        allow: bool,
        completed: Vec<OccupantId>,
    }

    impl EntityBackend for Hooked {
        fn location(&self, occupant: OccupantId) -> Option<Location> {
            self.inner.location(occupant)
        }
        fn set_location(&mut self, occupant: OccupantId, location: Option<Location>) {
            self.inner.set_location(occupant, location);
        }
        fn contents(&self, location: Location) -> SmallVec<[OccupantId; 8]> {
            self.inner.contents(location)
        }
        fn has_live_connection(&self, occupant: OccupantId) -> bool {
            self.inner.has_live_connection(occupant)
        }
        fn before_move(&mut self, _occupant: OccupantId) -> bool {
            self.allow
        }
        fn after_move(&mut self, occupant: OccupantId) {
            self.completed.push(occupant);
        }
    }

    fn hooked(allow: bool) -> Hooked {
        Hooked {
            inner: entities(),
            allow,
            completed: Vec::new(),
        }
    }

    #[test]
    fn vetoed_traversal_changes_nothing() {
        let mut s = space();
        let mut e = hooked(false);
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        let room = room_of(&e.inner, A);

        let err = s.traverse(&mut e, A, Direction::North).unwrap_err();
        assert_eq!(err, WildError::MoveVetoed { occupant: A });

        assert_eq!(s.coordinates_of(A), Some(c(0, 0)));
        assert_eq!(room_of(&e.inner, A), room);
        assert_eq!(s.active_room_count(), 1);
        assert_eq!(s.free_room_count(), 0);
        assert!(e.completed.is_empty());
    }

    #[test]
    fn after_move_fires_once_per_completed_traversal() {
        let mut s = space();
        let mut e = hooked(true);
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();

        s.traverse(&mut e, A, Direction::North).unwrap();
        assert_eq!(e.completed, vec![A]);

        // A blocked link fails before the hooks run.
        let _ = s.traverse(&mut e, A, Direction::West).unwrap_err();
        assert_eq!(e.completed, vec![A]);
    }

    #[test]
    fn traversal_announces_departure_and_arrival() {
        let mut s = space();
        let mut e = entities();
        s.move_occupant(&mut e, A, c(0, 0)).unwrap();
        s.traverse(&mut e, A, Direction::East).unwrap();

        let texts: Vec<&str> = e.messages().iter().map(|(_, _, m)| m.as_str()).collect();
        assert_eq!(texts, vec!["#1 leaves to (1, 0)", "#1 arrives from (0, 0)"]);
        // The mover never hears its own announcements.
        assert!(e.messages().iter().all(|&(_, excluded, _)| excluded == Some(A)));
    }

    // ── Provider hook ───────────────────────────────────────────

    #[test]
    fn provider_hook_runs_on_every_rebind() {
        struct Painter;
        impl MapProvider for Painter {
            fn is_valid(&self, _space: &SpaceView<'_>, _coord: Coord) -> bool {
                true
            }
            fn location_name(&self, coord: Coord) -> String {
                format!("Sector {}-{}", coord.x, coord.y)
            }
            fn on_room_bound(&self, coord: Coord, _mover: OccupantId, room: &mut ProjectedRoom) {
                room.set_description(format!("You are standing at {coord}."));
            }
        }

        let mut s = Space::new("painted", Box::new(Painter));
        let mut e = entities();
        s.move_occupant(&mut e, A, c(-3, 8)).unwrap();
        let room = s.room_at(c(-3, 8)).unwrap();
        assert_eq!(room.name(), "Sector -3-8");
        assert_eq!(room.description(), "You are standing at (-3, 8).");
        assert_eq!(room.display_name(), "Sector -3-8 (-3, 8)");
    }
}
