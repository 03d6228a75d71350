//! Serializable snapshots of a space's durable state.
//!
//! Room identities are not persisted: only the coordinate keys of the
//! active table and the pool size survive, because rooms are
//! reconstructible. On restore, every occupant's location pointer is
//! re-derived from its tracked coordinate; a reloaded pointer is never
//! trusted as-is, which is the same rule that makes dropped-and-resumed
//! sessions land in the right room.

use crate::provider::MapProvider;
use crate::space::Space;
use serde::{Deserialize, Serialize};
use veld_core::{Coord, EntityBackend, OccupantId};

/// The durable state of a [`Space`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceSnapshot {
    /// The space's name.
    pub name: String,
    /// Tracked coordinate of every occupant, in entry order.
    pub occupants: Vec<(OccupantId, Coord)>,
    /// Coordinates that had a room bound when the snapshot was taken.
    pub active_coordinates: Vec<Coord>,
    /// Number of rooms that were waiting in the free pool.
    pub free_rooms: usize,
}

impl Space {
    /// Capture the durable state of this space.
    pub fn snapshot(&self) -> SpaceSnapshot {
        SpaceSnapshot {
            name: self.name().to_string(),
            occupants: self
                .occupant_coordinates
                .iter()
                .map(|(&o, &c)| (o, c))
                .collect(),
            active_coordinates: self.active_rooms.keys().copied().collect(),
            free_rooms: self.free_pool.len(),
        }
    }

    /// Rebuild a space from a snapshot.
    ///
    /// Allocates one room per recorded active coordinate, rebinds it
    /// (attaching every occupant tracked there), and refills the free
    /// pool to its recorded size. The provider is supplied by the
    /// caller; it is configuration, not state.
    pub fn restore(
        snapshot: &SpaceSnapshot,
        provider: Box<dyn MapProvider>,
        entities: &mut dyn EntityBackend,
    ) -> Space {
        let mut space = Space::new(snapshot.name.clone(), provider);
        space.occupant_coordinates = snapshot.occupants.iter().copied().collect();

        for &coord in &snapshot.active_coordinates {
            // Active coordinates always had at least one occupant; a
            // coordinate without one is stale and gets no room.
            let Some(&(mover, _)) = snapshot.occupants.iter().find(|&&(_, c)| c == coord) else {
                continue;
            };
            let room = space.allocate(coord);
            space.bind(entities, room, coord, mover);
        }
        for _ in 0..snapshot.free_rooms {
            let id = veld_core::RoomId(space.rooms.len() as u32);
            space.rooms.push(crate::room::ProjectedRoom::new(id));
            space.free_pool.push(id);
        }
        space
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::GridMapProvider;
    use veld_core::{Location, MemoryEntities};

    const A: OccupantId = OccupantId(1);
    const B: OccupantId = OccupantId(2);

    fn populated() -> (Space, MemoryEntities) {
        let mut e = MemoryEntities::new();
        e.add_connected(A);
        e.add_connected(B);
        let mut s = Space::new("default", Box::new(GridMapProvider));
        s.move_occupant(&mut e, A, Coord::new(0, 0)).unwrap();
        s.move_occupant(&mut e, B, Coord::new(2, 2)).unwrap();
        // Merge then split once so the pool has seen churn.
        s.move_occupant(&mut e, B, Coord::new(0, 0)).unwrap();
        s.move_occupant(&mut e, B, Coord::new(2, 2)).unwrap();
        (s, e)
    }

    #[test]
    fn snapshot_captures_tables_and_pool() {
        let (s, _) = populated();
        let snap = s.snapshot();
        assert_eq!(snap.name, "default");
        assert_eq!(
            snap.occupants,
            vec![(A, Coord::new(0, 0)), (B, Coord::new(2, 2))]
        );
        assert_eq!(snap.active_coordinates.len(), 2);
        assert_eq!(snap.free_rooms, s.free_room_count());
    }

    #[test]
    fn restore_re_derives_locations_from_coordinates() {
        let (s, mut e) = populated();
        let snap = s.snapshot();
        drop(s);

        // Stale pointers from the previous process must not be trusted.
        e.set_location(A, None);
        e.set_location(B, Some(Location::Outside(7)));

        let restored = Space::restore(&snap, Box::new(GridMapProvider), &mut e);

        assert_eq!(restored.coordinates_of(A), Some(Coord::new(0, 0)));
        assert_eq!(restored.coordinates_of(B), Some(Coord::new(2, 2)));
        for (o, coord) in [(A, Coord::new(0, 0)), (B, Coord::new(2, 2))] {
            match e.location(o) {
                Some(Location::Wilderness { space, room }) => {
                    assert_eq!(space, restored.id());
                    assert_eq!(
                        restored.room(room).unwrap().bound_coordinate(),
                        Some(coord)
                    );
                }
                other => panic!("{o} not restored into a room: {other:?}"),
            }
        }
        assert_eq!(restored.active_room_count(), 2);
        assert_eq!(restored.free_room_count(), snap.free_rooms);
    }

    #[test]
    fn snapshot_round_trips_through_serde() {
        let (s, _) = populated();
        let snap = s.snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let back: SpaceSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
