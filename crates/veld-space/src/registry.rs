//! Named space registry: idempotent creation and the wilderness-level
//! entry point.

use crate::provider::MapProvider;
use crate::space::Space;
use indexmap::map::Entry;
use indexmap::IndexMap;
use veld_core::{Coord, EntityBackend, Location, OccupantId, WildError};

/// Name used when the embedder does not care about naming its map.
pub const DEFAULT_SPACE_NAME: &str = "default";

/// A collection of named [`Space`]s.
///
/// Creation is idempotent by name: asking twice for a space called
/// `"default"` yields one space. The registry also owns the
/// [`enter`](SpaceRegistry::enter) entry point, which routes occupants
/// into the right space and hands off occupants arriving from a
/// *different* registered space.
#[derive(Default)]
pub struct SpaceRegistry {
    spaces: IndexMap<String, Space>,
}

impl SpaceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a space under `name` with the given map policy.
    ///
    /// Does nothing if a space with that name already exists (the
    /// provider is dropped). Returns `true` if a space was created.
    pub fn create_space(&mut self, name: impl Into<String>, provider: Box<dyn MapProvider>) -> bool {
        match self.spaces.entry(name.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                let space = Space::new(entry.key().clone(), provider);
                entry.insert(space);
                true
            }
        }
    }

    /// Look up a space by name.
    pub fn space(&self, name: &str) -> Option<&Space> {
        self.spaces.get(name)
    }

    /// Look up a space by name, mutably.
    pub fn space_mut(&mut self, name: &str) -> Option<&mut Space> {
        self.spaces.get_mut(name)
    }

    /// Number of registered spaces.
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    /// Whether no spaces have been created yet.
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Move `occupant` into the space called `name` at `coord`.
    ///
    /// Fails with [`WildError::UnknownSpace`] if the space was never
    /// created and with [`WildError::InvalidCoordinate`] if its provider
    /// rejects `coord`; neither failure mutates anything. If the
    /// occupant currently stands in a room of a *different* registered
    /// space, that space is notified of the departure first.
    pub fn enter(
        &mut self,
        entities: &mut dyn EntityBackend,
        occupant: OccupantId,
        coord: Coord,
        name: &str,
    ) -> Result<(), WildError> {
        let target_id = match self.spaces.get(name) {
            Some(space) => {
                if !space.is_valid_coordinate(coord) {
                    return Err(WildError::InvalidCoordinate { coord });
                }
                space.id()
            }
            None => {
                return Err(WildError::UnknownSpace {
                    name: name.to_string(),
                })
            }
        };

        if let Some(Location::Wilderness { space: from, .. }) = entities.location(occupant) {
            if from != target_id {
                if let Some(origin) = self.spaces.values_mut().find(|s| s.id() == from) {
                    entities.set_location(occupant, None);
                    origin.leave(entities, occupant);
                }
            }
        }

        match self.spaces.get_mut(name) {
            Some(space) => space.move_occupant(entities, occupant, coord),
            None => Err(WildError::UnknownSpace {
                name: name.to_string(),
            }),
        }
    }
}
