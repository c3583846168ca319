//! Spatial container of every live actor.
//!
//! The registry owns no scheduling logic. It answers "who is where" and keeps
//! an occupancy index in lockstep with actor positions; membership in the
//! [`Schedule`](super::Schedule) is maintained by [`GameState`](super::GameState).

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, GameError};

use super::{ActorState, EntityId, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegistryError {
    #[error("actor {0} is already registered")]
    DuplicateId(EntityId),

    #[error("cell {position} is already occupied by {occupant}")]
    Occupied {
        position: Position,
        occupant: EntityId,
    },

    #[error("actor {0} is not registered")]
    NotFound(EntityId),
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RegistryError::Occupied { .. } => ErrorSeverity::Recoverable,
            RegistryError::DuplicateId(_) | RegistryError::NotFound(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RegistryError::DuplicateId(_) => "REGISTRY_DUPLICATE_ID",
            RegistryError::Occupied { .. } => "REGISTRY_OCCUPIED",
            RegistryError::NotFound(_) => "REGISTRY_NOT_FOUND",
        }
    }
}

/// Live actors keyed by id, plus a one-actor-per-cell occupancy index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActorRegistry {
    actors: BTreeMap<EntityId, ActorState>,
    occupancy: BTreeMap<Position, EntityId>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an actor at its current position.
    pub fn insert(&mut self, actor: ActorState) -> Result<(), RegistryError> {
        if self.actors.contains_key(&actor.id) {
            return Err(RegistryError::DuplicateId(actor.id));
        }
        if let Some(&occupant) = self.occupancy.get(&actor.position) {
            return Err(RegistryError::Occupied {
                position: actor.position,
                occupant,
            });
        }

        self.occupancy.insert(actor.position, actor.id);
        self.actors.insert(actor.id, actor);
        Ok(())
    }

    /// Removes an actor and frees its cell. Returns the removed state.
    pub fn remove(&mut self, id: EntityId) -> Option<ActorState> {
        let actor = self.actors.remove(&id)?;
        if self.occupancy.get(&actor.position) == Some(&id) {
            self.occupancy.remove(&actor.position);
        }
        Some(actor)
    }

    /// Moves an actor to another cell, keeping the occupancy index in sync.
    pub fn relocate(&mut self, id: EntityId, destination: Position) -> Result<(), RegistryError> {
        if let Some(&occupant) = self.occupancy.get(&destination) {
            if occupant == id {
                return Ok(());
            }
            return Err(RegistryError::Occupied {
                position: destination,
                occupant,
            });
        }

        let actor = self.actors.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        self.occupancy.remove(&actor.position);
        actor.position = destination;
        self.occupancy.insert(destination, id);
        Ok(())
    }

    pub fn get(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    /// Mutable access to an actor.
    ///
    /// Positions must be changed through [`relocate`](Self::relocate) so the
    /// occupancy index stays consistent.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.actors.contains_key(&id)
    }

    /// The actor standing on `cell`, if any.
    pub fn actor_at(&self, cell: Position) -> Option<EntityId> {
        self.occupancy.get(&cell).copied()
    }

    /// Actors within `max_distance` (Manhattan) of `origin`, in ascending id order.
    pub fn actors_near(&self, origin: Position, max_distance: u32) -> Vec<EntityId> {
        self.actors
            .values()
            .filter(|actor| actor.position.manhattan_distance(origin) <= max_distance)
            .map(|actor| actor.id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.actors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}
