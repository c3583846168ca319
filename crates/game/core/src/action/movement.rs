use crate::action::ActionTransition;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Direction, EntityId, GameState, Position, RegistryError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("you cannot leave the map")]
    OutOfBounds { destination: Position },

    #[error("there is a wall in the way")]
    Blocked { destination: Position },

    #[error("something is already standing there")]
    Occupied {
        destination: Position,
        occupant: EntityId,
    },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::ActorNotFound(_) => ErrorSeverity::Internal,
            MoveError::OutOfBounds { .. } | MoveError::Blocked { .. } => ErrorSeverity::Validation,
            MoveError::Occupied { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::ActorNotFound(_) => "MOVE_ACTOR_NOT_FOUND",
            MoveError::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            MoveError::Blocked { .. } => "MOVE_BLOCKED",
            MoveError::Occupied { .. } => "MOVE_OCCUPIED",
        }
    }
}

/// One step in any of the eight directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }

    fn destination(&self, state: &GameState) -> Result<Position, MoveError> {
        state
            .actor(self.actor)
            .map(|actor| actor.position.step(self.direction))
            .ok_or(MoveError::ActorNotFound(self.actor))
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let destination = self.destination(state)?;
        let map = env.map();
        if !map.contains(destination) {
            return Err(MoveError::OutOfBounds { destination });
        }
        if !map.is_passable(destination) {
            return Err(MoveError::Blocked { destination });
        }
        if let Some(occupant) = state.registry().actor_at(destination) {
            return Err(MoveError::Occupied {
                destination,
                occupant,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let destination = self.destination(state)?;
        state
            .relocate(self.actor, destination)
            .map_err(|error| match error {
                RegistryError::Occupied { occupant, .. } => MoveError::Occupied {
                    destination,
                    occupant,
                },
                RegistryError::NotFound(id) | RegistryError::DuplicateId(id) => {
                    MoveError::ActorNotFound(id)
                }
            })
    }
}
