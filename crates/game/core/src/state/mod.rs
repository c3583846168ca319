//! Authoritative game state.
//!
//! [`GameState`] owns the actor registry, the turn schedule, the player's
//! ability bank and the message log. Actors enter through [`GameState::spawn`]
//! or [`GameState::insert_actor`] and leave through
//! [`GameState::remove_actor`]; both paths update the registry and the
//! schedule together so the two never disagree about who exists.
pub mod log;
pub mod registry;
pub mod schedule;
pub mod types;

pub use log::MessageLog;
pub use registry::{ActorRegistry, RegistryError};
pub use schedule::{Schedule, ScheduleError};
pub use types::{
    ActorKind, ActorState, AiKind, Direction, EntityId, Faction, Position, StatusEffect,
    StatusEffectKind, StatusEffects, TurnState,
};

use crate::ability::AbilityBank;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error("cell {0} is outside the map")]
    OutOfBounds(Position),

    #[error("cell {0} is not passable")]
    Blocked(Position),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("entity id space exhausted")]
    IdsExhausted,
}

impl GameError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SpawnError::OutOfBounds(_) | SpawnError::Blocked(_) => ErrorSeverity::Validation,
            SpawnError::Registry(error) => error.severity(),
            SpawnError::Schedule(error) => error.severity(),
            SpawnError::IdsExhausted => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SpawnError::OutOfBounds(_) => "SPAWN_OUT_OF_BOUNDS",
            SpawnError::Blocked(_) => "SPAWN_BLOCKED",
            SpawnError::Registry(error) => error.error_code(),
            SpawnError::Schedule(error) => error.error_code(),
            SpawnError::IdsExhausted => "SPAWN_IDS_EXHAUSTED",
        }
    }
}

/// Everything that changes while a session runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Session seed mixed into every random roll.
    pub game_seed: u64,

    /// Monotonic id allocator. Ids are never reused; 0 is the player's.
    next_entity_id: u32,

    /// Entity whose death ends the session.
    pub player: EntityId,

    pub turn: TurnState,
    pub abilities: AbilityBank,
    pub log: MessageLog,

    registry: ActorRegistry,
    schedule: Schedule,
}

impl GameState {
    /// Empty state carrying the reference ability loadout.
    pub fn new(game_seed: u64) -> Self {
        Self::with_abilities(game_seed, AbilityBank::reference_loadout())
    }

    pub fn with_abilities(game_seed: u64, abilities: AbilityBank) -> Self {
        Self {
            game_seed,
            next_entity_id: EntityId::PLAYER.0 + 1,
            player: EntityId::PLAYER,
            turn: TurnState::new(),
            abilities,
            log: MessageLog::new(),
            registry: ActorRegistry::new(),
            schedule: Schedule::new(),
        }
    }

    pub fn registry(&self) -> &ActorRegistry {
        &self.registry
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub(crate) fn schedule_mut(&mut self) -> &mut Schedule {
        &mut self.schedule
    }

    /// Allocates a fresh id. The player's id is never handed out here.
    pub fn allocate_entity_id(&mut self) -> Result<EntityId, SpawnError> {
        if self.next_entity_id == EntityId::PLAYER.0 {
            self.next_entity_id += 1;
        }
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self
            .next_entity_id
            .checked_add(1)
            .ok_or(SpawnError::IdsExhausted)?;
        Ok(id)
    }

    /// Checks that `position` can receive a new actor.
    pub fn check_placement(&self, env: &GameEnv<'_>, position: Position) -> Result<(), SpawnError> {
        let map = env.map();
        if !map.contains(position) {
            return Err(SpawnError::OutOfBounds(position));
        }
        if !map.is_passable(position) {
            return Err(SpawnError::Blocked(position));
        }
        if let Some(occupant) = self.registry.actor_at(position) {
            return Err(RegistryError::Occupied { position, occupant }.into());
        }
        Ok(())
    }

    /// Places the player at `position` with the reserved player id.
    pub fn add_player(&mut self, env: &GameEnv<'_>, position: Position) -> Result<EntityId, SpawnError> {
        self.check_placement(env, position)?;
        let actor = ActorState::from_kind(EntityId::PLAYER, ActorKind::Player, position, env.config());
        self.player = EntityId::PLAYER;
        self.insert_actor(actor)
    }

    /// Creates an actor of `kind` from its template and schedules it last.
    pub fn spawn(
        &mut self,
        env: &GameEnv<'_>,
        kind: ActorKind,
        position: Position,
    ) -> Result<EntityId, SpawnError> {
        self.check_placement(env, position)?;
        let id = self.allocate_entity_id()?;
        self.insert_actor(ActorState::from_kind(id, kind, position, env.config()))
    }

    /// Registers a fully built actor and appends it to the schedule.
    ///
    /// Map bounds are not checked; use [`spawn`](Self::spawn) for that.
    pub fn insert_actor(&mut self, actor: ActorState) -> Result<EntityId, SpawnError> {
        let id = actor.id;
        if self.schedule.contains(id) {
            return Err(ScheduleError::AlreadyScheduled(id).into());
        }
        self.registry.insert(actor)?;
        self.schedule.push_back(id)?;
        if id.0 >= self.next_entity_id {
            self.next_entity_id = id.0.saturating_add(1);
        }
        tracing::debug!(entity = %id, "actor added");
        Ok(id)
    }

    /// Removes an actor from the registry and unlinks it from the schedule.
    pub fn remove_actor(&mut self, id: EntityId) -> Option<ActorState> {
        let actor = self.registry.remove(id)?;
        self.schedule.unlink(id);
        tracing::debug!(entity = %id, kind = %actor.kind, "actor removed");
        Some(actor)
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.registry.get(id)
    }

    /// Mutable access to an actor. Move actors with [`relocate`](Self::relocate).
    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.registry.get_mut(id)
    }

    pub fn relocate(&mut self, id: EntityId, destination: Position) -> Result<(), RegistryError> {
        self.registry.relocate(id, destination)
    }

    pub fn is_player_alive(&self) -> bool {
        self.registry.contains(self.player)
    }

    /// Report name of an actor, falling back to its id once it is gone.
    pub fn actor_name(&self, id: EntityId) -> String {
        self.registry
            .get(id)
            .map(ActorState::name)
            .unwrap_or_else(|| format!("Actor {id}"))
    }

    pub fn report(&mut self, message: impl Into<String>) {
        self.log.report(message);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}
