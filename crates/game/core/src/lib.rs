//! Turn-resolution core of a tile-based roguelike.
//!
//! `rogue-core` owns the rules: who acts next ([`state::Schedule`]), what an
//! action does ([`action`]), how effects land on different kinds of actors
//! ([`effect`]), the player's ability bank ([`ability`]) and the loop tying
//! them together ([`engine::TurnDriver`]). Frontends plug in through the
//! [`controller::Controller`] and [`env::VisibilityProvider`] traits and read
//! the [`state::MessageLog`].
pub mod ability;
pub mod action;
pub mod config;
pub mod controller;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use ability::{Ability, AbilityBank, AbilityError, AbilityKind, AbilityTarget, TargetShape};
pub use action::{
    Action, ActionError, ActionTransition, AttackAction, AttackError, AttackStyle, CastAction,
    Command, MoveAction, MoveError, WaitAction,
};
pub use config::GameConfig;
pub use controller::{AiController, Controller, Controllers, ScriptStep, ScriptedController, TurnOutcome};
pub use effect::{Effect, EffectKind, EffectOutcome};
pub use engine::{DriverError, SessionEnd, StepOutcome, TurnDriver};
pub use env::{
    GameEnv, GridMap, MapDimensions, MapError, MapOracle, PcgRng, RadiusVisibility, RngOracle,
    StaticTile, TerrainKind, VisibilityProvider,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    ActorKind, ActorRegistry, ActorState, AiKind, Direction, EntityId, Faction, GameState,
    MessageLog, Position, RegistryError, Schedule, ScheduleError, SpawnError, StatusEffect,
    StatusEffectKind, StatusEffects, TurnState,
};
