pub mod actor;
pub mod common;
pub mod status;
pub mod turn;

// Re-export actor types
pub use actor::{ActorKind, ActorState, AiKind};

// Re-export common types
pub use common::{Direction, EntityId, Faction, Position};

// Re-export status effects
pub use status::{StatusEffect, StatusEffectKind, StatusEffects};

// Re-export turn counters
pub use turn::TurnState;
