use crate::action::ActionTransition;
use crate::effect::{self, Effect};
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActorState, EntityId, GameState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("there is nothing there to attack")]
    TargetNotFound(EntityId),

    #[error("that is out of reach")]
    OutOfReach { target: EntityId },

    #[error("there are no enemies within reach")]
    NoTargets,

    #[error("you have no way to attack")]
    Unarmed,
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AttackError::ActorNotFound(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AttackError::ActorNotFound(_) => "ATTACK_ACTOR_NOT_FOUND",
            AttackError::TargetNotFound(_) => "ATTACK_TARGET_NOT_FOUND",
            AttackError::OutOfReach { .. } => "ATTACK_OUT_OF_REACH",
            AttackError::NoTargets => "ATTACK_NO_TARGETS",
            AttackError::Unarmed => "ATTACK_UNARMED",
        }
    }
}

/// How an attacker picks who to hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackStyle {
    /// One actor in any of the eight neighbouring cells.
    Single(EntityId),
    /// Every foe at Manhattan distance 1. Allies are never hit.
    Sweep,
}

/// Melee attack dealing `Damage` equal to the attacker's `attack`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub actor: EntityId,
    pub style: AttackStyle,
}

impl AttackAction {
    pub fn new(actor: EntityId, style: AttackStyle) -> Self {
        Self { actor, style }
    }

    fn attacker<'s>(&self, state: &'s GameState) -> Result<&'s ActorState, AttackError> {
        state
            .actor(self.actor)
            .ok_or(AttackError::ActorNotFound(self.actor))
    }

    fn targets(&self, state: &GameState) -> Result<Vec<EntityId>, AttackError> {
        let attacker = self.attacker(state)?;
        match self.style {
            AttackStyle::Single(target) => {
                let victim = state
                    .actor(target)
                    .ok_or(AttackError::TargetNotFound(target))?;
                if target == self.actor || victim.position.chebyshev_distance(attacker.position) != 1 {
                    return Err(AttackError::OutOfReach { target });
                }
                Ok(vec![target])
            }
            AttackStyle::Sweep => Ok(foes_in_reach(state, attacker)),
        }
    }
}

/// Foes of `attacker` at Manhattan distance 1, in ascending id order.
pub fn foes_in_reach(state: &GameState, attacker: &ActorState) -> Vec<EntityId> {
    state
        .registry()
        .actors_near(attacker.position, 1)
        .into_iter()
        .filter(|&id| {
            state
                .actor(id)
                .is_some_and(|other| other.id != attacker.id && attacker.is_foe_of(other))
        })
        .collect()
}

impl ActionTransition for AttackAction {
    type Error = AttackError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if self.attacker(state)?.attack <= 0 {
            return Err(AttackError::Unarmed);
        }
        if self.targets(state)?.is_empty() {
            return Err(AttackError::NoTargets);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let blow = Effect::damage(self.attacker(state)?.attack);
        for target in self.targets(state)? {
            effect::apply_to_actor(state, env, target, blow);
        }
        Ok(())
    }
}
