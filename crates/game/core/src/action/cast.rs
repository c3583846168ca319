use crate::ability::{self, AbilityError, AbilityTarget};
use crate::action::ActionTransition;
use crate::env::GameEnv;
use crate::state::{EntityId, GameState};

/// Uses an ability from the bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastAction {
    pub actor: EntityId,
    pub slot: usize,
    pub target: AbilityTarget,
}

impl CastAction {
    pub fn new(actor: EntityId, slot: usize, target: AbilityTarget) -> Self {
        Self {
            actor,
            slot,
            target,
        }
    }
}

impl ActionTransition for CastAction {
    type Error = AbilityError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        state.abilities.check_ready(self.slot).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ability::invoke(state, env, self.actor, self.slot, self.target)
    }
}
