//! Actions an actor can take on its turn.
//!
//! Controllers decide on a [`Command`] (an intent without an actor), bind it to
//! the acting entity with [`Command::into_action`] and [`perform`](Action::perform)
//! it. A failed action leaves the state untouched and surfaces an
//! [`ActionError`] whose message is fit to show the player.
mod cast;
mod combat;
mod movement;
mod transition;
mod wait;

pub use cast::CastAction;
pub use combat::{AttackAction, AttackError, AttackStyle, foes_in_reach};
pub use movement::{MoveAction, MoveError};
pub use transition::ActionTransition;
pub use wait::WaitAction;

use crate::ability::{AbilityError, AbilityTarget};
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Direction, EntityId, GameState};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Attack(#[from] AttackError),

    #[error(transparent)]
    Ability(#[from] AbilityError),
}

impl From<core::convert::Infallible> for ActionError {
    fn from(never: core::convert::Infallible) -> Self {
        match never {}
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::Move(error) => error.severity(),
            ActionError::Attack(error) => error.severity(),
            ActionError::Ability(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::Move(error) => error.error_code(),
            ActionError::Attack(error) => error.error_code(),
            ActionError::Ability(error) => error.error_code(),
        }
    }
}

/// A fully bound action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    Attack(AttackAction),
    Cast(CastAction),
    Wait(WaitAction),
}

impl Action {
    pub fn actor(&self) -> EntityId {
        match self {
            Action::Move(action) => action.actor(),
            Action::Attack(action) => action.actor(),
            Action::Cast(action) => action.actor(),
            Action::Wait(action) => action.actor(),
        }
    }

    /// Validates and applies the action.
    pub fn perform(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        tracing::trace!(actor = %self.actor(), action = ?self, "performing action");
        match self {
            Action::Move(action) => action.execute(state, env)?,
            Action::Attack(action) => action.execute(state, env)?,
            Action::Cast(action) => action.execute(state, env)?,
            Action::Wait(action) => action.execute(state, env)?,
        }
        Ok(())
    }
}

/// Actor-less intent produced by input handling or scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    Move(Direction),
    Attack(EntityId),
    Sweep,
    Cast { slot: usize, target: AbilityTarget },
    Wait,
}

impl Command {
    pub fn into_action(self, actor: EntityId) -> Action {
        match self {
            Command::Move(direction) => Action::Move(MoveAction::new(actor, direction)),
            Command::Attack(target) => {
                Action::Attack(AttackAction::new(actor, AttackStyle::Single(target)))
            }
            Command::Sweep => Action::Attack(AttackAction::new(actor, AttackStyle::Sweep)),
            Command::Cast { slot, target } => Action::Cast(CastAction::new(actor, slot, target)),
            Command::Wait => Action::Wait(WaitAction::new(actor)),
        }
    }
}
