use crate::env::GameEnv;
use crate::state::{EntityId, GameState};

/// How a concrete action checks and mutates game state.
///
/// `pre_validate` sees the state before any mutation and must be side-effect
/// free; a failed validation leaves the state untouched so the controller can
/// retry the turn. `apply` may assume validation passed.
pub trait ActionTransition {
    type Error;

    fn actor(&self) -> EntityId;

    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error>;

    /// Validates then applies.
    fn execute(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        self.pre_validate(state, env)?;
        self.apply(state, env)
    }
}
