//! Turn controllers.
//!
//! A controller decides and performs exactly one action for the actor whose
//! turn it is. The player is driven by an injected controller (terminal input,
//! a script, a test double); every other actor uses the built-in
//! [`AiController`] unless an override is registered for its id.
mod ai;
mod scripted;

pub use ai::AiController;
pub use scripted::{ScriptStep, ScriptedController};

use std::collections::BTreeMap;
use std::fmt;

use crate::env::GameEnv;
use crate::state::{AiKind, EntityId, GameState};

/// Result of one controller dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// An action was performed; the turn is over.
    Completed,
    /// Nothing changed; report the message and ask again.
    Retry(String),
    /// End the session.
    Quit,
}

impl TurnOutcome {
    /// Maps an action result: success completes the turn, failure asks for a retry.
    pub fn from_result<E: fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => TurnOutcome::Completed,
            Err(error) => TurnOutcome::Retry(capitalize(&error.to_string())),
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>() + ".",
        None => String::new(),
    }
}

pub trait Controller {
    fn choose_and_perform(
        &mut self,
        actor: EntityId,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> TurnOutcome;
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn choose_and_perform(
        &mut self,
        actor: EntityId,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> TurnOutcome {
        (**self).choose_and_perform(actor, state, env)
    }
}

/// Routes each actor to its controller.
pub struct Controllers {
    player: Box<dyn Controller>,
    ai: AiController,
    overrides: BTreeMap<EntityId, Box<dyn Controller>>,
}

impl Controllers {
    pub fn new(player: impl Controller + 'static) -> Self {
        Self {
            player: Box::new(player),
            ai: AiController::new(),
            overrides: BTreeMap::new(),
        }
    }

    /// Drives `actor` with `controller` instead of its AI kind.
    pub fn with_override(mut self, actor: EntityId, controller: impl Controller + 'static) -> Self {
        self.overrides.insert(actor, Box::new(controller));
        self
    }

    pub fn clear_override(&mut self, actor: EntityId) -> bool {
        self.overrides.remove(&actor).is_some()
    }

    pub fn controller_for(&mut self, actor: EntityId, ai: AiKind) -> &mut dyn Controller {
        match self.overrides.get_mut(&actor) {
            Some(controller) => controller.as_mut(),
            None if ai == AiKind::Player => self.player.as_mut(),
            None => &mut self.ai as &mut dyn Controller,
        }
    }
}

impl fmt::Debug for Controllers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controllers")
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_actions_become_retries() {
        let outcome = TurnOutcome::from_result::<String>(Err("there is a wall in the way".into()));
        assert_eq!(outcome, TurnOutcome::Retry("There is a wall in the way.".into()));
        assert_eq!(TurnOutcome::from_result::<String>(Ok(())), TurnOutcome::Completed);
    }
}
