use std::collections::VecDeque;

use crate::action::Command;
use crate::env::GameEnv;
use crate::state::{EntityId, GameState};

use super::{Controller, TurnOutcome};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptStep {
    Do(Command),
    /// Abandon the attempt with a message, leaving the state untouched.
    Abort(String),
    Quit,
}

impl From<Command> for ScriptStep {
    fn from(command: Command) -> Self {
        ScriptStep::Do(command)
    }
}

/// Replays a fixed list of steps, one per dispatch.
///
/// Once the list is exhausted the controller performs its fallback command,
/// or quits the session when it has none.
#[derive(Clone, Debug, Default)]
pub struct ScriptedController {
    steps: VecDeque<ScriptStep>,
    fallback: Option<Command>,
}

impl ScriptedController {
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            fallback: None,
        }
    }

    /// A controller that performs `command` on every turn.
    pub fn repeating(command: Command) -> Self {
        Self::default().with_fallback(command)
    }

    pub fn with_fallback(mut self, command: Command) -> Self {
        self.fallback = Some(command);
        self
    }

    pub fn push(&mut self, step: impl Into<ScriptStep>) {
        self.steps.push_back(step.into());
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl Controller for ScriptedController {
    fn choose_and_perform(
        &mut self,
        actor: EntityId,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> TurnOutcome {
        let step = match (self.steps.pop_front(), self.fallback) {
            (Some(step), _) => step,
            (None, Some(command)) => ScriptStep::Do(command),
            (None, None) => ScriptStep::Quit,
        };

        match step {
            ScriptStep::Do(command) => {
                TurnOutcome::from_result(command.into_action(actor).perform(state, env))
            }
            ScriptStep::Abort(message) => TurnOutcome::Retry(message),
            ScriptStep::Quit => TurnOutcome::Quit,
        }
    }
}
