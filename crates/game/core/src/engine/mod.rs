//! The turn driver.
//!
//! [`TurnDriver`] owns the loop: look at the schedule head, let it act (or sit
//! out a skipped cycle), then rotate it to the back if it is still at the
//! front. End-of-turn hooks run at rotation after a completed action, so they
//! fire exactly once per turn the actor actually takes. A player turn that asks for a retry
//! reports its message and is re-dispatched without touching the schedule.
mod errors;
mod turns;

pub use errors::DriverError;

use crate::controller::{Controllers, TurnOutcome};
use crate::env::{GameEnv, VisibilityProvider};
use crate::state::{EntityId, GameState};

/// Why a session stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    PlayerLost,
    Quit,
}

/// Result of a single [`TurnDriver::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The head performed an action. `rotated` is false when it left the
    /// front during its own turn (it died or removed itself).
    Acted { entity: EntityId, rotated: bool },
    /// The head spent one of its `skip_turns`.
    Skipped { entity: EntityId },
    Ended(SessionEnd),
}

pub struct TurnDriver<'a> {
    state: &'a mut GameState,
    env: GameEnv<'a>,
    controllers: &'a mut Controllers,
    visibility: &'a mut dyn VisibilityProvider,
}

impl<'a> TurnDriver<'a> {
    pub fn new(
        state: &'a mut GameState,
        env: GameEnv<'a>,
        controllers: &'a mut Controllers,
        visibility: &'a mut dyn VisibilityProvider,
    ) -> Self {
        Self {
            state,
            env,
            controllers,
            visibility,
        }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Runs until the player is gone or a controller quits.
    pub fn run(&mut self) -> Result<SessionEnd, DriverError> {
        loop {
            if let StepOutcome::Ended(end) = self.step()? {
                return Ok(end);
            }
        }
    }

    /// Runs at most `limit` steps; `None` if the session is still going.
    pub fn run_steps(&mut self, limit: usize) -> Result<Option<SessionEnd>, DriverError> {
        for _ in 0..limit {
            if let StepOutcome::Ended(end) = self.step()? {
                return Ok(Some(end));
            }
        }
        Ok(None)
    }

    /// Resolves one pass of the schedule head.
    pub fn step(&mut self) -> Result<StepOutcome, DriverError> {
        let mut npc_attempts = 0u32;

        loop {
            let player = self.state.player;
            if !self.state.is_player_alive() {
                tracing::info!(player = %player, passes = self.state.turn.passes, "player is gone, session over");
                return Ok(StepOutcome::Ended(SessionEnd::PlayerLost));
            }

            let head = self.state.schedule().peek().ok_or(DriverError::EmptySchedule)?;
            let skip_turns = self
                .state
                .actor(head)
                .map(|actor| actor.skip_turns)
                .ok_or(DriverError::StaleScheduleEntry(head))?;

            if head == player {
                self.visibility.observe(self.state, &self.env, head);
            }

            if skip_turns > 0 {
                if let Some(actor) = self.state.actor_mut(head) {
                    actor.skip_turns -= 1;
                }
                tracing::trace!(entity = %head, left = skip_turns - 1, "turn skipped");
                self.finish_pass(head, false);
                return Ok(StepOutcome::Skipped { entity: head });
            }

            match turns::take_turn(self.state, &self.env, self.controllers, head) {
                TurnOutcome::Completed => {}
                TurnOutcome::Retry(message) if head == player => {
                    self.state.report(message);
                    continue;
                }
                TurnOutcome::Retry(message) => {
                    npc_attempts += 1;
                    tracing::warn!(entity = %head, attempt = npc_attempts, %message, "npc turn retry");
                    if npc_attempts > self.env.config().max_npc_retries {
                        return Err(DriverError::RetryLimitExceeded {
                            entity: head,
                            attempts: npc_attempts,
                            message,
                        });
                    }
                    continue;
                }
                TurnOutcome::Quit => {
                    tracing::info!(entity = %head, "controller quit the session");
                    return Ok(StepOutcome::Ended(SessionEnd::Quit));
                }
            }

            let rotated = self.finish_pass(head, true);
            return Ok(StepOutcome::Acted {
                entity: head,
                rotated,
            });
        }
    }

    /// Rotates `head` to the back if it is still at the front. The tile effect
    /// and status tick run only when `head` actually acted; a skipped pass
    /// just rotates. Returns whether the rotation happened.
    fn finish_pass(&mut self, head: EntityId, acted: bool) -> bool {
        self.state.turn.passes += 1;
        if self.state.schedule().peek() != Some(head) {
            tracing::debug!(entity = %head, "head left the front during its turn");
            return false;
        }

        self.state.schedule_mut().rotate_front_to_back();
        if acted {
            turns::end_of_turn(self.state, &self.env, head);
        }

        if head == self.state.player {
            self.state.abilities.tick();
            self.state.turn.player_turns += 1;
        }
        true
    }
}
