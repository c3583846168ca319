//! Per-actor turn hooks.
//!
//! `take_turn` dispatches the controller and, when the action completed,
//! runs the post-action hook. `end_of_turn` runs after the schedule rotated
//! past an actor that acted this pass: the cell's lingering effect first,
//! then status ticks.

use crate::controller::{Controllers, TurnOutcome};
use crate::effect::{self, Effect};
use crate::env::GameEnv;
use crate::state::{EntityId, GameState, StatusEffectKind};

pub(crate) fn take_turn(
    state: &mut GameState,
    env: &GameEnv<'_>,
    controllers: &mut Controllers,
    actor: EntityId,
) -> TurnOutcome {
    let Some(ai) = state.actor(actor).map(|current| current.ai) else {
        return TurnOutcome::Retry(format!("{actor} is not registered"));
    };

    state.turn.nonce += 1;
    tracing::debug!(actor = %actor, nonce = state.turn.nonce, "dispatching turn");

    let outcome = controllers
        .controller_for(actor, ai)
        .choose_and_perform(actor, state, env);

    if outcome == TurnOutcome::Completed {
        after_action(state, env, actor);
    }
    outcome
}

/// Detonators count down and blow up once the countdown goes negative;
/// every actor re-arms its recovery delay.
fn after_action(state: &mut GameState, env: &GameEnv<'_>, actor: EntityId) {
    let Some(current) = state.actor_mut(actor) else {
        return;
    };
    current.skip_turns = current.recovery;

    let Some(countdown) = current.countdown.as_mut() else {
        return;
    };
    *countdown -= 1;
    if *countdown < 0 {
        effect::detonate(state, env, actor);
    }
}

pub(crate) fn end_of_turn(state: &mut GameState, env: &GameEnv<'_>, actor: EntityId) {
    let Some(position) = state.actor(actor).map(|current| current.position) else {
        return;
    };

    if let Some(effect) = env.map().effect_at(position) {
        tracing::trace!(actor = %actor, %position, kind = %effect.kind, "tile effect");
        effect::apply_to_actor(state, env, actor, effect);
    }

    let Some(current) = state.actor_mut(actor) else {
        return;
    };
    for kind in current.status.tick() {
        if state.actor(actor).is_none() {
            break;
        }
        match kind {
            StatusEffectKind::Burning => {
                effect::apply_to_actor(state, env, actor, Effect::heat(1));
            }
            StatusEffectKind::Regenerating => {
                effect::restore_hp(state, actor, 1);
            }
            StatusEffectKind::EarthVision => {}
        }
    }
}
