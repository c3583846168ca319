use crate::action::{Action, AttackAction, AttackStyle, MoveAction, WaitAction, foes_in_reach};
use crate::env::{GameEnv, compute_seed};
use crate::state::{ActorState, AiKind, Direction, EntityId, GameState, Position};

use super::{Controller, TurnOutcome};

/// Built-in behaviour for every non-player [`AiKind`].
///
/// Decisions are pure functions of the state plus a seed derived from the
/// dispatch nonce, so a session replays identically for the same seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct AiController;

impl AiController {
    pub fn new() -> Self {
        Self
    }

    pub fn decide(&self, actor: &ActorState, state: &GameState, env: &GameEnv<'_>) -> Action {
        let wait = Action::Wait(WaitAction::new(actor.id));
        match actor.ai {
            AiKind::Player | AiKind::Idle => wait,
            AiKind::Roam => self
                .strike(actor, state)
                .or_else(|| self.wander(actor, state, env))
                .unwrap_or(wait),
            AiKind::SeekEnemy => self
                .strike(actor, state)
                .or_else(|| self.approach(actor, state, env))
                .unwrap_or(wait),
        }
    }

    fn strike(&self, actor: &ActorState, state: &GameState) -> Option<Action> {
        (actor.attack > 0 && !foes_in_reach(state, actor).is_empty())
            .then(|| Action::Attack(AttackAction::new(actor.id, AttackStyle::Sweep)))
    }

    fn wander(&self, actor: &ActorState, state: &GameState, env: &GameEnv<'_>) -> Option<Action> {
        let seed = compute_seed(state.game_seed, state.turn.nonce, actor.id.0, 0);
        let index = env.rng().range(seed, 0, Direction::ALL.len() as u32 - 1) as usize;
        let direction = Direction::ALL[index];
        can_enter(state, env, actor.position.step(direction))
            .then(|| Action::Move(MoveAction::new(actor.id, direction)))
    }

    fn approach(&self, actor: &ActorState, state: &GameState, env: &GameEnv<'_>) -> Option<Action> {
        let goal = nearest_foe(actor, state)?;
        let current = actor.position.manhattan_distance(goal);

        Direction::ALL
            .into_iter()
            .map(|direction| (direction, actor.position.step(direction)))
            .filter(|&(_, cell)| cell.manhattan_distance(goal) < current)
            .filter(|&(_, cell)| can_enter(state, env, cell))
            .min_by_key(|&(_, cell)| cell.manhattan_distance(goal))
            .map(|(direction, _)| Action::Move(MoveAction::new(actor.id, direction)))
    }
}

fn can_enter(state: &GameState, env: &GameEnv<'_>, cell: Position) -> bool {
    env.map().is_passable(cell) && state.registry().actor_at(cell).is_none()
}

/// Closest foe by Manhattan distance, ties broken by id.
fn nearest_foe(actor: &ActorState, state: &GameState) -> Option<Position> {
    state
        .registry()
        .iter()
        .filter(|other| other.id != actor.id && actor.is_foe_of(other))
        .min_by_key(|other| (other.position.manhattan_distance(actor.position), other.id))
        .map(|other| other.position)
}

impl Controller for AiController {
    fn choose_and_perform(
        &mut self,
        actor: EntityId,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> TurnOutcome {
        let Some(current) = state.actor(actor) else {
            return TurnOutcome::Retry(format!("{actor} is not registered"));
        };
        let action = self.decide(current, state, env);
        tracing::trace!(actor = %actor, ai = %current.ai, ?action, "ai decision");
        TurnOutcome::from_result(action.perform(state, env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{GridMap, PcgRng};
    use crate::state::ActorKind;

    #[test]
    fn seeker_attacks_when_adjacent_and_approaches_otherwise() {
        let map = GridMap::new(8, 8);
        let config = GameConfig::default();
        let env = GameEnv::new(&map, &PcgRng, &config);
        let mut state = GameState::new(0);
        state.add_player(&env, Position::new(1, 1)).unwrap();
        let hunter = state.spawn(&env, ActorKind::Hunter, Position::new(5, 1)).unwrap();

        let action = AiController.decide(state.actor(hunter).unwrap(), &state, &env);
        assert_eq!(action, Action::Move(MoveAction::new(hunter, Direction::West)));

        state.relocate(hunter, Position::new(2, 1)).unwrap();
        let action = AiController.decide(state.actor(hunter).unwrap(), &state, &env);
        assert_eq!(action, Action::Attack(AttackAction::new(hunter, AttackStyle::Sweep)));
    }

    #[test]
    fn idle_actors_wait() {
        let map = GridMap::new(4, 4);
        let config = GameConfig::default();
        let env = GameEnv::new(&map, &PcgRng, &config);
        let mut state = GameState::new(0);
        let totem = state.spawn(&env, ActorKind::Totem, Position::new(1, 1)).unwrap();

        let action = AiController.decide(state.actor(totem).unwrap(), &state, &env);
        assert_eq!(action, Action::Wait(WaitAction::new(totem)));
    }

    #[test]
    fn roaming_is_deterministic_and_legal() {
        let map = GridMap::new(6, 6);
        let config = GameConfig::default();
        let env = GameEnv::new(&map, &PcgRng, &config);
        let mut state = GameState::new(99);
        let grunt = state.spawn(&env, ActorKind::Grunt, Position::new(3, 3)).unwrap();

        for nonce in 0..20 {
            state.turn.nonce = nonce;
            let first = AiController.decide(state.actor(grunt).unwrap(), &state, &env);
            let second = AiController.decide(state.actor(grunt).unwrap(), &state, &env);
            assert_eq!(first, second);
            assert!(matches!(first, Action::Move(_)));
        }
    }
}
