use crate::effect::{self, Effect};
use crate::env::GameEnv;
use crate::state::{ActorKind, Direction, EntityId, GameState, Position, StatusEffectKind};

use super::{AbilityError, AbilityKind, AbilityTarget, TargetShape};

/// Uses the ability in `slot` on behalf of `caster`.
///
/// Nothing changes unless every check passes: readiness, caster presence,
/// target shape and, for placements, the target cell. On success the slot's
/// cooldown is re-armed and the ability's effect is resolved.
pub fn invoke(
    state: &mut GameState,
    env: &GameEnv<'_>,
    caster: EntityId,
    slot: usize,
    target: AbilityTarget,
) -> Result<(), AbilityError> {
    let ability = state.abilities.check_ready(slot)?.clone();
    let origin = state
        .actor(caster)
        .map(|actor| actor.position)
        .ok_or(AbilityError::CasterNotFound(caster))?;

    let expected = ability.kind.target_shape();
    let shape_ok = expected == TargetShape::None || expected == target.shape();
    if !shape_ok {
        return Err(AbilityError::InvalidTarget {
            ability: ability.name,
            expected,
        });
    }
    if let (AbilityKind::PlaceActor { .. }, AbilityTarget::Cell(cell)) = (&ability.kind, target) {
        state.check_placement(env, cell)?;
    }

    tracing::debug!(caster = %caster, slot, ability = %ability.name, "invoking ability");
    let caster_name = state.actor_name(caster);
    state.report(format!("{caster_name} uses {}.", ability.name));
    state.abilities.mark_used(slot);

    match (ability.kind, target) {
        (AbilityKind::PlaceActor { spawn }, AbilityTarget::Cell(cell)) => {
            place(state, env, spawn, cell)?;
        }
        (AbilityKind::Beam { effect }, AbilityTarget::Direction(direction)) => {
            beam(state, env, origin, direction, effect);
        }
        (AbilityKind::Blast { effect, range }, _) => {
            let targets = state.registry().actors_near(origin, range);
            for id in targets.into_iter().filter(|&id| id != caster) {
                effect::apply_to_actor(state, env, id, effect);
            }
        }
        (AbilityKind::EarthVision { length }, _) => {
            if let Some(actor) = state.actor_mut(caster) {
                actor.status.add(StatusEffectKind::EarthVision, length);
            }
            state.report("The ground turns translucent.");
        }
        // Shapes were checked above.
        (AbilityKind::PlaceActor { .. } | AbilityKind::Beam { .. }, _) => {}
    }
    Ok(())
}

fn place(
    state: &mut GameState,
    env: &GameEnv<'_>,
    kind: ActorKind,
    cell: Position,
) -> Result<EntityId, AbilityError> {
    let id = state.spawn(env, kind, cell)?;
    let name = state.actor_name(id);
    state.report(format!("{name} appears at {cell}."));
    Ok(id)
}

fn beam(
    state: &mut GameState,
    env: &GameEnv<'_>,
    origin: Position,
    direction: Direction,
    effect: Effect,
) {
    let map = env.map();
    let mut cell = origin;
    loop {
        cell = cell.step(direction);
        if !map.contains(cell) {
            state.report("The beam fades into the distance.");
            return;
        }
        if !map.is_passable(cell) {
            state.report("The beam hits a wall.");
            return;
        }
        if state.registry().actor_at(cell).is_some() {
            effect::apply_to_cell(state, env, cell, effect);
            return;
        }
    }
}
