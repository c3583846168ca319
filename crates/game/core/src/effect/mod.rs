//! Effect application.
//!
//! This is the only place that changes an actor's hit points. What an effect
//! does depends on the kind of actor it lands on: ordinary actors take
//! damage, detonators explode on heat, totems shatter and rebroadcast.
//! Every removal goes through [`GameState::remove_actor`].

use crate::env::GameEnv;
use crate::state::{ActorKind, EntityId, GameState, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    Damage,
    Heat,
    Cold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    pub power: i32,
}

impl Effect {
    pub const DEFAULT_POWER: i32 = 1;

    pub const fn new(kind: EffectKind, power: i32) -> Self {
        Self { kind, power }
    }

    pub const fn damage(power: i32) -> Self {
        Self::new(EffectKind::Damage, power)
    }

    pub const fn heat(power: i32) -> Self {
        Self::new(EffectKind::Heat, power)
    }

    pub const fn cold(power: i32) -> Self {
        Self::new(EffectKind::Cold, power)
    }

    /// Phrase used in damage reports: "3 damage", "5 heat damage".
    fn describe_damage(self) -> String {
        match self.kind {
            EffectKind::Damage => format!("{} damage", self.power),
            kind => format!("{} {} damage", self.power, kind),
        }
    }
}

/// What happened to the target of an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectOutcome {
    /// No actor to hit.
    Missed,
    Damaged { remaining_hp: i32 },
    Killed,
    /// The target detonated; lists every removed actor, the bomb first.
    Detonated(Vec<EntityId>),
    /// A totem absorbed the effect and passed it on.
    Rebroadcast,
    Ignored,
}

/// Applies `effect` to a single actor.
pub fn apply_to_actor(
    state: &mut GameState,
    env: &GameEnv<'_>,
    target: EntityId,
    effect: Effect,
) -> EffectOutcome {
    let Some(kind) = state.actor(target).map(|actor| actor.kind) else {
        return EffectOutcome::Missed;
    };
    tracing::trace!(target = %target, kind = %effect.kind, power = effect.power, "applying effect");

    match kind {
        ActorKind::Bomb | ActorKind::FlyingBomb => match effect.kind {
            EffectKind::Heat => EffectOutcome::Detonated(detonate(state, env, target)),
            EffectKind::Damage | EffectKind::Cold => EffectOutcome::Ignored,
        },
        ActorKind::Totem => {
            rebroadcast(state, env, target, effect);
            EffectOutcome::Rebroadcast
        }
        ActorKind::Player | ActorKind::Grunt | ActorKind::Hunter => {
            inflict(state, target, effect)
        }
    }
}

/// Applies `effect` to whoever stands on `cell`.
pub fn apply_to_cell(
    state: &mut GameState,
    env: &GameEnv<'_>,
    cell: Position,
    effect: Effect,
) -> EffectOutcome {
    match state.registry().actor_at(cell) {
        Some(occupant) => apply_to_actor(state, env, occupant, effect),
        None => EffectOutcome::Missed,
    }
}

/// Blows up a detonator, removing every actor within the blast radius.
///
/// Returns the removed ids, the detonator first.
pub fn detonate(state: &mut GameState, env: &GameEnv<'_>, bomb: EntityId) -> Vec<EntityId> {
    let Some(origin) = state.actor(bomb).map(|actor| actor.position) else {
        return Vec::new();
    };

    let name = state.actor_name(bomb);
    state.report(format!("{name} explodes!"));
    let caught = state
        .registry()
        .actors_near(origin, env.config().detonation_radius);

    let mut removed = Vec::with_capacity(caught.len());
    if state.remove_actor(bomb).is_some() {
        removed.push(bomb);
    }
    for victim in caught.into_iter().filter(|&id| id != bomb) {
        let name = state.actor_name(victim);
        if state.remove_actor(victim).is_some() {
            state.report(format!("{name} is caught in the blast."));
            removed.push(victim);
        }
    }

    tracing::debug!(bomb = %bomb, removed = removed.len(), "detonation");
    removed
}

/// Restores hit points, capped at the actor's maximum.
pub fn restore_hp(state: &mut GameState, target: EntityId, amount: i32) -> Option<i32> {
    let actor = state.actor_mut(target)?;
    actor.hp = (actor.hp + amount).min(actor.max_hp);
    Some(actor.hp)
}

fn inflict(state: &mut GameState, target: EntityId, effect: Effect) -> EffectOutcome {
    let name = state.actor_name(target);
    state.report(format!("{name} takes {}.", effect.describe_damage()));

    let Some(actor) = state.actor_mut(target) else {
        return EffectOutcome::Missed;
    };
    actor.hp -= effect.power;
    let remaining_hp = actor.hp;

    if remaining_hp <= 0 {
        state.report(format!("{name} dies."));
        state.remove_actor(target);
        return EffectOutcome::Killed;
    }

    if effect.kind == EffectKind::Cold {
        actor.skip_turns += 1;
        state.report(format!("{name} is frozen in place."));
    }
    EffectOutcome::Damaged { remaining_hp }
}

fn rebroadcast(state: &mut GameState, env: &GameEnv<'_>, totem: EntityId, effect: Effect) {
    let Some(removed) = state.remove_actor(totem) else {
        return;
    };
    state.report(format!(
        "{} shatters and spreads the {}.",
        removed.name(),
        effect.kind
    ));

    for cell in removed.position.square(env.config().totem_extent) {
        apply_to_cell(state, env, cell, effect);
    }
}
