//! Status effect system for actors.
//!
//! Status effects are temporary conditions that tick at the end of their
//! bearer's own turn. Durations are counted in those turns, not in global
//! cycles, so a slow actor keeps a status for the same number of its actions.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Active status effects on an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

/// A single status effect with its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Own turns left before the effect wears off.
    pub turns_left: u32,
}

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusEffectKind {
    /// Takes one point of heat damage at the end of each turn.
    Burning,

    /// Recovers one hit point at the end of each turn, up to `max_hp`.
    Regenerating,

    /// Sees the whole map through the earth.
    EarthVision,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Remaining turns of a status effect, `None` if it is not active.
    pub fn turns_left(&self, kind: StatusEffectKind) -> Option<u32> {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.turns_left)
    }

    /// Adds a status effect for the given number of turns.
    ///
    /// If the effect already exists, keeps the longer of the two durations.
    /// Zero-length effects and effects beyond capacity are dropped.
    pub fn add(&mut self, kind: StatusEffectKind, turns: u32) {
        if turns == 0 {
            return;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.turns_left = existing.turns_left.max(turns);
            return;
        }

        if !self.effects.is_full() {
            self.effects.push(StatusEffect {
                kind,
                turns_left: turns,
            });
        }
    }

    /// Removes a status effect immediately.
    pub fn remove(&mut self, kind: StatusEffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Consumes one turn of every effect and drops the ones that ran out.
    ///
    /// Returns the kinds that were active for this turn, in insertion order,
    /// so the caller can apply their per-turn consequences.
    pub fn tick(&mut self) -> ArrayVec<StatusEffectKind, { GameConfig::MAX_STATUS_EFFECTS }> {
        let active = self.effects.iter().map(|e| e.kind).collect();
        for effect in self.effects.iter_mut() {
            effect.turns_left = effect.turns_left.saturating_sub(1);
        }
        self.effects.retain(|e| e.turns_left > 0);
        active
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
