//! Player abilities and their cooldown bank.
//!
//! The bank has a fixed number of optional slots. Cooldowns tick once per
//! completed player turn; an ability can be invoked only when its slot has
//! fully recharged, and invoking it re-arms the full cooldown.
mod invoke;

pub use invoke::invoke;

use crate::config::GameConfig;
use crate::effect::Effect;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActorKind, Direction, Position, SpawnError};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    /// Spawns an actor on a target cell.
    PlaceActor { spawn: ActorKind },
    /// Travels from the caster in a direction and hits the first actor.
    Beam { effect: Effect },
    /// Hits every other actor within `range` of the caster.
    Blast { effect: Effect, range: u32 },
    /// Lets the caster see through walls for `length` turns.
    EarthVision { length: u32 },
}

impl AbilityKind {
    pub fn target_shape(&self) -> TargetShape {
        match self {
            AbilityKind::PlaceActor { .. } => TargetShape::Cell,
            AbilityKind::Beam { .. } => TargetShape::Direction,
            AbilityKind::Blast { .. } | AbilityKind::EarthVision { .. } => TargetShape::None,
        }
    }
}

/// The kind of target an ability expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TargetShape {
    None,
    Cell,
    Direction,
}

/// Target supplied with an ability invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityTarget {
    #[default]
    None,
    Cell(Position),
    Direction(Direction),
}

impl AbilityTarget {
    pub fn shape(self) -> TargetShape {
        match self {
            AbilityTarget::None => TargetShape::None,
            AbilityTarget::Cell(_) => TargetShape::Cell,
            AbilityTarget::Direction(_) => TargetShape::Direction,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub name: String,
    pub cooldown: u32,
    /// Completed player turns until the ability can be used again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_left: u32,
    pub kind: AbilityKind,
}

impl Ability {
    /// A ready ability.
    pub fn new(name: impl Into<String>, cooldown: u32, kind: AbilityKind) -> Self {
        Self {
            name: name.into(),
            cooldown,
            cooldown_left: 0,
            kind,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_left == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    #[error("there is no ability slot {slot}")]
    SlotOutOfRange { slot: usize },

    #[error("ability slot {slot} is empty")]
    EmptySlot { slot: usize },

    #[error("ability slot {slot} is recharging ({turns_left} turns left)")]
    NotReady { slot: usize, turns_left: u32 },

    #[error("{ability} needs a {expected} target")]
    InvalidTarget {
        ability: String,
        expected: TargetShape,
    },

    #[error("caster {0} is not registered")]
    CasterNotFound(crate::state::EntityId),

    #[error("a loadout needs exactly {expected} slots, found {found}")]
    SlotCount { expected: usize, found: usize },

    #[error("cannot place there: {0}")]
    Spawn(#[from] SpawnError),
}

impl GameError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AbilityError::NotReady { .. } => ErrorSeverity::Recoverable,
            AbilityError::SlotOutOfRange { .. }
            | AbilityError::EmptySlot { .. }
            | AbilityError::InvalidTarget { .. }
            | AbilityError::SlotCount { .. } => ErrorSeverity::Validation,
            AbilityError::CasterNotFound(_) => ErrorSeverity::Internal,
            AbilityError::Spawn(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AbilityError::SlotOutOfRange { .. } => "ABILITY_SLOT_OUT_OF_RANGE",
            AbilityError::EmptySlot { .. } => "ABILITY_EMPTY_SLOT",
            AbilityError::NotReady { .. } => "ABILITY_NOT_READY",
            AbilityError::InvalidTarget { .. } => "ABILITY_INVALID_TARGET",
            AbilityError::CasterNotFound(_) => "ABILITY_CASTER_NOT_FOUND",
            AbilityError::SlotCount { .. } => "ABILITY_SLOT_COUNT",
            AbilityError::Spawn(error) => error.error_code(),
        }
    }
}

/// Fixed hotbar of optional abilities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityBank {
    slots: [Option<Ability>; GameConfig::ABILITY_SLOTS],
}

impl AbilityBank {
    pub fn empty() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Builds a bank from exactly [`GameConfig::ABILITY_SLOTS`] slots.
    pub fn from_slots(slots: Vec<Option<Ability>>) -> Result<Self, AbilityError> {
        let found = slots.len();
        let slots = slots.try_into().map_err(|_| AbilityError::SlotCount {
            expected: GameConfig::ABILITY_SLOTS,
            found,
        })?;
        Ok(Self { slots })
    }

    /// The default hotbar.
    pub fn reference_loadout() -> Self {
        let place = |name: &str, spawn, cooldown| {
            Some(Ability::new(name, cooldown, AbilityKind::PlaceActor { spawn }))
        };

        Self {
            slots: [
                place("Place bomb", ActorKind::Bomb, 8),
                Some(Ability::new("Ice beam", 3, AbilityKind::Beam {
                    effect: Effect::cold(2),
                })),
                Some(Ability::new("Heat beam", 8, AbilityKind::Beam {
                    effect: Effect::heat(5),
                })),
                place("Place totem", ActorKind::Totem, 8),
                Some(Ability::new("Heat blast", 8, AbilityKind::Blast {
                    effect: Effect::heat(Effect::DEFAULT_POWER),
                    range: 5,
                })),
                place("Seeking bomb", ActorKind::FlyingBomb, 12),
                None,
                None,
                Some(Ability::new("Earth vision", 24, AbilityKind::EarthVision {
                    length: 12,
                })),
                None,
            ],
        }
    }

    pub fn slot(&self, slot: usize) -> Option<&Ability> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn set(&mut self, slot: usize, ability: Option<Ability>) -> Result<(), AbilityError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(AbilityError::SlotOutOfRange { slot })?;
        *entry = ability;
        Ok(())
    }

    /// All slots in hotbar order.
    pub fn slots(&self) -> impl Iterator<Item = Option<&Ability>> {
        self.slots.iter().map(Option::as_ref)
    }

    /// Advances every cooldown by one player turn, floored at zero.
    pub fn tick(&mut self) {
        for ability in self.slots.iter_mut().flatten() {
            ability.cooldown_left = ability.cooldown_left.saturating_sub(1);
        }
    }

    /// Returns the ability in `slot` if it can be used right now.
    pub fn check_ready(&self, slot: usize) -> Result<&Ability, AbilityError> {
        let ability = self
            .slots
            .get(slot)
            .ok_or(AbilityError::SlotOutOfRange { slot })?
            .as_ref()
            .ok_or(AbilityError::EmptySlot { slot })?;

        if !ability.is_ready() {
            return Err(AbilityError::NotReady {
                slot,
                turns_left: ability.cooldown_left,
            });
        }
        Ok(ability)
    }

    /// Re-arms the full cooldown of `slot`.
    pub fn mark_used(&mut self, slot: usize) {
        if let Some(Some(ability)) = self.slots.get_mut(slot) {
            ability.cooldown_left = ability.cooldown;
        }
    }
}

impl Default for AbilityBank {
    fn default() -> Self {
        Self::empty()
    }
}
