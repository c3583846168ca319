use crate::config::GameConfig;

use super::{EntityId, Faction, Position, StatusEffectKind, StatusEffects};

/// Closed set of actor kinds. The kind decides how an actor reacts to
/// effects; everything else about it is plain data on [`ActorState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActorKind {
    Player,
    /// Ordinary hostile that roams and hits whatever it bumps into.
    Grunt,
    /// Hostile that chases the nearest foe and sweeps adjacent cells.
    Hunter,
    /// Stationary detonator.
    Bomb,
    /// Detonator that flies towards the nearest foe.
    FlyingBomb,
    /// Absorbs any effect and rebroadcasts it around itself.
    Totem,
}

impl ActorKind {
    /// Detonators count down every completed turn and explode on heat.
    pub const fn is_detonator(self) -> bool {
        matches!(self, ActorKind::Bomb | ActorKind::FlyingBomb)
    }

    pub const fn label(self) -> &'static str {
        match self {
            ActorKind::Player => "Player",
            ActorKind::Grunt => "Grunt",
            ActorKind::Hunter => "Hunter",
            ActorKind::Bomb => "Bomb",
            ActorKind::FlyingBomb => "Flying bomb",
            ActorKind::Totem => "Totem",
        }
    }
}

/// Which controller decides an actor's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AiKind {
    /// Driven by the injected player controller.
    Player,
    /// Always waits.
    Idle,
    /// Attacks adjacent foes, otherwise wanders randomly.
    Roam,
    /// Walks towards the nearest foe and attacks once adjacent.
    SeekEnemy,
}

/// Complete state of a schedulable actor.
///
/// # Invariants
///
/// - `hp` only changes through effect application (`crate::effect`)
/// - `countdown` is `Some` exactly for detonators
/// - an actor absent from the registry is never scheduled
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub kind: ActorKind,
    /// Written only by `ActorRegistry::relocate`, which keeps the occupancy
    /// index in step; read it through [`ActorState::position`].
    pub(crate) position: Position,

    pub hp: i32,
    pub max_hp: i32,
    /// Power of the damage effect this actor deals when it attacks.
    pub attack: i32,
    pub faction: Faction,
    pub ai: AiKind,

    /// Cycles left to sit out before this actor acts again.
    pub skip_turns: u32,
    /// Value `skip_turns` is re-armed with after every completed action.
    pub recovery: u32,
    /// Detonator countdown; goes negative on the turn the bomb explodes.
    pub countdown: Option<i32>,

    pub status: StatusEffects,
}

impl ActorState {
    /// Creates an actor with the default template of its kind.
    pub fn from_kind(id: EntityId, kind: ActorKind, position: Position, config: &GameConfig) -> Self {
        let (faction, ai, attack) = match kind {
            ActorKind::Player => (Faction::player(), AiKind::Player, 2),
            ActorKind::Grunt => (Faction::hostile(), AiKind::Roam, 1),
            ActorKind::Hunter => (Faction::hostile(), AiKind::SeekEnemy, 2),
            ActorKind::Bomb | ActorKind::Totem => (Faction::player(), AiKind::Idle, 0),
            ActorKind::FlyingBomb => (Faction::player(), AiKind::SeekEnemy, 0),
        };

        Self {
            id,
            kind,
            position,
            hp: GameConfig::DEFAULT_HP,
            max_hp: GameConfig::DEFAULT_HP,
            attack,
            faction,
            ai,
            skip_turns: 0,
            recovery: 0,
            countdown: kind.is_detonator().then_some(config.bomb_timer),
            status: StatusEffects::empty(),
        }
    }

    /// Display name used in report messages, e.g. `Hunter #3`.
    pub fn name(&self) -> String {
        if self.kind == ActorKind::Player {
            "Player".to_string()
        } else {
            format!("{} {}", self.kind.label(), self.id)
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_foe_of(&self, other: &ActorState) -> bool {
        self.faction.is_foe_of(&other.faction)
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self.max_hp = self.max_hp.max(hp);
        self
    }

    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = faction;
        self
    }

    pub fn with_ai(mut self, ai: AiKind) -> Self {
        self.ai = ai;
        self
    }

    pub fn with_attack(mut self, attack: i32) -> Self {
        self.attack = attack;
        self
    }

    pub fn with_skip_turns(mut self, skip_turns: u32) -> Self {
        self.skip_turns = skip_turns;
        self
    }

    pub fn with_recovery(mut self, recovery: u32) -> Self {
        self.recovery = recovery;
        self
    }

    pub fn with_status(mut self, kind: StatusEffectKind, turns: u32) -> Self {
        self.status.add(kind, turns);
        self
    }
}
