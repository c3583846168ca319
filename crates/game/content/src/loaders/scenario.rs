//! Scenario loader.
//!
//! A scenario fixes the terrain, the player's start and the initial cast:
//!
//! ```ron
//! (
//!     seed: 7,
//!     rows: [
//!         "##########",
//!         "#........#",
//!         "#...^^...#",
//!         "##########",
//!     ],
//!     player: (1, 1),
//!     actors: [
//!         (kind: Hunter, at: (8, 2)),
//!         (kind: Grunt, at: (5, 1), hp: Some(4)),
//!     ],
//! )
//! ```

use std::path::Path;

use anyhow::Context;
use rogue_core::{
    AbilityBank, ActorKind, AiKind, Faction, GameConfig, GameEnv, GameState, GridMap, PcgRng,
    Position,
};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub seed: u64,
    pub rows: Vec<String>,
    pub player: (i32, i32),
    #[serde(default)]
    pub actors: Vec<ActorPlacement>,
}

/// One actor of the initial cast. Optional fields override the kind's template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActorPlacement {
    pub kind: ActorKind,
    pub at: (i32, i32),
    #[serde(default)]
    pub hp: Option<i32>,
    #[serde(default)]
    pub faction: Option<String>,
    #[serde(default)]
    pub ai: Option<AiKind>,
    #[serde(default)]
    pub recovery: Option<u32>,
}

impl Scenario {
    /// Builds the map and a populated state. Actors are scheduled after the
    /// player, in file order.
    pub fn build(&self, config: &GameConfig, abilities: AbilityBank) -> LoadResult<(GridMap, GameState)> {
        let map = GridMap::from_rows(&self.rows).context("invalid scenario rows")?;
        let rng = PcgRng;
        let env = GameEnv::new(&map, &rng, config);

        let mut state = GameState::with_abilities(self.seed, abilities);
        let (x, y) = self.player;
        state
            .add_player(&env, Position::new(x, y))
            .context("cannot place the player")?;

        for (index, placement) in self.actors.iter().enumerate() {
            let (x, y) = placement.at;
            let id = state
                .spawn(&env, placement.kind, Position::new(x, y))
                .with_context(|| format!("cannot place actor #{index} ({})", placement.kind))?;

            if let Some(actor) = state.actor_mut(id) {
                if let Some(hp) = placement.hp {
                    actor.hp = hp;
                    actor.max_hp = actor.max_hp.max(hp);
                }
                if let Some(faction) = &placement.faction {
                    actor.faction = Faction::new(faction.clone());
                }
                if let Some(ai) = placement.ai {
                    actor.ai = ai;
                }
                if let Some(recovery) = placement.recovery {
                    actor.recovery = recovery;
                }
            }
        }

        Ok((map, state))
    }
}

/// Loader for [`Scenario`] files in RON.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        ron::from_str(content).context("failed to parse scenario RON")
    }
}
