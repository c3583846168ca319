//! Assembles config, loadout and scenario into a playable session.
use std::path::PathBuf;

use anyhow::Result;
use rogue_content::{ConfigLoader, LoadoutLoader, Scenario, ScenarioLoader};
use rogue_core::{AbilityBank, GameConfig, GameState, GridMap};

/// Arena used when no scenario file is given.
const DEFAULT_SCENARIO: &str = r#####################"(
    seed: 1,
    rows: [
        "####################",
        "#..................#",
        "#....~~......^^....#",
        "#....~~......^^....#",
        "#........##........#",
        "#........##........#",
        "#..................#",
        "####################",
    ],
    player: (2, 3),
    actors: [
        (kind: Grunt, at: (9, 2)),
        (kind: Grunt, at: (12, 6)),
        (kind: Hunter, at: (17, 1), recovery: Some(1)),
        (kind: Hunter, at: (17, 6), recovery: Some(1)),
    ],
)"#####################;

/// Where each part of the session comes from; `None` means the built-in default.
#[derive(Clone, Debug, Default)]
pub struct SessionSources {
    pub config: Option<PathBuf>,
    pub loadout: Option<PathBuf>,
    pub scenario: Option<PathBuf>,
    pub seed: Option<u64>,
}

pub struct Session {
    pub config: GameConfig,
    pub map: GridMap,
    pub state: GameState,
}

impl SessionSources {
    pub fn load(&self) -> Result<Session> {
        let config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => GameConfig::default(),
        };
        let abilities = match &self.loadout {
            Some(path) => LoadoutLoader::load(path)?,
            None => AbilityBank::reference_loadout(),
        };
        let mut scenario: Scenario = match &self.scenario {
            Some(path) => ScenarioLoader::load(path)?,
            None => ScenarioLoader::parse(DEFAULT_SCENARIO)?,
        };
        if let Some(seed) = self.seed {
            scenario.seed = seed;
        }

        let (map, state) = scenario.build(&config, abilities)?;
        tracing::info!(
            seed = state.game_seed,
            actors = state.registry().len(),
            "session assembled"
        );
        Ok(Session { config, map, state })
    }
}
