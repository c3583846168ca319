//! Read-only collaborators consumed by the turn core.
//!
//! The map oracle answers terrain questions (bounds, passability, lingering
//! cell effects), the RNG oracle provides seeded rolls, and the visibility
//! provider receives the player's view once per player turn. [`GameEnv`]
//! bundles the read-only pieces so every rule function takes one argument
//! instead of three.
mod map;
mod rng;
mod visibility;

pub use map::{GridMap, MapDimensions, MapError, MapOracle, StaticTile, TerrainKind};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use visibility::{RadiusVisibility, VisibilityProvider};

use crate::config::GameConfig;

/// Read-only environment handed to actions, effects, controllers and the driver.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    map: &'a dyn MapOracle,
    rng: &'a dyn RngOracle,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(map: &'a dyn MapOracle, rng: &'a dyn RngOracle, config: &'a GameConfig) -> Self {
        Self { map, rng, config }
    }

    pub fn map(&self) -> &'a dyn MapOracle {
        self.map
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("dimensions", &self.map.dimensions())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
