//! Data files for rogue sessions.
//!
//! Loaders turn TOML and RON files into core types:
//! - game configuration (`config.toml`)
//! - the player's ability loadout (`loadout.ron`)
//! - scenarios: terrain rows, player start and actor placements (`*.ron`)
//!
//! Content only seeds a session; once loaded, everything lives in
//! [`rogue_core::GameState`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ActorPlacement, ConfigLoader, LoadResult, LoadoutLoader, Scenario, ScenarioLoader};
