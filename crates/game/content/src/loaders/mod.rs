//! Content loaders for reading game data from files.

pub mod config;
pub mod loadout;
pub mod scenario;

pub use config::ConfigLoader;
pub use loadout::LoadoutLoader;
pub use scenario::{ActorPlacement, Scenario, ScenarioLoader};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
