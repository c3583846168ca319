//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use rogue_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML. Missing keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        toml::from_str(content).context("failed to parse config TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_npc_retries = 3\nbomb_timer = 7").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();

        assert_eq!(config.max_npc_retries, 3);
        assert_eq!(config.bomb_timer, 7);
        assert_eq!(config.detonation_radius, GameConfig::DEFAULT_DETONATION_RADIUS);
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(ConfigLoader::parse("bomb_timer = \"soon\"").is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = ConfigLoader::load(Path::new("/nonexistent/rogue.toml")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/rogue.toml"));
    }
}
