//! Ability loadout loader.
//!
//! A loadout file lists every hotbar slot in order; empty slots are `None`:
//!
//! ```ron
//! (
//!     slots: [
//!         Some((name: "Place bomb", cooldown: 8, kind: PlaceActor(spawn: Bomb))),
//!         Some((name: "Ice beam", cooldown: 3, kind: Beam(effect: (kind: Cold, power: 2)))),
//!         None,
//!         // ... ten entries in total
//!     ],
//! )
//! ```

use std::path::Path;

use anyhow::Context;
use rogue_core::{Ability, AbilityBank, AbilityKind};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Deserialize)]
struct LoadoutRon {
    slots: Vec<Option<AbilitySpec>>,
}

#[derive(Debug, Clone, Deserialize)]
struct AbilitySpec {
    name: String,
    cooldown: u32,
    kind: AbilityKind,
}

impl From<AbilitySpec> for Ability {
    fn from(spec: AbilitySpec) -> Self {
        Ability::new(spec.name, spec.cooldown, spec.kind)
    }
}

/// Loader for [`AbilityBank`] from RON. Every ability starts ready.
pub struct LoadoutLoader;

impl LoadoutLoader {
    pub fn load(path: &Path) -> LoadResult<AbilityBank> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("invalid loadout {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<AbilityBank> {
        let data: LoadoutRon = ron::from_str(content).context("failed to parse loadout RON")?;
        let slots = data
            .slots
            .into_iter()
            .map(|slot| slot.map(Ability::from))
            .collect();
        Ok(AbilityBank::from_slots(slots)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rogue_core::{ActorKind, Effect};

    const LOADOUT: &str = r#"(
        slots: [
            Some((name: "Place totem", cooldown: 4, kind: PlaceActor(spawn: Totem))),
            Some((name: "Frost", cooldown: 2, kind: Beam(effect: (kind: Cold, power: 3)))),
            None, None, None, None, None, None,
            Some((name: "Nova", cooldown: 9, kind: Blast(effect: (kind: Heat, power: 1), range: 3))),
            None,
        ],
    )"#;

    #[test]
    fn parses_a_full_hotbar() {
        let bank = LoadoutLoader::parse(LOADOUT).unwrap();

        let totem = bank.slot(0).unwrap();
        assert_eq!(totem.kind, AbilityKind::PlaceActor { spawn: ActorKind::Totem });
        assert!(totem.is_ready());
        assert_eq!(
            bank.slot(8).unwrap().kind,
            AbilityKind::Blast {
                effect: Effect::heat(1),
                range: 3
            }
        );
        assert!(bank.slot(9).is_none());
    }

    #[test]
    fn short_hotbar_is_rejected() {
        let error = LoadoutLoader::parse("(slots: [None, None])").unwrap_err();
        assert!(error.to_string().contains("exactly 10 slots"));
    }
}
