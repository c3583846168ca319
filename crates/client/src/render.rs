//! ASCII rendering of the map, the hotbar and new log lines.
use std::fmt::Write as _;

use rogue_core::{ActorKind, ActorState, GameState, MapOracle, Position, RadiusVisibility, TerrainKind};

fn terrain_glyph(terrain: TerrainKind) -> char {
    match terrain {
        TerrainKind::Floor => '.',
        TerrainKind::Wall => '#',
        TerrainKind::Fire => '^',
        TerrainKind::Ice => '~',
    }
}

fn actor_glyph(actor: &ActorState) -> char {
    match actor.kind {
        ActorKind::Player => '@',
        ActorKind::Grunt => 'g',
        ActorKind::Hunter => 'H',
        ActorKind::Totem => '&',
        ActorKind::FlyingBomb => 'f',
        ActorKind::Bomb => match actor.countdown {
            Some(left @ 0..=9) => char::from_digit(left as u32, 10).unwrap_or('*'),
            _ => '*',
        },
    }
}

/// Draws visible cells with their occupants, remembered cells as bare terrain.
pub fn draw_map(state: &GameState, map: &dyn MapOracle, sight: &RadiusVisibility) -> String {
    let dimensions = map.dimensions();
    let mut out = String::with_capacity(((dimensions.width + 1) * dimensions.height) as usize);

    for y in 0..dimensions.height as i32 {
        for x in 0..dimensions.width as i32 {
            let cell = Position::new(x, y);
            let glyph = if sight.is_visible(cell) {
                state
                    .registry()
                    .actor_at(cell)
                    .and_then(|id| state.actor(id))
                    .map(actor_glyph)
                    .or_else(|| map.tile(cell).map(|tile| terrain_glyph(tile.terrain())))
                    .unwrap_or(' ')
            } else if sight.is_explored(cell) {
                map.tile(cell).map(|tile| terrain_glyph(tile.terrain())).unwrap_or(' ')
            } else {
                ' '
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// One status line: hit points, turn counter and ability readiness.
pub fn draw_status(state: &GameState) -> String {
    let mut out = match state.actor(state.player) {
        Some(player) => format!("HP {}/{}", player.hp, player.max_hp),
        None => "HP 0".to_string(),
    };
    let _ = write!(out, "  turn {}  |", state.turn.player_turns);

    for (slot, ability) in state.abilities.slots().enumerate() {
        let Some(ability) = ability else { continue };
        if ability.is_ready() {
            let _ = write!(out, " {slot}:{}", ability.name);
        } else {
            let _ = write!(out, " {slot}:({})", ability.cooldown_left);
        }
    }
    out
}

/// Yields log lines the player has not seen yet.
#[derive(Debug, Default)]
pub struct LogCursor {
    seen: usize,
}

impl LogCursor {
    pub fn unseen<'s>(&mut self, state: &'s GameState) -> &'s [String] {
        let fresh = state.log.since(self.seen);
        self.seen = state.log.len();
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rogue_core::{GameConfig, GameEnv, GridMap, PcgRng, VisibilityProvider};

    #[test]
    fn draws_actors_only_inside_sight() {
        let map = GridMap::from_rows(&["#####", "#..^#", "#####"]).unwrap();
        let config = GameConfig::default().with_bomb_timer(3);
        let env = GameEnv::new(&map, &PcgRng, &config);
        let mut state = GameState::new(0);
        let player = state.add_player(&env, Position::new(1, 1)).unwrap();
        state.spawn(&env, ActorKind::Bomb, Position::new(2, 1)).unwrap();
        state.spawn(&env, ActorKind::Hunter, Position::new(3, 1)).unwrap();

        let mut sight = RadiusVisibility::new(1);
        sight.observe(&state, &env, player);

        assert_eq!(draw_map(&state, &map, &sight), "###  \n#@3  \n###  \n");
    }

    #[test]
    fn cursor_only_returns_new_lines() {
        let mut state = GameState::new(0);
        let mut cursor = LogCursor::default();
        state.report("one");
        assert_eq!(cursor.unseen(&state), ["one".to_string()]);
        state.report("two");
        assert_eq!(cursor.unseen(&state), ["two".to_string()]);
        assert!(cursor.unseen(&state).is_empty());
    }
}
