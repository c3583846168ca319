//! Line-based command parsing.
//!
//! Movement uses the roguelike keys (`h j k l y u b n`) or compass words.
//! Everything else is a short verb:
//!
//! | input             | meaning                                |
//! |-------------------|----------------------------------------|
//! | `.` / `wait`      | wait one turn                          |
//! | `a l`             | attack whatever stands east            |
//! | `s` / `sweep`     | hit every adjacent foe                 |
//! | `c2 k`, `c0 4,7`  | cast slot 2 north, slot 0 at (4, 7)    |
//! | `q` / `quit`      | end the session                        |

use rogue_core::{AbilityTarget, Command, Direction, EntityId, GameConfig, GameState, Position};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerInput {
    Move(Direction),
    Attack(Direction),
    Sweep,
    Cast { slot: usize, target: AbilityTarget },
    Wait,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("type a command, or `q` to quit")]
    Empty,

    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("which direction?")]
    MissingDirection,

    #[error("`{0}` is not an ability slot")]
    BadSlot(String),

    #[error("`{0}` is neither a direction nor a cell")]
    BadTarget(String),

    #[error("unexpected `{0}`")]
    Trailing(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("there is nothing to attack there")]
    NothingThere,

    #[error("the player is not on the map")]
    NoPlayer,
}

pub fn parse(line: &str) -> Result<PlayerInput, ParseError> {
    let lowered = line.trim().to_ascii_lowercase();
    let mut tokens = lowered.split_whitespace();
    let head = tokens.next().ok_or(ParseError::Empty)?;

    let input = match head {
        "." | "wait" => PlayerInput::Wait,
        "q" | "quit" => PlayerInput::Quit,
        "s" | "sweep" => PlayerInput::Sweep,
        "a" | "attack" => {
            let token = tokens.next().ok_or(ParseError::MissingDirection)?;
            let direction =
                direction(token).ok_or_else(|| ParseError::BadTarget(token.to_string()))?;
            PlayerInput::Attack(direction)
        }
        "c" | "cast" => {
            let slot = tokens.next().ok_or_else(|| ParseError::BadSlot(String::new()))?;
            PlayerInput::Cast {
                slot: parse_slot(slot)?,
                target: parse_target(tokens.next())?,
            }
        }
        _ if head.starts_with('c') && head.len() > 1 => PlayerInput::Cast {
            slot: parse_slot(&head[1..])?,
            target: parse_target(tokens.next())?,
        },
        _ => match direction(head) {
            Some(direction) => PlayerInput::Move(direction),
            None => return Err(ParseError::Unknown(head.to_string())),
        },
    };

    match tokens.next() {
        Some(extra) => Err(ParseError::Trailing(extra.to_string())),
        None => Ok(input),
    }
}

fn direction(token: &str) -> Option<Direction> {
    let direction = match token {
        "k" | "north" => Direction::North,
        "u" | "northeast" => Direction::NorthEast,
        "l" | "east" => Direction::East,
        "n" | "southeast" => Direction::SouthEast,
        "j" | "south" => Direction::South,
        "b" | "southwest" => Direction::SouthWest,
        "h" | "west" => Direction::West,
        "y" | "northwest" => Direction::NorthWest,
        _ => return None,
    };
    Some(direction)
}

fn parse_slot(token: &str) -> Result<usize, ParseError> {
    token
        .parse::<usize>()
        .ok()
        .filter(|&slot| slot < GameConfig::ABILITY_SLOTS)
        .ok_or_else(|| ParseError::BadSlot(token.to_string()))
}

fn parse_target(token: Option<&str>) -> Result<AbilityTarget, ParseError> {
    let Some(token) = token else {
        return Ok(AbilityTarget::None);
    };
    if let Some(direction) = direction(token) {
        return Ok(AbilityTarget::Direction(direction));
    }

    let bad = || ParseError::BadTarget(token.to_string());
    let (x, y) = token.split_once(',').ok_or_else(bad)?;
    let x = x.trim().parse().map_err(|_| bad())?;
    let y = y.trim().parse().map_err(|_| bad())?;
    Ok(AbilityTarget::Cell(Position::new(x, y)))
}

impl PlayerInput {
    /// Binds the input to the current state. `Ok(None)` means quit.
    pub fn resolve(self, player: EntityId, state: &GameState) -> Result<Option<Command>, ResolveError> {
        let command = match self {
            PlayerInput::Quit => return Ok(None),
            PlayerInput::Move(direction) => Command::Move(direction),
            PlayerInput::Sweep => Command::Sweep,
            PlayerInput::Wait => Command::Wait,
            PlayerInput::Cast { slot, target } => Command::Cast { slot, target },
            PlayerInput::Attack(direction) => {
                let origin = state.actor(player).ok_or(ResolveError::NoPlayer)?.position();
                let target = state
                    .registry()
                    .actor_at(origin.step(direction))
                    .ok_or(ResolveError::NothingThere)?;
                Command::Attack(target)
            }
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rogue_core::{ActorKind, GameEnv, GridMap, PcgRng};

    #[test]
    fn movement_keys_and_words() {
        assert_eq!(parse("h"), Ok(PlayerInput::Move(Direction::West)));
        assert_eq!(parse("  North "), Ok(PlayerInput::Move(Direction::North)));
        assert_eq!(parse("n"), Ok(PlayerInput::Move(Direction::SouthEast)));
    }

    #[test]
    fn cast_accepts_directions_cells_and_no_target() {
        assert_eq!(
            parse("c2 k"),
            Ok(PlayerInput::Cast {
                slot: 2,
                target: AbilityTarget::Direction(Direction::North)
            })
        );
        assert_eq!(
            parse("cast 0 4,7"),
            Ok(PlayerInput::Cast {
                slot: 0,
                target: AbilityTarget::Cell(Position::new(4, 7))
            })
        );
        assert_eq!(
            parse("c8"),
            Ok(PlayerInput::Cast {
                slot: 8,
                target: AbilityTarget::None
            })
        );
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("dance"), Err(ParseError::Unknown("dance".into())));
        assert_eq!(parse("a"), Err(ParseError::MissingDirection));
        assert_eq!(parse("c12"), Err(ParseError::BadSlot("12".into())));
        assert_eq!(parse("c1 over"), Err(ParseError::BadTarget("over".into())));
        assert_eq!(parse("wait now"), Err(ParseError::Trailing("now".into())));
    }

    #[test]
    fn attack_resolves_to_the_adjacent_actor() {
        let map = GridMap::new(4, 1);
        let config = GameConfig::default();
        let env = GameEnv::new(&map, &PcgRng, &config);
        let mut state = GameState::new(0);
        let player = state.add_player(&env, Position::new(0, 0)).unwrap();
        let grunt = state.spawn(&env, ActorKind::Grunt, Position::new(1, 0)).unwrap();

        assert_eq!(
            PlayerInput::Attack(Direction::East).resolve(player, &state),
            Ok(Some(Command::Attack(grunt)))
        );
        assert_eq!(
            PlayerInput::Attack(Direction::West).resolve(player, &state),
            Err(ResolveError::NothingThere)
        );
        assert_eq!(PlayerInput::Quit.resolve(player, &state), Ok(None));
    }
}
