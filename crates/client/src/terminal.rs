//! Player controller reading commands from a line-oriented terminal.
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::rc::Rc;

use rogue_core::{
    Controller, EntityId, GameEnv, GameState, Position, RadiusVisibility, TurnOutcome,
    VisibilityProvider,
};

use crate::input;
use crate::render::{LogCursor, draw_map, draw_status};

/// Sight shared between the driver, which updates it, and the renderer.
#[derive(Clone, Debug)]
pub struct SharedSight(Rc<RefCell<RadiusVisibility>>);

impl SharedSight {
    pub fn new(radius: u32) -> Self {
        Self(Rc::new(RefCell::new(RadiusVisibility::new(radius))))
    }
}

impl VisibilityProvider for SharedSight {
    fn compute_visible(
        &self,
        state: &GameState,
        env: &GameEnv<'_>,
        viewer: EntityId,
    ) -> BTreeSet<Position> {
        self.0.borrow().compute_visible(state, env, viewer)
    }

    fn remember(&mut self, visible: &BTreeSet<Position>) {
        self.0.borrow_mut().remember(visible);
    }
}

pub struct TerminalController<R, W> {
    reader: R,
    writer: W,
    sight: SharedSight,
    cursor: LogCursor,
    message_lines: usize,
}

impl<R: BufRead, W: Write> TerminalController<R, W> {
    pub fn new(reader: R, writer: W, sight: SharedSight, message_lines: usize) -> Self {
        Self {
            reader,
            writer,
            sight,
            cursor: LogCursor::default(),
            message_lines,
        }
    }

    fn draw(&mut self, state: &GameState, env: &GameEnv<'_>) -> std::io::Result<()> {
        let fresh = self.cursor.unseen(state);
        let skipped = fresh.len().saturating_sub(self.message_lines);
        for line in &fresh[skipped..] {
            writeln!(self.writer, "{line}")?;
        }
        let map = draw_map(state, env.map(), &self.sight.0.borrow());
        write!(self.writer, "{map}{}\n> ", draw_status(state))?;
        self.writer.flush()
    }

    /// `None` on end of input.
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        match self.reader.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

impl<R: BufRead, W: Write> Controller for TerminalController<R, W> {
    fn choose_and_perform(
        &mut self,
        actor: EntityId,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> TurnOutcome {
        let line = match self.draw(state, env).and_then(|()| self.read_line()) {
            Ok(Some(line)) => line,
            Ok(None) => return TurnOutcome::Quit,
            Err(error) => {
                tracing::error!(%error, "terminal i/o failed");
                return TurnOutcome::Quit;
            }
        };

        let command = match input::parse(&line) {
            Ok(parsed) => parsed.resolve(actor, state),
            Err(error) => return TurnOutcome::from_result(Err(error)),
        };
        match command {
            Ok(Some(command)) => {
                TurnOutcome::from_result(command.into_action(actor).perform(state, env))
            }
            Ok(None) => TurnOutcome::Quit,
            Err(error) => TurnOutcome::from_result(Err(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rogue_core::{ActorKind, Controllers, GameConfig, GridMap, PcgRng, SessionEnd, TurnDriver};

    #[test]
    fn typed_session_moves_retries_and_quits() {
        let map = GridMap::new(5, 1);
        let config = GameConfig::default();
        let env = GameEnv::new(&map, &PcgRng, &config);
        let mut state = GameState::new(0);
        state.add_player(&env, Position::new(0, 0)).unwrap();
        state.spawn(&env, ActorKind::Totem, Position::new(4, 0)).unwrap();

        let sight = SharedSight::new(config.vision_radius);
        let terminal = TerminalController::new(
            "l\nh h\nl\nq\n".as_bytes(),
            Vec::new(),
            sight.clone(),
            5,
        );
        let mut controllers = Controllers::new(terminal);
        let mut visibility = sight;
        let end = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility)
            .run()
            .unwrap();

        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(state.actor(state.player).unwrap().position(), Position::new(2, 0));
        assert_eq!(state.log.last(), Some("Unexpected `h`."));
    }
}
