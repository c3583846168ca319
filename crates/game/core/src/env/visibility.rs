use std::collections::BTreeSet;

use crate::state::{EntityId, GameState, Position, StatusEffectKind};

use super::GameEnv;

/// Field-of-view collaborator notified once per player turn.
///
/// The driver calls [`observe`](Self::observe) before dispatching the
/// player's controller; frontends read the remembered cells when rendering.
pub trait VisibilityProvider {
    fn compute_visible(
        &self,
        state: &GameState,
        env: &GameEnv<'_>,
        viewer: EntityId,
    ) -> BTreeSet<Position>;

    fn remember(&mut self, visible: &BTreeSet<Position>);

    fn observe(&mut self, state: &GameState, env: &GameEnv<'_>, viewer: EntityId) {
        let visible = self.compute_visible(state, env, viewer);
        self.remember(&visible);
    }
}

/// Square sight radius around the viewer. Earth vision reveals the whole map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RadiusVisibility {
    radius: u32,
    visible: BTreeSet<Position>,
    explored: BTreeSet<Position>,
}

impl RadiusVisibility {
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    pub fn visible(&self) -> &BTreeSet<Position> {
        &self.visible
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.visible.contains(&position)
    }

    pub fn is_explored(&self, position: Position) -> bool {
        self.explored.contains(&position)
    }
}

impl VisibilityProvider for RadiusVisibility {
    fn compute_visible(
        &self,
        state: &GameState,
        env: &GameEnv<'_>,
        viewer: EntityId,
    ) -> BTreeSet<Position> {
        let Some(actor) = state.actor(viewer) else {
            return BTreeSet::new();
        };
        let dimensions = env.map().dimensions();
        let cells = dimensions.cells();

        if actor.status.has(StatusEffectKind::EarthVision) {
            return cells.collect();
        }
        cells
            .filter(|cell| cell.chebyshev_distance(actor.position) <= self.radius)
            .collect()
    }

    fn remember(&mut self, visible: &BTreeSet<Position>) {
        self.explored.extend(visible.iter().copied());
        self.visible = visible.clone();
    }
}
