use std::collections::BTreeMap;

use crate::effect::Effect;
use crate::state::Position;

/// Static map oracle exposing terrain layout and cell-bound effects.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: Position) -> Option<StaticTile>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    fn is_passable(&self, position: Position) -> bool {
        self.tile(position)
            .map(StaticTile::is_passable)
            .unwrap_or(false)
    }

    /// Lingering effect bound to a cell, applied to whoever ends a turn on it.
    fn effect_at(&self, position: Position) -> Option<Effect> {
        self.tile(position)
            .and_then(|tile| tile.terrain().lingering_effect())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// Every cell of the map, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn is_passable(self) -> bool {
        self.terrain.is_passable()
    }
}

/// Terrain classes. Fire and ice are walkable but bite whoever lingers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Floor,
    Wall,
    Fire,
    Ice,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        !matches!(self, TerrainKind::Wall)
    }

    pub fn lingering_effect(self) -> Option<Effect> {
        match self {
            TerrainKind::Fire => Some(Effect::heat(1)),
            TerrainKind::Ice => Some(Effect::cold(1)),
            TerrainKind::Floor | TerrainKind::Wall => None,
        }
    }

    /// Parses the ASCII glyph used by scenario rows.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(TerrainKind::Floor),
            '#' => Some(TerrainKind::Wall),
            '^' => Some(TerrainKind::Fire),
            '~' => Some(TerrainKind::Ice),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map must have at least one row and one column")]
    Empty,

    #[error("row {row} has width {width}, expected {expected}")]
    RaggedRow {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("unknown terrain glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
}

/// Rectangular map stored row-major, with optional per-cell effect overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    dimensions: MapDimensions,
    terrain: Vec<TerrainKind>,
    cell_effects: BTreeMap<Position, Effect>,
}

impl GridMap {
    /// An open floor of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            terrain: vec![TerrainKind::Floor; (width * height) as usize],
            cell_effects: BTreeMap::new(),
        }
    }

    /// Builds a map from ASCII rows (`.` floor, `#` wall, `^` fire, `~` ice).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let expected = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        if expected == 0 {
            return Err(MapError::Empty);
        }

        let mut terrain = Vec::with_capacity(expected * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let width = row.chars().count();
            if width != expected {
                return Err(MapError::RaggedRow {
                    row: y,
                    width,
                    expected,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let kind = TerrainKind::from_glyph(glyph)
                    .ok_or(MapError::UnknownGlyph { glyph, x, y })?;
                terrain.push(kind);
            }
        }

        Ok(Self {
            dimensions: MapDimensions::new(expected as u32, rows.len() as u32),
            terrain,
            cell_effects: BTreeMap::new(),
        })
    }

    pub fn set_terrain(&mut self, position: Position, kind: TerrainKind) {
        if let Some(index) = self.index(position) {
            self.terrain[index] = kind;
        }
    }

    /// Binds an effect to a cell, overriding whatever its terrain provides.
    pub fn with_cell_effect(mut self, position: Position, effect: Effect) -> Self {
        self.cell_effects.insert(position, effect);
        self
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions
            .contains(position)
            .then(|| (position.y as u32 * self.dimensions.width + position.x as u32) as usize)
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.index(position)
            .map(|index| StaticTile::new(self.terrain[index]))
    }

    fn effect_at(&self, position: Position) -> Option<Effect> {
        self.cell_effects.get(&position).copied().or_else(|| {
            self.tile(position)
                .and_then(|tile| tile.terrain().lingering_effect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_into_terrain() {
        let map = GridMap::from_rows(&["#..", ".^~"]).unwrap();

        assert_eq!(map.dimensions(), MapDimensions::new(3, 2));
        assert!(!map.is_passable(Position::new(0, 0)));
        assert!(map.is_passable(Position::new(1, 1)));
        assert_eq!(map.effect_at(Position::new(1, 1)), Some(Effect::heat(1)));
        assert_eq!(map.effect_at(Position::new(2, 1)), Some(Effect::cold(1)));
        assert_eq!(map.effect_at(Position::new(1, 0)), None);
        assert!(!map.is_passable(Position::new(3, 0)));
    }

    #[test]
    fn cells_outlive_the_dimensions_they_came_from() {
        let map = GridMap::new(3, 2);
        let cells: Vec<_> = map.dimensions().cells().collect();

        assert_eq!(cells.len(), 6);
        assert_eq!(cells.first(), Some(&Position::new(0, 0)));
        assert_eq!(cells[3], Position::new(0, 1));
        assert_eq!(cells.last(), Some(&Position::new(2, 1)));
    }

    #[test]
    fn rejects_ragged_rows_and_unknown_glyphs() {
        assert_eq!(
            GridMap::from_rows(&["...", ".."]),
            Err(MapError::RaggedRow {
                row: 1,
                width: 2,
                expected: 3
            })
        );
        assert!(matches!(
            GridMap::from_rows(&["..x"]),
            Err(MapError::UnknownGlyph { glyph: 'x', .. })
        ));
        assert_eq!(GridMap::from_rows::<&str>(&[]), Err(MapError::Empty));
    }

    #[test]
    fn cell_effect_overrides_terrain() {
        let map = GridMap::new(4, 4).with_cell_effect(Position::new(2, 2), Effect::damage(3));
        assert_eq!(map.effect_at(Position::new(2, 2)), Some(Effect::damage(3)));
    }
}
