//! Static dungeon layout: room grid, walking path and starting resources.
//!
//! All three pieces are loaded once per session and never mutated. Runtime
//! layers share a [`Dungeon`] behind an `Arc` and read it freely.

use crate::config::GameConfig;
use crate::error::DungeonError;
use crate::grid::{Direction, Position};

/// Meaning of a room value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomKind {
    /// `0`: nothing happens.
    Corridor,
    /// `> 0`: grants this many hit points and holds a pickup.
    Bounty(u32),
    /// `< 0`: holds an occupant dealing this much damage.
    Threat(u32),
}

impl RoomKind {
    pub fn from_value(value: i32) -> Self {
        match value {
            0 => Self::Corridor,
            v if v > 0 => Self::Bounty(v.unsigned_abs()),
            v => Self::Threat(v.unsigned_abs()),
        }
    }

    pub const fn is_threat(self) -> bool {
        matches!(self, Self::Threat(_))
    }
}

/// Rectangular grid of room values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl Grid {
    /// Builds a grid from row-major nested vectors.
    pub fn new(rows: Vec<Vec<i32>>) -> Result<Self, DungeonError> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(DungeonError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != expected {
                return Err(DungeonError::RaggedGrid {
                    row,
                    expected,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }

        Ok(Self {
            rows: rows.len(),
            cols: expected,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row >= 0
            && position.col >= 0
            && (position.row as usize) < self.rows
            && (position.col as usize) < self.cols
    }

    /// Room value at `position`, or `None` outside the grid.
    pub fn value(&self, position: Position) -> Option<i32> {
        if !self.contains(position) {
            return None;
        }
        let index = position.row as usize * self.cols + position.col as usize;
        self.cells.get(index).copied()
    }

    /// Room kind at `position`; cells outside the grid read as corridors.
    pub fn room(&self, position: Position) -> RoomKind {
        RoomKind::from_value(self.value(position).unwrap_or(0))
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, i32)> + '_ {
        self.cells.iter().enumerate().map(|(index, value)| {
            let row = (index / self.cols) as i32;
            let col = (index % self.cols) as i32;
            (Position::new(row, col), *value)
        })
    }
}

/// Ordered walk through the grid, entrance first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DungeonPath {
    steps: Vec<Position>,
}

impl DungeonPath {
    /// Validates that every step is inside `grid` and adjacent to the previous.
    pub fn new(steps: Vec<Position>, grid: &Grid) -> Result<Self, DungeonError> {
        if steps.is_empty() {
            return Err(DungeonError::EmptyPath);
        }

        for (index, position) in steps.iter().enumerate() {
            if !grid.contains(*position) {
                return Err(DungeonError::StepOutOfBounds {
                    index,
                    position: *position,
                    rows: grid.rows(),
                    cols: grid.cols(),
                });
            }
        }

        for (index, pair) in steps.windows(2).enumerate() {
            if !pair[0].is_adjacent(pair[1]) {
                return Err(DungeonError::NonAdjacentStep {
                    index: index + 1,
                    from: pair[0],
                    to: pair[1],
                });
            }
        }

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Position] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn entrance(&self) -> Position {
        self.steps[0]
    }

    pub fn exit(&self) -> Position {
        self.steps[self.steps.len() - 1]
    }
}

/// Cells used by the closing scene, all on the final cell's row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalLayout {
    /// Cells walked after leaving the grid, in order.
    pub approach: [Position; GameConfig::TERMINAL_APPROACH_CELLS as usize],
    /// Where the boss stands.
    pub boss: Position,
    /// Where the rescued NPC waits.
    pub npc: Position,
    /// Cell adjacent to the NPC the hero finally steps onto.
    pub reunion: Position,
}

impl TerminalLayout {
    pub fn after(exit: Position) -> Self {
        let first = exit.step(Direction::Right);
        let second = first.step(Direction::Right);
        let boss = second.step(Direction::Right);
        let npc = boss.step(Direction::Right);
        Self {
            approach: [first, second],
            boss,
            npc,
            reunion: npc.step(Direction::Left),
        }
    }
}

/// A complete, validated dungeon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dungeon {
    grid: Grid,
    path: DungeonPath,
    minimum_hp: i32,
}

impl Dungeon {
    pub fn new(grid: Grid, path: DungeonPath, minimum_hp: i32) -> Result<Self, DungeonError> {
        if minimum_hp < 1 {
            return Err(DungeonError::InvalidMinimumHp(minimum_hp));
        }
        Ok(Self {
            grid,
            path,
            minimum_hp,
        })
    }

    /// Builds and validates a dungeon from raw data.
    pub fn from_parts(
        rows: Vec<Vec<i32>>,
        steps: Vec<(i32, i32)>,
        minimum_hp: i32,
    ) -> Result<Self, DungeonError> {
        let grid = Grid::new(rows)?;
        let path = DungeonPath::new(steps.into_iter().map(Position::from).collect(), &grid)?;
        Self::new(grid, path, minimum_hp)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn path(&self) -> &DungeonPath {
        &self.path
    }

    pub fn minimum_hp(&self) -> i32 {
        self.minimum_hp
    }

    pub fn room(&self, position: Position) -> RoomKind {
        self.grid.room(position)
    }

    /// The room at the end of the path, which decides the closing scene.
    pub fn terminal_room(&self) -> RoomKind {
        self.grid.room(self.path.exit())
    }

    pub fn is_exit(&self, position: Position) -> bool {
        self.path.exit() == position
    }

    pub fn terminal_layout(&self) -> TerminalLayout {
        TerminalLayout::after(self.path.exit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Dungeon {
        Dungeon::from_parts(
            vec![vec![0, -5], vec![3, 0]],
            vec![(0, 0), (0, 1), (1, 1), (1, 0)],
            6,
        )
        .expect("valid dungeon")
    }

    #[test]
    fn room_kinds_follow_sign() {
        let dungeon = small();
        assert_eq!(dungeon.room(Position::new(0, 0)), RoomKind::Corridor);
        assert_eq!(dungeon.room(Position::new(0, 1)), RoomKind::Threat(5));
        assert_eq!(dungeon.room(Position::new(1, 0)), RoomKind::Bounty(3));
        assert_eq!(dungeon.room(Position::new(9, 9)), RoomKind::Corridor);
        assert_eq!(dungeon.terminal_room(), RoomKind::Bounty(3));
    }

    #[test]
    fn rejects_ragged_grid() {
        let err = Grid::new(vec![vec![0, 1], vec![2]]).unwrap_err();
        assert_eq!(
            err,
            DungeonError::RaggedGrid {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(Grid::new(vec![]).unwrap_err(), DungeonError::EmptyGrid);
    }

    #[test]
    fn rejects_diagonal_and_out_of_bounds_steps() {
        let rows = vec![vec![0, 0], vec![0, 0]];
        let diagonal = Dungeon::from_parts(rows.clone(), vec![(0, 0), (1, 1)], 1).unwrap_err();
        assert!(matches!(
            diagonal,
            DungeonError::NonAdjacentStep { index: 1, .. }
        ));

        let outside = Dungeon::from_parts(rows.clone(), vec![(0, 0), (0, 2)], 1).unwrap_err();
        assert!(matches!(
            outside,
            DungeonError::StepOutOfBounds { index: 1, .. }
        ));

        let empty = Dungeon::from_parts(rows, vec![], 1).unwrap_err();
        assert_eq!(empty, DungeonError::EmptyPath);
    }

    #[test]
    fn rejects_non_positive_minimum_hp() {
        let err = Dungeon::from_parts(vec![vec![0]], vec![(0, 0)], 0).unwrap_err();
        assert_eq!(err, DungeonError::InvalidMinimumHp(0));
    }

    #[test]
    fn cells_iterate_row_major() {
        let dungeon = small();
        let cells: Vec<_> = dungeon.grid().cells().collect();
        assert_eq!(
            cells,
            vec![
                (Position::new(0, 0), 0),
                (Position::new(0, 1), -5),
                (Position::new(1, 0), 3),
                (Position::new(1, 1), 0),
            ]
        );
    }

    #[test]
    fn terminal_layout_extends_right_of_exit() {
        let layout = TerminalLayout::after(Position::new(1, 0));
        assert_eq!(layout.approach, [Position::new(1, 1), Position::new(1, 2)]);
        assert_eq!(layout.boss, Position::new(1, 3));
        assert_eq!(layout.npc, Position::new(1, 4));
        assert!(layout.reunion.is_adjacent(layout.npc));
    }
}
