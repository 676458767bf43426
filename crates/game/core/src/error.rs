//! Validation errors for dungeon input data.
//!
//! The grid and path are loaded once and never mutated, so every structural
//! problem is caught here, at construction time, before any runtime layer
//! starts walking.

use crate::grid::Position;

/// Errors raised while building a [`crate::Dungeon`] from raw data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DungeonError {
    /// The grid has no rows or no columns.
    #[error("dungeon grid is empty")]
    EmptyGrid,

    /// A row's length differs from the first row's.
    #[error("grid row {row} has {found} columns, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The path has no steps.
    #[error("dungeon path is empty")]
    EmptyPath,

    /// A path step lies outside the grid.
    #[error("path step {index} at {position} is outside the {rows}x{cols} grid")]
    StepOutOfBounds {
        index: usize,
        position: Position,
        rows: usize,
        cols: usize,
    },

    /// Two consecutive path steps are not orthogonal neighbours.
    #[error("path step {index} moves from {from} to {to}, which are not adjacent")]
    NonAdjacentStep {
        index: usize,
        from: Position,
        to: Position,
    },

    /// The starting resource pool cannot keep the hero alive.
    #[error("minimum hp must be at least 1, got {0}")]
    InvalidMinimumHp(i32),
}

impl DungeonError {
    /// Returns a stable snake_case label for logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyGrid => "empty_grid",
            Self::RaggedGrid { .. } => "ragged_grid",
            Self::EmptyPath => "empty_path",
            Self::StepOutOfBounds { .. } => "step_out_of_bounds",
            Self::NonAdjacentStep { .. } => "non_adjacent_step",
            Self::InvalidMinimumHp(_) => "invalid_minimum_hp",
        }
    }
}
