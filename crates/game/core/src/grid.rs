//! Grid coordinates, facing directions and resource meters.
use std::fmt;

/// Discrete grid position expressed in `(row, col)` cell coordinates.
///
/// Coordinates are signed so the terminal area, which extends past the last
/// grid column, can be addressed with the same type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring cell one step in `direction`.
    pub const fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Returns true if `other` is exactly one orthogonal step away.
    pub fn is_adjacent(self, other: Position) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Facing / movement direction.
///
/// Sprites only have left- and right-facing rows, so vertical directions are
/// collapsed through [`Direction::sprite_axis`] when an animation needs a row.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Row/column delta of a single step.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Direction of a single orthogonal step from `from` to `to`.
    ///
    /// Returns `None` when the cells are not adjacent.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        match (to.row - from.row, to.col - from.col) {
            (-1, 0) => Some(Self::Up),
            (1, 0) => Some(Self::Down),
            (0, -1) => Some(Self::Left),
            (0, 1) => Some(Self::Right),
            _ => None,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Collapses to the horizontal axis sprites are drawn on.
    ///
    /// Horizontal directions map to themselves; a vertical move keeps the
    /// horizontal facing the entity already had.
    pub const fn sprite_axis(self, previous: Direction) -> Self {
        if self.is_horizontal() {
            self
        } else if previous.is_horizontal() {
            previous
        } else {
            Self::Right
        }
    }

    /// Sprite-sheet row used by attack/hurt/death animations.
    pub const fn row_hint(self) -> u8 {
        match self {
            Self::Left => 1,
            _ => 0,
        }
    }
}

/// Integer resource meter (the hero's hit points).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: i32,
    pub maximum: i32,
}

impl ResourceMeter {
    pub fn new(current: i32, maximum: i32) -> Self {
        Self { current, maximum }
    }

    /// A full meter.
    pub fn full(maximum: i32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Adds `amount`, lifting the maximum if the new value exceeds it.
    pub fn grant(&mut self, amount: u32) -> i32 {
        self.current = self.current.saturating_add(clamp_amount(amount));
        self.maximum = self.maximum.max(self.current);
        self.current
    }

    /// Subtracts `amount`. The value may go to zero or below.
    pub fn drain(&mut self, amount: u32) -> i32 {
        self.current = self.current.saturating_sub(clamp_amount(amount));
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0
    }
}

fn clamp_amount(amount: u32) -> i32 {
    i32::try_from(amount).unwrap_or(i32::MAX)
}
