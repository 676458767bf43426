use game_core::{Dungeon, DungeonError};

/// Raw dungeon file: room grid, walking path and starting hit points.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonFile {
    pub grid: Vec<Vec<i32>>,
    /// `(row, col)` pairs, entrance first.
    pub path: Vec<(i32, i32)>,
    pub minimum_hp: i32,
}

impl DungeonFile {
    /// Validates the raw data into a [`Dungeon`].
    pub fn into_dungeon(self) -> Result<Dungeon, DungeonError> {
        Dungeon::from_parts(self.grid, self.path, self.minimum_hp)
    }
}
