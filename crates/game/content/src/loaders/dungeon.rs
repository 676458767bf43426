//! Dungeon layout loader.
//!
//! Accepts RON (default) or JSON, chosen by file extension, and validates the
//! result into a [`Dungeon`].

use std::path::Path;

use game_core::Dungeon;

use crate::formats::DungeonFile;
use crate::loaders::{LoadResult, read_file};

/// Loader for dungeon files.
pub struct DungeonLoader;

impl DungeonLoader {
    /// Load a dungeon from a `.ron` or `.json` file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the dungeon file
    ///
    /// # Returns
    ///
    /// Returns the validated dungeon, or an error naming the file when it
    /// cannot be read, parsed or validated.
    pub fn load(path: &Path) -> LoadResult<Dungeon> {
        let content = read_file(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse_ron(&content)
        };
        parsed.map_err(|e| anyhow::anyhow!("Invalid dungeon {}: {}", path.display(), e))
    }

    pub fn parse_ron(content: &str) -> LoadResult<Dungeon> {
        let file: DungeonFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse dungeon RON: {}", e))?;
        Ok(file.into_dungeon()?)
    }

    pub fn parse_json(content: &str) -> LoadResult<Dungeon> {
        let file: DungeonFile = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse dungeon JSON: {}", e))?;
        Ok(file.into_dungeon()?)
    }
}
