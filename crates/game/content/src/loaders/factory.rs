//! Content factory for loading everything from one data directory.

use std::path::{Path, PathBuf};

use game_core::{ArchetypeTable, Dungeon};

use crate::formats::TimingsFile;
use crate::loaders::{ArchetypeLoader, DungeonLoader, LoadResult, TimingsLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── timings.toml      (optional)
/// ├── archetypes.ron    (optional)
/// └── dungeons/
///     ├── sample.ron
///     └── gentle.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load a dungeon by name from `dungeons/`, trying `.ron` then `.json`.
    pub fn load_dungeon(&self, name: &str) -> LoadResult<Dungeon> {
        let dir = self.data_dir.join("dungeons");
        let ron = dir.join(format!("{}.ron", name));
        if ron.exists() {
            return DungeonLoader::load(&ron);
        }
        DungeonLoader::load(&dir.join(format!("{}.json", name)))
    }

    /// Load `timings.toml`, falling back to defaults when absent.
    pub fn load_timings(&self) -> LoadResult<TimingsFile> {
        let path = self.data_dir.join("timings.toml");
        if !path.exists() {
            return Ok(TimingsFile::default());
        }
        TimingsLoader::load(&path)
    }

    /// Load `archetypes.ron` over the built-in table, or the built-in table alone.
    pub fn load_archetypes(&self) -> LoadResult<ArchetypeTable> {
        let path = self.data_dir.join("archetypes.ron");
        if !path.exists() {
            return Ok(ArchetypeTable::builtin());
        }
        ArchetypeLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
