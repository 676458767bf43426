//! Content loaders for reading game data from files.
//!
//! This module provides loaders that convert RON/JSON/TOML files into
//! `game-core` types. All loaders use the formats defined in [`crate::formats`].

pub mod archetypes;
pub mod dungeon;
pub mod factory;
pub mod timings;

pub use archetypes::ArchetypeLoader;
pub use dungeon::DungeonLoader;
pub use factory::ContentFactory;
pub use timings::TimingsLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
