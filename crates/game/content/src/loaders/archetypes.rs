//! Encounter archetype loader.

use std::path::Path;

use game_core::{Archetype, ArchetypeTable};

use crate::loaders::{LoadResult, read_file};

/// Loader for archetype override lists.
///
/// The file holds a RON list of [`Archetype`] rows. Rows replace the matching
/// `(kind, subtype)` entries of [`ArchetypeTable::builtin`]; anything the file
/// does not mention keeps its stock values.
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    /// Load overrides and merge them over the built-in table.
    pub fn load(path: &Path) -> LoadResult<ArchetypeTable> {
        let content = read_file(path)?;
        let overrides = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid archetypes {}: {}", path.display(), e))?;

        let mut table = ArchetypeTable::builtin();
        table.merge(overrides);
        Ok(table)
    }

    /// Parse override rows without merging.
    pub fn parse(content: &str) -> LoadResult<ArchetypeTable> {
        let rows: Vec<Archetype> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse archetype RON: {}", e))?;

        let mut table = ArchetypeTable::new();
        for row in rows {
            if !(1..=game_core::GameConfig::SUBTYPE_COUNT).contains(&row.subtype) {
                anyhow::bail!("{} subtype {} is out of range", row.kind, row.subtype);
            }
            table.insert(row);
        }
        Ok(table)
    }
}
