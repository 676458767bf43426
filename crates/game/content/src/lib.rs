//! Data-driven content definitions and loaders.
//!
//! This crate houses the on-disk formats for dungeon content and provides
//! loaders for RON/JSON/TOML data files:
//! - Dungeon layouts (grid + path + minimum hp, RON or JSON)
//! - Encounter archetype overrides (RON)
//! - Animation timings (TOML)
//!
//! Content is consumed by the runtime at startup and never mutated.

pub mod formats;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use formats::{DungeonFile, TimingsFile};

#[cfg(feature = "loaders")]
pub use loaders::{ArchetypeLoader, ContentFactory, DungeonLoader, TimingsLoader};
