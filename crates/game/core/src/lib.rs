//! Deterministic dungeon data and rules shared across crates.
//!
//! `game-core` defines the static dungeon (grid, path, starting resources),
//! the pure assignment functions that derive per-room content from grid
//! coordinates, the content catalogs and the hero's logical state. Nothing in
//! here performs I/O or awaits; the async orchestration lives in `runtime`.
pub mod archetype;
pub mod assign;
pub mod catalog;
pub mod config;
pub mod dungeon;
pub mod error;
pub mod grid;
pub mod hero;

pub use archetype::{AnimationClip, Archetype, ArchetypeTable, FrameCounts};
pub use assign::{Salt, assign, enemy_kind_at, pickup_at, subtype_at, theme_at};
pub use catalog::{EncounterRole, EnemyKind, ItemKind, RoomTheme};
pub use config::GameConfig;
pub use dungeon::{Dungeon, DungeonPath, Grid, RoomKind, TerminalLayout};
pub use error::DungeonError;
pub use grid::{Direction, Position, ResourceMeter};
pub use hero::HeroState;
