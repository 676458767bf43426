//! On-disk data formats.
//!
//! These mirror the files under `data/` one to one. They are plain serde
//! structs; validation happens when they are converted into `game-core` types.

mod dungeon;
mod timings;

pub use dungeon::DungeonFile;
pub use timings::TimingsFile;
