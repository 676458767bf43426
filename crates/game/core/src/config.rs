/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Number of rounds the boss fight lasts. Ordinary fights draw their own.
    pub boss_rounds: u32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Number of visual variants per encounter kind (subtypes are `1..=SUBTYPE_COUNT`).
    pub const SUBTYPE_COUNT: u8 = 3;
    /// Cells the hero walks past the final path cell before the terminal scene.
    pub const TERMINAL_APPROACH_CELLS: i32 = 2;
    /// Upper bound on ordinary fight rounds.
    pub const MAX_ORDINARY_ROUNDS: u32 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BOSS_ROUNDS: u32 = 5;

    pub fn new() -> Self {
        Self {
            boss_rounds: Self::DEFAULT_BOSS_ROUNDS,
        }
    }

    pub fn with_boss_rounds(boss_rounds: u32) -> Self {
        Self {
            boss_rounds: boss_rounds.max(1),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
