//! Client configuration loaded from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use game_content::TimingsFile;
use game_core::GameConfig;
use runtime::{RuntimeConfig, Timings};

/// Bundled content shipped with the `game-content` crate.
const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data");

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `dungeons/`, `timings.toml` and `archetypes.ron`.
    pub data_dir: PathBuf,
    /// Dungeon name looked up under `data_dir/dungeons`.
    pub dungeon: String,
    /// Explicit dungeon file; wins over `dungeon`.
    pub dungeon_file: Option<PathBuf>,
    /// Explicit timings file; wins over `data_dir/timings.toml`.
    pub timings_file: Option<PathBuf>,
    /// Explicit archetype table; wins over `data_dir/archetypes.ron`.
    pub archetypes_file: Option<PathBuf>,
    pub session_id: Option<String>,
    pub fight_seed: Option<u64>,
    pub boss_rounds: Option<u32>,
    pub step_timeout: Option<Duration>,
    /// Confirm dialogs without waiting for input.
    pub auto_ack: bool,
    /// Length of one animation frame.
    pub frame_time: Duration,
    /// Number of consecutive walks before exiting.
    pub walks: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(BUNDLED_DATA_DIR),
            dungeon: "sample".to_string(),
            dungeon_file: None,
            timings_file: None,
            archetypes_file: None,
            session_id: None,
            fight_seed: None,
            boss_rounds: None,
            step_timeout: None,
            auto_ack: false,
            frame_time: Duration::from_millis(80),
            walks: 1,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_DATA_DIR` - Content directory (default: bundled content)
    /// - `DUNGEON_NAME` - Dungeon to load from `dungeons/` (default: sample)
    /// - `DUNGEON_FILE` - Explicit dungeon file (RON or JSON)
    /// - `TIMINGS_FILE` - Explicit timings file (TOML)
    /// - `ARCHETYPES_FILE` - Explicit archetype table (RON)
    /// - `GAME_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `FIGHT_SEED` - Seed for fight round draws (default: entropy)
    /// - `BOSS_ROUNDS` - Boss fight length (default: 5)
    /// - `STEP_TIMEOUT_MS` - Watchdog per walk step (default: timings file)
    /// - `AUTO_ACK` - Confirm dialogs automatically (default: false)
    /// - `FRAME_MS` - Animation frame length (default: 80)
    /// - `WALKS` - Walks to play before exiting (default: 1)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("DUNGEON_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(name) = env::var("DUNGEON_NAME") {
            config.dungeon = name;
        }
        config.dungeon_file = env::var("DUNGEON_FILE").ok().map(PathBuf::from);
        config.timings_file = env::var("TIMINGS_FILE").ok().map(PathBuf::from);
        config.archetypes_file = env::var("ARCHETYPES_FILE").ok().map(PathBuf::from);
        config.session_id = env::var("GAME_SESSION_ID").ok();
        config.fight_seed = read_env::<u64>("FIGHT_SEED");
        config.boss_rounds = read_env::<u32>("BOSS_ROUNDS");
        config.step_timeout = read_env::<u64>("STEP_TIMEOUT_MS").map(Duration::from_millis);

        if let Some(enable) = read_env::<bool>("AUTO_ACK") {
            config.auto_ack = enable;
        } else if env::var("AUTO_ACK").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.auto_ack = true;
        }

        if let Some(ms) = read_env::<u64>("FRAME_MS") {
            config.frame_time = Duration::from_millis(ms);
        }
        if let Some(walks) = read_env::<u32>("WALKS") {
            config.walks = walks.max(1);
        }

        config
    }

    /// Runtime configuration with `timings` loaded from content.
    pub fn runtime_config(&self, timings: TimingsFile) -> RuntimeConfig {
        let mut timings = Timings::from(timings);
        if self.step_timeout.is_some() {
            timings.step_timeout = self.step_timeout;
        }

        RuntimeConfig {
            game_config: self
                .boss_rounds
                .map(GameConfig::with_boss_rounds)
                .unwrap_or_default(),
            timings,
            fight_seed: self.fight_seed,
            ..RuntimeConfig::default()
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
