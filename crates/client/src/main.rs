//! Dungeon client binary.
//!
//! Composition root: loads content, builds the runtime with headless visuals
//! and a prompt source, then plays the configured number of walks.
//!
//! # Examples
//!
//! ```bash
//! # Interactive: press enter at each dialog
//! cargo run -p dungeon-client
//!
//! # Unattended, reproducible fights
//! AUTO_ACK=1 FIGHT_SEED=7 cargo run -p dungeon-client
//! ```

use anyhow::{Context, Result};

use dungeon_client::{ClientConfig, HeadlessVisuals, Narrator, PromptSource, logging};
use game_content::{ArchetypeLoader, ContentFactory, DungeonLoader, TimingsLoader};
use runtime::Runtime;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(&config.session_id)?;

    tracing::info!("Starting Dungeon client");
    tracing::info!("Data directory: {}", config.data_dir.display());

    let content = ContentFactory::new(&config.data_dir);
    let dungeon = match &config.dungeon_file {
        Some(path) => DungeonLoader::load(path)
            .with_context(|| format!("Failed to load dungeon {}", path.display()))?,
        None => content.load_dungeon(&config.dungeon)?,
    };
    let timings = match &config.timings_file {
        Some(path) => TimingsLoader::load(path)
            .with_context(|| format!("Failed to load timings {}", path.display()))?,
        None => content.load_timings()?,
    };
    let archetypes = match &config.archetypes_file {
        Some(path) => ArchetypeLoader::load(path)
            .with_context(|| format!("Failed to load archetypes {}", path.display()))?,
        None => content.load_archetypes()?,
    };

    tracing::info!(
        rows = dungeon.grid().rows(),
        cols = dungeon.grid().cols(),
        steps = dungeon.path().len(),
        minimum_hp = dungeon.minimum_hp(),
        "Dungeon loaded"
    );

    let runtime = Runtime::builder()
        .config(config.runtime_config(timings))
        .dungeon(dungeon)
        .archetypes(archetypes)
        .visual_factory(HeadlessVisuals::new(config.frame_time))
        .acknowledger(PromptSource::new(config.auto_ack))
        .build()
        .await?;
    let handle = runtime.handle();
    let narrator = Narrator::spawn(&handle, config.auto_ack);

    let report = handle.populate().await?;
    if report.failed > 0 {
        tracing::warn!(failed = report.failed, "Some rooms are missing their occupants");
    }

    for walk in 1..=config.walks {
        println!("-- walk {walk} of {} --", config.walks);
        match handle.walk_path_and_wait().await {
            Ok(outcome) => println!(
                "reunited with {} hp{}",
                outcome.hero.hp.current,
                if outcome.boss_fought { " after slaying the dragon" } else { "" }
            ),
            Err(e) => {
                tracing::error!("Walk failed: {}", e);
                println!("walk failed: {e}");
            }
        }
    }

    narrator.stop();
    drop(handle);
    runtime.shutdown().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
