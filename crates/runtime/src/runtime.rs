//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive walks through a dungeon.
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_content::TimingsFile;
use game_core::{ArchetypeTable, Dungeon, GameConfig};

use crate::api::{Acknowledger, Result, RuntimeError, RuntimeHandle, VisualFactory};
use crate::events::{Event, EventBus, Topic};
use crate::session::Session;
use crate::workers::SessionWorker;

/// Animation pacing used by the fight engine and the traversal orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Walk animation between adjacent cells.
    pub step: Duration,
    /// Dwell time in an empty room.
    pub corridor_pause: Duration,
    /// Delay between an attack starting and the target's hurt clip.
    pub hurt_delay: Duration,
    /// Length of the damage blink cue.
    pub blink: Duration,
    /// Pause between the two strikes of a round.
    pub inter_step_pause: Duration,
    /// Pause between rounds.
    pub inter_round_pause: Duration,
    /// Watchdog for a single step of the walk. `None` disables it.
    pub step_timeout: Option<Duration>,
}

impl From<TimingsFile> for Timings {
    fn from(file: TimingsFile) -> Self {
        Self {
            step: Duration::from_millis(file.step_ms),
            corridor_pause: Duration::from_millis(file.corridor_pause_ms),
            hurt_delay: Duration::from_millis(file.hurt_delay_ms),
            blink: Duration::from_millis(file.blink_ms),
            inter_step_pause: Duration::from_millis(file.inter_step_pause_ms),
            inter_round_pause: Duration::from_millis(file.inter_round_pause_ms),
            step_timeout: file.step_timeout_ms.map(Duration::from_millis),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        TimingsFile::default().into()
    }
}

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub timings: Timings,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for fight round draws. `None` draws from entropy.
    pub fight_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            timings: Timings::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            fight_seed: None,
        }
    }
}

/// Main runtime that drives walks through a dungeon
///
/// Design: Runtime owns the session worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from one topic
    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to finish queued commands. Clones of the handle
    /// held elsewhere keep the worker alive until they are dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    dungeon: Option<Dungeon>,
    archetypes: Option<ArchetypeTable>,
    visuals: Option<Arc<dyn VisualFactory>>,
    acknowledger: Option<Arc<dyn Acknowledger>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            dungeon: None,
            archetypes: None,
            visuals: None,
            acknowledger: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the dungeon to walk (required)
    pub fn dungeon(mut self, dungeon: Dungeon) -> Self {
        self.dungeon = Some(dungeon);
        self
    }

    /// Override encounter archetypes. Defaults to [`ArchetypeTable::builtin`].
    pub fn archetypes(mut self, archetypes: ArchetypeTable) -> Self {
        self.archetypes = Some(archetypes);
        self
    }

    /// Set the renderer adapter (required)
    pub fn visual_factory(mut self, factory: impl VisualFactory + 'static) -> Self {
        self.visuals = Some(Arc::new(factory));
        self
    }

    /// Set the dialog confirmation source (required)
    pub fn acknowledger(mut self, acknowledger: impl Acknowledger + 'static) -> Self {
        self.acknowledger = Some(Arc::new(acknowledger));
        self
    }

    /// Build the runtime and spawn the session worker.
    ///
    /// The registry is not populated yet; call
    /// [`RuntimeHandle::populate`] or start a walk, which populates on demand.
    pub async fn build(self) -> Result<Runtime> {
        let dungeon = self.dungeon.ok_or(RuntimeError::MissingDungeon)?;
        let visuals = self.visuals.ok_or(RuntimeError::MissingVisualFactory)?;
        let acknowledger = self.acknowledger.ok_or(RuntimeError::MissingAcknowledger)?;
        let archetypes = self.archetypes.unwrap_or_else(ArchetypeTable::builtin);

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size.max(1));

        let session = Session::new(
            Arc::new(dungeon),
            Arc::new(archetypes),
            self.config,
            visuals,
            acknowledger,
            event_bus.clone(),
        );
        let worker = SessionWorker::new(session, command_rx);
        let worker_handle = tokio::spawn(worker.run());

        Ok(Runtime {
            handle: RuntimeHandle::new(command_tx, event_bus),
            worker_handle,
        })
    }
}
