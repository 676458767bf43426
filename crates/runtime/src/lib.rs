//! Async orchestration of a walk through the dungeon.
//!
//! This crate sequences everything that takes time: loading visuals, walking
//! from room to room, fights and the closing scene. Consumers embed
//! [`Runtime`], plug in a [`VisualFactory`] and an [`Acknowledger`], and drive
//! walks through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`registry`] tracks encounters and pickups by position
//! - [`fight`] resolves round-based fights
//! - [`session`] holds per-dungeon state; walks live in `traversal` and the
//!   closing scene in `terminal`
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod fight;
pub mod registry;
pub mod runtime;
pub mod session;

mod terminal;
mod traversal;
mod workers;

pub use api::{
    AckError, Acknowledger, AnimationError, AutoAcknowledger, EncounterSpawn, EntityVisual,
    PickupSpawn, Prompt, RenderHandle, Result, RuntimeError, RuntimeHandle, VisualFactory,
};
pub use events::{
    DialogEvent, EncounterEvent, Event, EventBus, HeroEvent, TerminalStage, Topic, TraversalEvent,
};
pub use fight::{
    FightEngine, FightOutcome, FightPhase, FightRequest, FightSession, FirstHitHook, RoundPolicy,
};
pub use registry::{EncounterEntity, EncounterRegistry, PickupEntity, PopulateReport};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, Timings};
pub use session::{Session, SessionSnapshot, WalkOutcome};
