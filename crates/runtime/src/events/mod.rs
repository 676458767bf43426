//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. Renderers typically follow [`Topic::Encounter`] for
//! the enemy info panel and [`Topic::Hero`] for the status bar.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{DialogEvent, EncounterEvent, HeroEvent, TerminalStage, TraversalEvent};
