//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate:
//! errors, the command handle, and the renderer and dialog contracts clients
//! implement.

pub mod errors;
pub mod handle;
pub mod prompts;
pub mod visuals;

pub use errors::{AckError, AnimationError, Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use prompts::{Acknowledger, AutoAcknowledger, Prompt};
pub use visuals::{EncounterSpawn, EntityVisual, PickupSpawn, RenderHandle, VisualFactory};
