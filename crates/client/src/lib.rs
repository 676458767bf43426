//! Headless terminal client for the dungeon runtime.
//!
//! # Architecture
//!
//! ```text
//! main (composition root)
//!   ├─→ ClientConfig      (environment)
//!   ├─→ game-content      (dungeon, timings, archetypes from disk)
//!   ├─→ HeadlessVisuals   (VisualFactory: clips become timed log lines)
//!   ├─→ PromptSource      (Acknowledger: stdin or automatic)
//!   └─→ runtime::Runtime  (walks, fights, closing scene)
//! ```
//!
//! There is no renderer: every animation is a `tracing` event followed by a
//! sleep as long as the clip would play, so the pacing matches a real frontend.

pub mod config;
pub mod logging;
pub mod narrator;
pub mod prompt;
pub mod visuals;

pub use config::ClientConfig;
pub use narrator::Narrator;
pub use prompt::{ConsoleAcknowledger, PromptSource};
pub use visuals::{HeadlessVisual, HeadlessVisuals};
