//! Blocking dialog prompts.
//!
//! The closing scene pauses on a handful of messages until the player
//! acknowledges them. [`Acknowledger`] abstracts where that confirmation
//! comes from (keyboard, UI button, test script).
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::AckError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prompt {
    /// The boss appears and threatens the NPC.
    Threat,
    /// The boss reacts to the NPC's blessing.
    Anger,
    /// The boss has fallen.
    Victory,
    /// Hero and NPC are reunited; acknowledging restarts the dungeon.
    Reunion,
    /// The walk stalled and will restart.
    Restart,
}

impl Prompt {
    pub const fn text(self) -> &'static str {
        match self {
            Prompt::Threat => "A dragon blocks the way. \"She stays with me, little hero.\"",
            Prompt::Anger => "\"A blessing? That will not save you!\"",
            Prompt::Victory => "The dragon collapses with a final roar.",
            Prompt::Reunion => "Reunited at last. Press enter to explore again.",
            Prompt::Restart => "Something went wrong on the way. Press enter to start over.",
        }
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Prompt::Threat => "threat",
            Prompt::Anger => "anger",
            Prompt::Victory => "victory",
            Prompt::Reunion => "reunion",
            Prompt::Restart => "restart",
        };
        write!(f, "{}", label)
    }
}

/// Source of dialog confirmations.
#[async_trait]
pub trait Acknowledger: Send + Sync {
    /// Shows `prompt` and resolves once the player confirms it.
    async fn acknowledge(&self, prompt: Prompt) -> Result<(), AckError>;
}

/// Confirms every prompt immediately.
///
/// Useful for headless runs and tests where nobody is watching.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoAcknowledger;

#[async_trait]
impl Acknowledger for AutoAcknowledger {
    async fn acknowledge(&self, prompt: Prompt) -> Result<(), AckError> {
        tracing::debug!(target: "runtime::dialog", %prompt, "auto-acknowledged");
        Ok(())
    }
}
