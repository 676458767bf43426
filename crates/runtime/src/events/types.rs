//! Event types for different topics.

use serde::{Deserialize, Serialize};

use game_core::{
    Direction, EncounterRole, EnemyKind, ItemKind, Position, ResourceMeter, RoomKind, RoomTheme,
};

use crate::api::Prompt;
use crate::fight::FightOutcome;

/// Changes to the hero's logical state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HeroEvent {
    /// The hero finished walking onto `to`.
    Moved {
        from: Position,
        to: Position,
        direction: Direction,
    },

    HpChanged {
        previous: i32,
        hp: ResourceMeter,
    },

    ItemChanged {
        previous: Option<ItemKind>,
        current: ItemKind,
    },

    /// Hit points dropped to zero or below. The walk carries on.
    Exhausted { position: Position },
}

/// Encounter lifecycle and fight progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncounterEvent {
    EnemyShown {
        position: Position,
        kind: EnemyKind,
        subtype: u8,
        role: EncounterRole,
    },

    EnemyHidden {
        position: Position,
        kind: EnemyKind,
    },

    PickupShown {
        position: Position,
        item: ItemKind,
    },

    PickupCollected {
        position: Position,
        item: ItemKind,
    },

    FightStarted {
        position: Position,
        kind: EnemyKind,
        role: EncounterRole,
        rounds: u32,
        /// Sprite row the hero fights in.
        facing: Direction,
    },

    RoundCompleted {
        position: Position,
        round: u32,
        rounds: u32,
    },

    FightFinished {
        position: Position,
        outcome: FightOutcome,
    },
}

/// Stage of the closing scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalStage {
    Approach,
    Blessing,
    BossFight,
    Reunion,
}

/// Progress of a walk through the dungeon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TraversalEvent {
    Populated {
        encounters: usize,
        pickups: usize,
        failed: usize,
    },

    Started { steps: usize },

    RoomEntered {
        position: Position,
        room: RoomKind,
        theme: RoomTheme,
    },

    Terminal(TerminalStage),

    Completed { boss_fought: bool },

    /// No progress within the watchdog window.
    Stalled { position: Position },

    /// A renderer or dialog failure ended the walk.
    Aborted { position: Position, reason: String },

    /// Session state was rebuilt from the dungeon.
    Reset,
}

/// Blocking dialog traffic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DialogEvent {
    Shown { prompt: Prompt, text: String },
    Acknowledged { prompt: Prompt },
}
