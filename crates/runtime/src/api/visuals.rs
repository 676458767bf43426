//! Renderer-facing contracts.
//!
//! The runtime never draws anything itself. It drives [`EntityVisual`]s that
//! a client creates through its [`VisualFactory`] and awaits their
//! animations to sequence the scene. Each future resolves once its clip (or
//! cue) has finished playing.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use game_core::{
    Archetype, Direction, EncounterRole, EnemyKind, ItemKind, Position, RoomTheme,
};

use super::errors::AnimationError;

/// Opaque identifier of a renderer-side object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u64);

/// Animated entity backed by a renderer object.
///
/// Implementations must be cheap to share: the runtime holds them behind
/// `Arc` and may await two clips of the same entity concurrently (for
/// example a hurt clip and a blink cue).
#[async_trait]
pub trait EntityVisual: Send + Sync {
    /// Underlying renderer object.
    fn object(&self) -> RenderHandle;

    /// Turns the sprite without animating.
    fn set_direction(&self, direction: Direction);

    async fn play_attack(&self, direction: Direction) -> Result<(), AnimationError>;

    async fn play_hurt(&self, direction: Direction) -> Result<(), AnimationError>;

    async fn play_death(&self, direction: Direction) -> Result<(), AnimationError>;

    /// Damage cue overlaid on the hurt clip.
    async fn play_blink(&self, duration: Duration) -> Result<(), AnimationError> {
        tokio::time::sleep(duration).await;
        Ok(())
    }

    /// Walks to the adjacent cell `to` over `duration`.
    async fn play_move(
        &self,
        to: Position,
        direction: Direction,
        duration: Duration,
    ) -> Result<(), AnimationError> {
        let _ = (to, direction);
        tokio::time::sleep(duration).await;
        Ok(())
    }

    /// Pickup vanishing as the hero takes it.
    async fn play_collect(&self) -> Result<(), AnimationError> {
        Ok(())
    }

    /// Buff granted by the rescued NPC.
    async fn play_blessing(&self) -> Result<(), AnimationError> {
        Ok(())
    }

    /// Removes the renderer object. Called at most once per visual.
    fn dispose(&self);
}

/// Everything a renderer needs to draw one encounter.
#[derive(Clone, Debug)]
pub struct EncounterSpawn {
    /// Logical cell the encounter is registered under.
    pub position: Position,
    /// Cell the sprite is drawn at. Differs from `position` only for the boss.
    pub stand_at: Position,
    pub kind: EnemyKind,
    pub subtype: u8,
    pub role: EncounterRole,
    pub theme: RoomTheme,
    pub archetype: Archetype,
}

#[derive(Clone, Debug)]
pub struct PickupSpawn {
    pub position: Position,
    pub item: ItemKind,
    pub theme: RoomTheme,
}

/// Creates renderer objects for the runtime.
///
/// Creation is asynchronous because implementations usually load textures.
/// A failed encounter or pickup is skipped by the registry; a failed hero or
/// NPC aborts population.
#[async_trait]
pub trait VisualFactory: Send + Sync {
    async fn spawn_hero(&self, at: Position) -> Result<Arc<dyn EntityVisual>, AnimationError>;

    async fn spawn_npc(&self, at: Position) -> Result<Arc<dyn EntityVisual>, AnimationError>;

    async fn spawn_encounter(
        &self,
        spawn: &EncounterSpawn,
    ) -> Result<Arc<dyn EntityVisual>, AnimationError>;

    async fn spawn_pickup(
        &self,
        spawn: &PickupSpawn,
    ) -> Result<Arc<dyn EntityVisual>, AnimationError>;
}
