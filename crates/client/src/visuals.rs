//! Headless renderer adapter.
//!
//! Each visual turns its clips into `tracing` events and sleeps for as long
//! as the clip would play (`frames * frame_time`).
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, info};

use game_core::{AnimationClip, Direction, FrameCounts, Position};
use runtime::{
    AnimationError, EncounterSpawn, EntityVisual, PickupSpawn, RenderHandle, VisualFactory,
};

const HERO_FRAMES: FrameCounts = FrameCounts {
    idle: 4,
    walk: 6,
    attack: 6,
    hurt: 3,
    death: 8,
};

const NPC_FRAMES: FrameCounts = FrameCounts {
    idle: 4,
    walk: 6,
    attack: 1,
    hurt: 3,
    death: 1,
};

const PICKUP_FRAMES: FrameCounts = FrameCounts {
    idle: 4,
    walk: 1,
    attack: 1,
    hurt: 1,
    death: 3,
};

pub struct HeadlessVisual {
    label: String,
    handle: RenderHandle,
    frames: FrameCounts,
    frame_time: Duration,
    direction: Mutex<Direction>,
    disposed: AtomicBool,
}

impl HeadlessVisual {
    pub fn new(
        label: impl Into<String>,
        handle: RenderHandle,
        frames: FrameCounts,
        frame_time: Duration,
    ) -> Self {
        Self {
            label: label.into(),
            handle,
            frames,
            frame_time,
            direction: Mutex::new(Direction::Right),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// How long `clip` plays.
    pub fn clip_length(&self, clip: AnimationClip) -> Duration {
        self.frame_time * u32::from(self.frames.get(clip))
    }

    fn facing(&self) -> Direction {
        *self
            .direction
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    async fn play(&self, clip: AnimationClip, direction: Direction) -> Result<(), AnimationError> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(AnimationError::Disposed {
                entity: self.label.clone(),
            });
        }

        info!(
            target: "dungeon::render",
            entity = %self.label,
            %clip,
            row = direction.row_hint(),
            "play"
        );
        sleep(self.clip_length(clip)).await;
        Ok(())
    }
}

#[async_trait]
impl EntityVisual for HeadlessVisual {
    fn object(&self) -> RenderHandle {
        self.handle
    }

    fn set_direction(&self, direction: Direction) {
        *self
            .direction
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = direction;
    }

    async fn play_attack(&self, direction: Direction) -> Result<(), AnimationError> {
        self.play(AnimationClip::Attack, direction).await
    }

    async fn play_hurt(&self, direction: Direction) -> Result<(), AnimationError> {
        self.play(AnimationClip::Hurt, direction).await
    }

    async fn play_death(&self, direction: Direction) -> Result<(), AnimationError> {
        self.play(AnimationClip::Death, direction).await
    }

    async fn play_move(
        &self,
        to: Position,
        direction: Direction,
        duration: Duration,
    ) -> Result<(), AnimationError> {
        debug!(
            target: "dungeon::render",
            entity = %self.label,
            %to,
            %direction,
            "walk"
        );
        // the walk cycle loops for the whole move
        sleep(duration).await;
        Ok(())
    }

    async fn play_collect(&self) -> Result<(), AnimationError> {
        self.play(AnimationClip::Death, self.facing()).await
    }

    async fn play_blessing(&self) -> Result<(), AnimationError> {
        self.play(AnimationClip::Idle, self.facing()).await
    }

    fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            debug!(target: "dungeon::render", entity = %self.label, "disposed");
        }
    }
}

/// [`VisualFactory`] producing [`HeadlessVisual`]s.
pub struct HeadlessVisuals {
    frame_time: Duration,
    next_handle: AtomicU64,
}

impl HeadlessVisuals {
    pub fn new(frame_time: Duration) -> Self {
        Self {
            frame_time,
            next_handle: AtomicU64::new(1),
        }
    }

    fn create(&self, label: String, frames: FrameCounts) -> Arc<dyn EntityVisual> {
        let handle = RenderHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        Arc::new(HeadlessVisual::new(label, handle, frames, self.frame_time))
    }
}

#[async_trait]
impl VisualFactory for HeadlessVisuals {
    async fn spawn_hero(&self, at: Position) -> Result<Arc<dyn EntityVisual>, AnimationError> {
        debug!(target: "dungeon::render", %at, "hero created");
        Ok(self.create("hero".to_string(), HERO_FRAMES))
    }

    async fn spawn_npc(&self, at: Position) -> Result<Arc<dyn EntityVisual>, AnimationError> {
        debug!(target: "dungeon::render", %at, "npc created");
        Ok(self.create("npc".to_string(), NPC_FRAMES))
    }

    async fn spawn_encounter(
        &self,
        spawn: &EncounterSpawn,
    ) -> Result<Arc<dyn EntityVisual>, AnimationError> {
        debug!(
            target: "dungeon::render",
            at = %spawn.stand_at,
            kind = %spawn.kind,
            subtype = spawn.subtype,
            theme = %spawn.theme,
            asset = %spawn.archetype.asset_path(AnimationClip::Idle),
            size = spawn.archetype.size,
            "encounter created"
        );
        let label = format!("{} {}", spawn.kind, spawn.position);
        Ok(self.create(label, spawn.archetype.frames))
    }

    async fn spawn_pickup(
        &self,
        spawn: &PickupSpawn,
    ) -> Result<Arc<dyn EntityVisual>, AnimationError> {
        let label = format!("{} {}", spawn.item, spawn.position);
        Ok(self.create(label, PICKUP_FRAMES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{ArchetypeTable, EncounterRole, EnemyKind, RoomTheme};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn clips_last_frames_times_frame_time() {
        let visual = HeadlessVisual::new(
            "hero",
            RenderHandle(1),
            HERO_FRAMES,
            Duration::from_millis(50),
        );

        let start = Instant::now();
        visual.play_attack(Direction::Left).await.expect("attack");
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn disposed_visual_refuses_to_play() {
        let visual = HeadlessVisual::new("npc", RenderHandle(2), NPC_FRAMES, Duration::ZERO);
        visual.dispose();
        visual.dispose();

        let err = visual.play_hurt(Direction::Right).await.unwrap_err();
        assert!(matches!(err, AnimationError::Disposed { .. }));
    }

    #[tokio::test]
    async fn factory_uses_archetype_frames_and_unique_handles() {
        let factory = HeadlessVisuals::new(Duration::from_millis(10));
        let table = ArchetypeTable::builtin();
        let spawn = EncounterSpawn {
            position: Position::new(1, 1),
            stand_at: Position::new(1, 1),
            kind: EnemyKind::Lich,
            subtype: 2,
            role: EncounterRole::Enemy,
            theme: RoomTheme::Crypt,
            archetype: table.get(EnemyKind::Lich, 2).cloned().expect("builtin row"),
        };

        let lich = factory.spawn_encounter(&spawn).await.expect("encounter");
        let hero = factory.spawn_hero(Position::ORIGIN).await.expect("hero");

        assert_ne!(lich.object(), hero.object());
    }
}
