//! Recording fakes shared by the runtime integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::time::{Instant, sleep};

use game_core::{AnimationClip, Direction, Dungeon, Position};
use runtime::{
    AckError, Acknowledger, AnimationError, EncounterSpawn, EntityVisual, Event, PickupSpawn,
    Prompt, RenderHandle, RuntimeConfig, Timings, VisualFactory,
};

/// One recorded animation or dialog call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub entity: String,
    pub action: String,
    pub at_ms: u64,
}

/// Shared, time-stamped call log.
#[derive(Clone)]
pub struct Log {
    start: Instant,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Log {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn record(&self, entity: &str, action: &str) {
        let at_ms = self.start.elapsed().as_millis() as u64;
        self.calls.lock().unwrap().push(Call {
            entity: entity.to_string(),
            action: action.to_string(),
            at_ms,
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Actions of `entity`, in order.
    pub fn actions_of(&self, entity: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.entity == entity)
            .map(|c| c.action)
            .collect()
    }

    pub fn count(&self, entity: &str, action: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.entity == entity && c.action == action)
            .count()
    }

    /// Index of the first matching call in the global order.
    pub fn position_of(&self, entity: &str, action: &str) -> Option<usize> {
        self.calls()
            .iter()
            .position(|c| c.entity == entity && c.action == action)
    }

    pub fn first(&self, entity: &str, action: &str) -> Option<Call> {
        self.calls()
            .into_iter()
            .find(|c| c.entity == entity && c.action == action)
    }
}

/// How a visual misbehaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fault {
    pub fail_on: Option<&'static str>,
    pub hang_on: Option<&'static str>,
}

pub struct RecordingVisual {
    name: String,
    handle: RenderHandle,
    log: Log,
    clip: Duration,
    fault: Fault,
    disposed: AtomicBool,
}

impl RecordingVisual {
    pub fn new(name: impl Into<String>, handle: u64, log: Log, fault: Fault) -> Self {
        Self {
            name: name.into(),
            handle: RenderHandle(handle),
            log,
            clip: Duration::from_millis(100),
            fault,
            disposed: AtomicBool::new(false),
        }
    }

    async fn play(&self, action: &'static str, clip: AnimationClip, length: Duration) -> Result<(), AnimationError> {
        self.log.record(&self.name, action);
        if self.fault.hang_on == Some(action) {
            future::pending::<()>().await;
        }
        if self.fault.fail_on == Some(action) {
            return Err(AnimationError::Playback {
                entity: self.name.clone(),
                clip,
                reason: "scripted failure".to_string(),
            });
        }
        sleep(length).await;
        Ok(())
    }
}

#[async_trait]
impl EntityVisual for RecordingVisual {
    fn object(&self) -> RenderHandle {
        self.handle
    }

    fn set_direction(&self, _direction: Direction) {}

    async fn play_attack(&self, _direction: Direction) -> Result<(), AnimationError> {
        self.play("attack", AnimationClip::Attack, self.clip).await
    }

    async fn play_hurt(&self, _direction: Direction) -> Result<(), AnimationError> {
        self.play("hurt", AnimationClip::Hurt, self.clip).await
    }

    async fn play_death(&self, _direction: Direction) -> Result<(), AnimationError> {
        self.play("death", AnimationClip::Death, self.clip).await
    }

    async fn play_blink(&self, duration: Duration) -> Result<(), AnimationError> {
        self.play("blink", AnimationClip::Hurt, duration).await
    }

    async fn play_move(
        &self,
        _to: Position,
        _direction: Direction,
        duration: Duration,
    ) -> Result<(), AnimationError> {
        self.play("move", AnimationClip::Walk, duration).await
    }

    async fn play_collect(&self) -> Result<(), AnimationError> {
        self.play("collect", AnimationClip::Idle, Duration::ZERO).await
    }

    async fn play_blessing(&self) -> Result<(), AnimationError> {
        self.play("blessing", AnimationClip::Idle, self.clip).await
    }

    fn dispose(&self) {
        assert!(
            !self.disposed.swap(true, Ordering::SeqCst),
            "{} disposed twice",
            self.name
        );
        self.log.record(&self.name, "dispose");
    }
}

/// Factory naming visuals `hero`, `npc`, `enemy@(r, c)`, `boss@(r, c)` and
/// `pickup@(r, c)`.
pub struct RecordingFactory {
    log: Log,
    next: AtomicU64,
    pub broken_cells: HashSet<Position>,
    pub hero_fault: Fault,
    pub foe_fault: Fault,
    pub pickup_fault: Fault,
}

impl RecordingFactory {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            next: AtomicU64::new(1),
            broken_cells: HashSet::new(),
            hero_fault: Fault::default(),
            foe_fault: Fault::default(),
            pickup_fault: Fault::default(),
        }
    }

    fn visual(&self, name: String, fault: Fault) -> Arc<dyn EntityVisual> {
        let handle = self.next.fetch_add(1, Ordering::SeqCst);
        self.log.record(&name, "spawn");
        Arc::new(RecordingVisual::new(name, handle, self.log.clone(), fault))
    }

    fn check(&self, position: Position) -> Result<(), AnimationError> {
        if self.broken_cells.contains(&position) {
            return Err(AnimationError::AssetLoad {
                asset: format!("cell {position}"),
                reason: "missing texture".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VisualFactory for RecordingFactory {
    async fn spawn_hero(&self, _at: Position) -> Result<Arc<dyn EntityVisual>, AnimationError> {
        Ok(self.visual("hero".to_string(), self.hero_fault))
    }

    async fn spawn_npc(&self, _at: Position) -> Result<Arc<dyn EntityVisual>, AnimationError> {
        Ok(self.visual("npc".to_string(), Fault::default()))
    }

    async fn spawn_encounter(
        &self,
        spawn: &EncounterSpawn,
    ) -> Result<Arc<dyn EntityVisual>, AnimationError> {
        // stagger loads so completion order differs from grid order
        sleep(Duration::from_millis(u64::from(spawn.subtype) * 10)).await;
        self.check(spawn.position)?;
        let label = if spawn.kind.is_boss() { "boss" } else { "enemy" };
        Ok(self.visual(format!("{label}@{}", spawn.position), self.foe_fault))
    }

    async fn spawn_pickup(
        &self,
        spawn: &PickupSpawn,
    ) -> Result<Arc<dyn EntityVisual>, AnimationError> {
        self.check(spawn.position)?;
        Ok(self.visual(format!("pickup@{}", spawn.position), self.pickup_fault))
    }
}

/// Confirms every prompt immediately and records it in the shared log.
pub struct ScriptedAcknowledger {
    log: Log,
}

impl ScriptedAcknowledger {
    pub fn new(log: Log) -> Self {
        Self { log }
    }
}

#[async_trait]
impl Acknowledger for ScriptedAcknowledger {
    async fn acknowledge(&self, prompt: Prompt) -> Result<(), AckError> {
        self.log.record("dialog", &prompt.to_string());
        Ok(())
    }
}

/// Dungeon walked right, right, down, down; minimum hit points 7.
pub fn scenario_a() -> Dungeon {
    Dungeon::from_parts(
        vec![vec![-2, -3, 3], vec![-5, -10, 1], vec![10, 30, -5]],
        vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)],
        7,
    )
    .expect("valid dungeon")
}

/// Two-by-two dungeon with one threat and a bounty exit; minimum hit points 6.
pub fn single_threat() -> Dungeon {
    Dungeon::from_parts(
        vec![vec![0, -5], vec![3, 0]],
        vec![(0, 0), (0, 1), (1, 1), (1, 0)],
        6,
    )
    .expect("valid dungeon")
}

/// Walks left, then down into a threat, then right to a quiet exit.
pub fn left_then_down() -> Dungeon {
    Dungeon::from_parts(
        vec![vec![0, 0], vec![-1, 0]],
        vec![(0, 1), (0, 0), (1, 0), (1, 1)],
        2,
    )
    .expect("valid dungeon")
}

/// Short dungeon ending on the boss.
pub fn scenario_b() -> Dungeon {
    Dungeon::from_parts(vec![vec![0, 1], vec![0, -4]], vec![(0, 0), (0, 1), (1, 1)], 1)
        .expect("valid dungeon")
}

/// Dungeon whose final room is harmless.
pub fn peaceful() -> Dungeon {
    Dungeon::from_parts(vec![vec![0, 2]], vec![(0, 0), (0, 1)], 1).expect("valid dungeon")
}

pub fn test_config() -> RuntimeConfig {
    RuntimeConfig {
        timings: Timings::default(),
        event_buffer_size: 1024,
        fight_seed: Some(7),
        ..RuntimeConfig::default()
    }
}

/// Everything currently buffered in `rx`.
pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
