//! Position-keyed registry of encounters and pickups.
//!
//! [`EncounterRegistry::populate`] derives every occupant from the dungeon
//! grid through the deterministic assignment functions and asks the
//! [`VisualFactory`] for their visuals concurrently. Afterwards the registry
//! is the single source of truth for who lives where; the fight engine and
//! the traversal orchestrator only ever look entities up by position.
//!
//! Internal maps sit behind short-lived `std::sync::Mutex` guards that are
//! never held across an `.await`.
mod entity;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use game_core::{
    ArchetypeTable, Direction, Dungeon, EncounterRole, EnemyKind, ItemKind, Position, RoomKind,
    enemy_kind_at, pickup_at, subtype_at, theme_at,
};

pub use entity::{EncounterEntity, PickupEntity};

use crate::api::{AnimationError, EncounterSpawn, EntityVisual, PickupSpawn, VisualFactory};
use crate::events::{EncounterEvent, EventBus, TraversalEvent};

/// Summary of one [`EncounterRegistry::populate`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateReport {
    pub encounters: usize,
    pub pickups: usize,
    /// Cells already registered by an earlier call.
    pub duplicates: usize,
    /// Cells whose visual could not be created.
    pub failed: usize,
}

enum Spawned {
    Encounter(EncounterSpawn, Result<Arc<dyn EntityVisual>, AnimationError>),
    Pickup(PickupSpawn, Result<Arc<dyn EntityVisual>, AnimationError>),
}

pub struct EncounterRegistry {
    factory: Arc<dyn VisualFactory>,
    archetypes: Arc<ArchetypeTable>,
    event_bus: EventBus,
    encounters: Mutex<HashMap<Position, EncounterEntity>>,
    pickups: Mutex<HashMap<Position, PickupEntity>>,
    ready: AtomicBool,
}

impl EncounterRegistry {
    pub fn new(
        factory: Arc<dyn VisualFactory>,
        archetypes: Arc<ArchetypeTable>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            factory,
            archetypes,
            event_bus,
            encounters: Mutex::new(HashMap::new()),
            pickups: Mutex::new(HashMap::new()),
            ready: AtomicBool::new(false),
        }
    }

    /// Creates one entity per non-corridor cell.
    ///
    /// Visuals load concurrently. A cell that fails to load is logged and
    /// skipped; cells registered by an earlier call are left untouched, so
    /// calling this twice never duplicates an entity.
    pub async fn populate(&self, dungeon: &Dungeon) -> PopulateReport {
        let mut report = PopulateReport::default();
        let mut tasks = JoinSet::new();
        let stand_boss_at = dungeon.terminal_layout().boss;

        for (position, value) in dungeon.grid().cells() {
            match RoomKind::from_value(value) {
                RoomKind::Corridor => {}
                RoomKind::Threat(_) => {
                    if self.has_encounter(position) {
                        warn!(
                            target: "runtime::registry",
                            %position,
                            "encounter already registered; skipping"
                        );
                        report.duplicates += 1;
                        continue;
                    }

                    let (kind, role, stand_at) = if dungeon.is_exit(position) {
                        (EnemyKind::BOSS, EncounterRole::Boss, stand_boss_at)
                    } else {
                        (enemy_kind_at(position, value), EncounterRole::Enemy, position)
                    };
                    let subtype = subtype_at(position, value);
                    let Some(archetype) = self.archetypes.get(kind, subtype).cloned() else {
                        warn!(
                            target: "runtime::registry",
                            %position,
                            %kind,
                            subtype,
                            "no archetype for encounter; skipping"
                        );
                        report.failed += 1;
                        continue;
                    };

                    let spawn = EncounterSpawn {
                        position,
                        stand_at,
                        kind,
                        subtype,
                        role,
                        theme: theme_at(position, value),
                        archetype,
                    };
                    let factory = Arc::clone(&self.factory);
                    tasks.spawn(async move {
                        let result = factory.spawn_encounter(&spawn).await;
                        Spawned::Encounter(spawn, result)
                    });
                }
                RoomKind::Bounty(_) => {
                    if self.has_pickup(position) {
                        warn!(
                            target: "runtime::registry",
                            %position,
                            "pickup already registered; skipping"
                        );
                        report.duplicates += 1;
                        continue;
                    }

                    let spawn = PickupSpawn {
                        position,
                        item: pickup_at(position, value),
                        theme: theme_at(position, value),
                    };
                    let factory = Arc::clone(&self.factory);
                    tasks.spawn(async move {
                        let result = factory.spawn_pickup(&spawn).await;
                        Spawned::Pickup(spawn, result)
                    });
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Spawned::Encounter(spawn, Ok(visual))) => {
                    if self.insert_encounter(spawn, visual) {
                        report.encounters += 1;
                    } else {
                        report.duplicates += 1;
                    }
                }
                Ok(Spawned::Pickup(spawn, Ok(visual))) => {
                    if self.insert_pickup(spawn, visual) {
                        report.pickups += 1;
                    } else {
                        report.duplicates += 1;
                    }
                }
                Ok(Spawned::Encounter(EncounterSpawn { position, .. }, Err(error)))
                | Ok(Spawned::Pickup(PickupSpawn { position, .. }, Err(error))) => {
                    warn!(
                        target: "runtime::registry",
                        %position,
                        error = %error,
                        "failed to load visual; cell stays empty"
                    );
                    report.failed += 1;
                }
                Err(join_error) => {
                    error!(
                        target: "runtime::registry",
                        error = %join_error,
                        "visual loading task failed"
                    );
                    report.failed += 1;
                }
            }
        }

        self.ready.store(true, Ordering::Release);
        info!(
            target: "runtime::registry",
            encounters = report.encounters,
            pickups = report.pickups,
            duplicates = report.duplicates,
            failed = report.failed,
            "registry populated"
        );
        self.event_bus.publish(TraversalEvent::Populated {
            encounters: self.encounter_count(),
            pickups: self.pickup_count(),
            failed: report.failed,
        });

        report
    }

    /// Snapshot of the encounter registered at `position`.
    pub fn lookup(&self, position: Position) -> Option<EncounterEntity> {
        lock(&self.encounters).get(&position).cloned()
    }

    pub fn pickup(&self, position: Position) -> Option<PickupEntity> {
        lock(&self.pickups).get(&position).cloned()
    }

    /// Turns a living encounter to face `direction`.
    pub fn face(&self, position: Position, direction: Direction) {
        let mut encounters = lock(&self.encounters);
        if let Some(entity) = encounters.get_mut(&position)
            && entity.alive
        {
            entity.facing = direction;
            entity.visual.set_direction(direction);
        }
    }

    /// Marks the encounter dead and removes its visual.
    ///
    /// Returns `false` if there was no living encounter at `position`.
    pub fn mark_dead(&self, position: Position) -> bool {
        let kind = {
            let mut encounters = lock(&self.encounters);
            match encounters.get_mut(&position) {
                Some(entity) if entity.alive => {
                    entity.alive = false;
                    entity.visual.dispose();
                    entity.kind
                }
                _ => {
                    debug!(
                        target: "runtime::registry",
                        %position,
                        "no living encounter to mark dead"
                    );
                    return false;
                }
            }
        };

        self.event_bus
            .publish(EncounterEvent::EnemyHidden { position, kind });
        true
    }

    /// Collects the pickup at `position`.
    ///
    /// Plays the collect cue, disposes the visual and yields the item the
    /// first time; afterwards (or for a cell without a pickup) yields `None`.
    pub async fn collect(&self, position: Position) -> Result<Option<ItemKind>, AnimationError> {
        let (item, visual) = {
            let mut pickups = lock(&self.pickups);
            match pickups.get_mut(&position) {
                Some(pickup) if !pickup.collected => {
                    pickup.collected = true;
                    (pickup.item, Arc::clone(&pickup.visual))
                }
                _ => return Ok(None),
            }
        };

        // collected pickups are skipped by dispose_all, so dispose even on failure
        let played = visual.play_collect().await;
        visual.dispose();
        played?;
        self.event_bus
            .publish(EncounterEvent::PickupCollected { position, item });
        Ok(Some(item))
    }

    /// Disposes every visual still on screen and empties the registry.
    pub fn dispose_all(&self) {
        let encounters: Vec<_> = lock(&self.encounters).drain().map(|(_, e)| e).collect();
        let pickups: Vec<_> = lock(&self.pickups).drain().map(|(_, p)| p).collect();

        for encounter in encounters.iter().filter(|e| e.alive) {
            encounter.visual.dispose();
        }
        for pickup in pickups.iter().filter(|p| !p.collected) {
            pickup.visual.dispose();
        }

        self.ready.store(false, Ordering::Release);
        debug!(
            target: "runtime::registry",
            encounters = encounters.len(),
            pickups = pickups.len(),
            "registry cleared"
        );
    }

    /// Whether a populate call has completed since the last clear.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn encounter_count(&self) -> usize {
        lock(&self.encounters).len()
    }

    pub fn pickup_count(&self) -> usize {
        lock(&self.pickups).len()
    }

    pub fn alive_count(&self) -> usize {
        lock(&self.encounters).values().filter(|e| e.alive).count()
    }

    pub fn uncollected_count(&self) -> usize {
        lock(&self.pickups).values().filter(|p| !p.collected).count()
    }

    fn has_encounter(&self, position: Position) -> bool {
        lock(&self.encounters).contains_key(&position)
    }

    fn has_pickup(&self, position: Position) -> bool {
        lock(&self.pickups).contains_key(&position)
    }

    fn insert_encounter(&self, spawn: EncounterSpawn, visual: Arc<dyn EntityVisual>) -> bool {
        let inserted = match lock(&self.encounters).entry(spawn.position) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(EncounterEntity {
                    position: spawn.position,
                    kind: spawn.kind,
                    subtype: spawn.subtype,
                    role: spawn.role,
                    theme: spawn.theme,
                    alive: true,
                    facing: Direction::Left,
                    visual: Arc::clone(&visual),
                });
                true
            }
        };

        if inserted {
            visual.set_direction(Direction::Left);
            self.event_bus.publish(EncounterEvent::EnemyShown {
                position: spawn.position,
                kind: spawn.kind,
                subtype: spawn.subtype,
                role: spawn.role,
            });
        } else {
            // a concurrent populate won the race
            visual.dispose();
        }
        inserted
    }

    fn insert_pickup(&self, spawn: PickupSpawn, visual: Arc<dyn EntityVisual>) -> bool {
        let inserted = match lock(&self.pickups).entry(spawn.position) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(PickupEntity {
                    position: spawn.position,
                    item: spawn.item,
                    theme: spawn.theme,
                    collected: false,
                    visual: Arc::clone(&visual),
                });
                true
            }
        };

        if inserted {
            self.event_bus.publish(EncounterEvent::PickupShown {
                position: spawn.position,
                item: spawn.item,
            });
        } else {
            visual.dispose();
        }
        inserted
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
