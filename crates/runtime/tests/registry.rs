mod common;

use std::sync::Arc;

use game_core::{ArchetypeTable, EncounterRole, EnemyKind, Position, pickup_at};
use runtime::{EncounterRegistry, EventBus, Topic, TraversalEvent, Event, VisualFactory};

use common::{Fault, Log, RecordingFactory, drain, scenario_a};

fn registry(factory: RecordingFactory) -> (EncounterRegistry, EventBus) {
    let bus = EventBus::with_capacity(256);
    let factory: Arc<dyn VisualFactory> = Arc::new(factory);
    let registry = EncounterRegistry::new(factory, Arc::new(ArchetypeTable::builtin()), bus.clone());
    (registry, bus)
}

#[tokio::test(start_paused = true)]
async fn populate_registers_every_non_empty_cell() {
    let log = Log::new();
    let (registry, _bus) = registry(RecordingFactory::new(log.clone()));
    let dungeon = scenario_a();

    let report = registry.populate(&dungeon).await;

    // 5 threat cells, 4 bounty cells
    assert_eq!(report.encounters, 5);
    assert_eq!(report.pickups, 4);
    assert_eq!(report.failed, 0);
    assert!(registry.is_ready());

    let ordinary = registry.lookup(Position::new(0, 1)).expect("encounter");
    assert_eq!(ordinary.role, EncounterRole::Enemy);
    assert!(EnemyKind::ORDINARY.contains(&ordinary.kind));
    assert!(ordinary.alive);
    assert!((1..=3).contains(&ordinary.subtype));

    let boss = registry.lookup(Position::new(2, 2)).expect("boss at exit");
    assert_eq!(boss.role, EncounterRole::Boss);
    assert_eq!(boss.kind, EnemyKind::Dragon);

    assert!(registry.lookup(Position::new(0, 2)).is_none());
    assert!(registry.pickup(Position::new(0, 2)).is_some());
}

#[tokio::test(start_paused = true)]
async fn populate_twice_creates_no_duplicates() {
    let log = Log::new();
    let (registry, _bus) = registry(RecordingFactory::new(log.clone()));
    let dungeon = scenario_a();

    registry.populate(&dungeon).await;
    let second = registry.populate(&dungeon).await;

    assert_eq!(second.encounters, 0);
    assert_eq!(second.pickups, 0);
    assert_eq!(second.duplicates, 9);
    assert_eq!(registry.encounter_count(), 5);
    assert_eq!(registry.pickup_count(), 4);
    assert_eq!(log.count("hero", "spawn"), 0);
    assert_eq!(
        log.calls().iter().filter(|c| c.action == "spawn").count(),
        9
    );
}

#[tokio::test(start_paused = true)]
async fn failed_asset_skips_only_that_cell() {
    let log = Log::new();
    let mut factory = RecordingFactory::new(log.clone());
    factory.broken_cells.insert(Position::new(1, 1));
    factory.broken_cells.insert(Position::new(2, 0));
    let (registry, bus) = registry(factory);
    let mut traversal = bus.subscribe(Topic::Traversal);

    let report = registry.populate(&scenario_a()).await;

    assert_eq!(report.encounters, 4);
    assert_eq!(report.pickups, 3);
    assert_eq!(report.failed, 2);
    assert!(registry.lookup(Position::new(1, 1)).is_none());
    assert!(registry.pickup(Position::new(2, 0)).is_none());
    assert!(registry.lookup(Position::new(1, 0)).is_some());

    let events = drain(&mut traversal);
    assert_eq!(
        events,
        vec![Event::Traversal(TraversalEvent::Populated {
            encounters: 4,
            pickups: 3,
            failed: 2,
        })]
    );
}

#[tokio::test(start_paused = true)]
async fn collect_is_idempotent() {
    let log = Log::new();
    let (registry, _bus) = registry(RecordingFactory::new(log.clone()));
    registry.populate(&scenario_a()).await;
    let cell = Position::new(0, 2);

    let first = registry.collect(cell).await.expect("collect");
    let second = registry.collect(cell).await.expect("collect again");

    assert_eq!(first, Some(pickup_at(cell, 3)));
    assert_eq!(second, None);
    assert_eq!(log.count("pickup@(0, 2)", "collect"), 1);
    assert_eq!(log.count("pickup@(0, 2)", "dispose"), 1);
    assert_eq!(registry.collect(Position::new(1, 1)).await.expect("no pickup"), None);
}

#[tokio::test(start_paused = true)]
async fn mark_dead_disposes_once() {
    let log = Log::new();
    let (registry, _bus) = registry(RecordingFactory::new(log.clone()));
    registry.populate(&scenario_a()).await;
    let cell = Position::new(1, 0);

    assert!(registry.mark_dead(cell));
    assert!(!registry.mark_dead(cell));
    assert!(!registry.lookup(cell).expect("still registered").alive);
    assert_eq!(registry.alive_count(), 4);

    registry.dispose_all();
    assert_eq!(log.count("enemy@(1, 0)", "dispose"), 1);
    assert_eq!(log.count("boss@(2, 2)", "dispose"), 1);
    assert_eq!(registry.encounter_count(), 0);
    assert!(!registry.is_ready());
}

#[tokio::test(start_paused = true)]
async fn failed_collect_still_disposes_the_pickup() {
    let log = Log::new();
    let mut factory = RecordingFactory::new(log.clone());
    factory.pickup_fault = Fault {
        fail_on: Some("collect"),
        hang_on: None,
    };
    let (registry, _bus) = registry(factory);
    registry.populate(&scenario_a()).await;
    let cell = Position::new(0, 2);

    assert!(registry.collect(cell).await.is_err());
    assert_eq!(log.count("pickup@(0, 2)", "dispose"), 1);
    assert_eq!(registry.collect(cell).await.expect("already collected"), None);

    registry.dispose_all();
    assert_eq!(log.count("pickup@(0, 2)", "dispose"), 1);
    assert_eq!(log.count("pickup@(1, 2)", "dispose"), 1);
}
