mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use game_core::{ArchetypeTable, Direction, Dungeon, Position};
use runtime::{
    EncounterEvent, EncounterRegistry, Event, EventBus, FightEngine, FightOutcome, FightPhase,
    FightRequest, RoundPolicy, Timings, Topic, VisualFactory,
};
use tokio::time::sleep;

use common::{Fault, Log, RecordingFactory, RecordingVisual, drain};

struct Arena {
    log: Log,
    bus: EventBus,
    registry: Arc<EncounterRegistry>,
    engine: FightEngine,
    hero: Arc<RecordingVisual>,
}

/// Two ordinary foes at (0, 1) and (0, 2), the boss at the exit (0, 3).
async fn arena(foe_fault: Fault) -> Arena {
    let log = Log::new();
    let mut factory = RecordingFactory::new(log.clone());
    factory.foe_fault = foe_fault;
    let factory: Arc<dyn VisualFactory> = Arc::new(factory);

    let bus = EventBus::with_capacity(256);
    let registry = Arc::new(EncounterRegistry::new(
        factory,
        Arc::new(ArchetypeTable::builtin()),
        bus.clone(),
    ));
    let dungeon = Dungeon::from_parts(
        vec![vec![0, -1, -2, -3]],
        vec![(0, 0), (0, 1), (0, 2), (0, 3)],
        1,
    )
    .expect("valid dungeon");
    registry.populate(&dungeon).await;

    let engine = FightEngine::new(Arc::clone(&registry), bus.clone(), Timings::default(), Some(1));
    let hero = Arc::new(RecordingVisual::new("hero", 0, log.clone(), Fault::default()));

    Arena {
        log,
        bus,
        registry,
        engine,
        hero,
    }
}

fn request(arena: &Arena, foe: Position, rounds: RoundPolicy) -> FightRequest {
    FightRequest {
        hero: arena.hero.clone(),
        foe: arena.registry.lookup(foe).expect("foe registered"),
        facing: Direction::Right,
        rounds,
    }
}

#[tokio::test(start_paused = true)]
async fn first_hit_hook_runs_once_for_any_round_count() {
    for rounds in 1..=3 {
        let arena = arena(Fault::default()).await;
        let hits = AtomicU32::new(0);

        let outcome = arena
            .engine
            .resolve(
                request(&arena, Position::new(0, 1), RoundPolicy::Fixed(rounds)),
                Some(Box::new(|| {
                    hits.fetch_add(1, Ordering::SeqCst);
                })),
            )
            .await
            .expect("fight resolves");

        assert_eq!(outcome, FightOutcome::Defeated);
        assert_eq!(hits.load(Ordering::SeqCst), 1, "rounds = {rounds}");
        assert_eq!(arena.log.count("enemy@(0, 1)", "attack"), rounds as usize);
        assert_eq!(arena.log.count("hero", "attack"), rounds as usize);
    }
}

#[tokio::test(start_paused = true)]
async fn round_choreography_and_death() {
    let arena = arena(Fault::default()).await;
    let foe = "enemy@(0, 1)";

    let outcome = arena
        .engine
        .resolve(request(&arena, Position::new(0, 1), RoundPolicy::Fixed(2)), None)
        .await
        .expect("fight resolves");
    assert_eq!(outcome, FightOutcome::Defeated);

    let foe_attack = arena.log.first(foe, "attack").expect("foe attacked");
    let hero_hurt = arena.log.first("hero", "hurt").expect("hero hurt");
    let hero_blink = arena.log.first("hero", "blink").expect("hero blinked");
    assert_eq!(hero_hurt.at_ms - foe_attack.at_ms, 200);
    assert_eq!(hero_blink.at_ms, hero_hurt.at_ms);

    // foe strikes first every round, dies after the last one
    assert_eq!(
        arena.log.actions_of(foe),
        vec![
            "spawn", "attack", "hurt", "blink", "attack", "hurt", "blink", "death", "dispose"
        ]
    );
    assert!(!arena.registry.lookup(Position::new(0, 1)).unwrap().alive);
    assert!(arena.engine.is_idle());
}

#[tokio::test(start_paused = true)]
async fn boss_is_left_standing() {
    let arena = arena(Fault::default()).await;
    let mut encounter_rx = arena.bus.subscribe(Topic::Encounter);

    let outcome = arena
        .engine
        .resolve(request(&arena, Position::new(0, 3), RoundPolicy::Fixed(5)), None)
        .await
        .expect("boss fight resolves");

    assert_eq!(outcome, FightOutcome::BossStanding);
    assert_eq!(arena.log.count("boss@(0, 3)", "attack"), 5);
    assert_eq!(arena.log.count("boss@(0, 3)", "death"), 0);
    assert!(arena.registry.lookup(Position::new(0, 3)).unwrap().alive);

    let rounds: Vec<u32> = drain(&mut encounter_rx)
        .into_iter()
        .filter_map(|event| match event {
            Event::Encounter(EncounterEvent::RoundCompleted { round, rounds, .. }) => {
                assert_eq!(rounds, 5);
                Some(round)
            }
            _ => None,
        })
        .collect();
    assert_eq!(rounds, vec![1, 2, 3, 4, 5]);
}

#[tokio::test(start_paused = true)]
async fn concurrent_fight_is_rejected() {
    let arena = arena(Fault::default()).await;

    let (first, second) = tokio::join!(
        arena
            .engine
            .resolve(request(&arena, Position::new(0, 1), RoundPolicy::Fixed(2)), None),
        async {
            sleep(Duration::from_millis(50)).await;
            let session = arena.engine.session().expect("fight in progress");
            assert_eq!(session.foe, Position::new(0, 1));
            assert_eq!(session.rounds, 2);
            assert_eq!(session.round, 1);
            assert_eq!(session.phase, FightPhase::FoeStrike);
            let rejected = arena
                .engine
                .resolve(request(&arena, Position::new(0, 2), RoundPolicy::Fixed(1)), None)
                .await;

            // the fight in flight keeps its round and phase
            let after = arena.engine.session().expect("fight still in progress");
            assert_eq!(after, session);
            rejected
        }
    );

    assert_eq!(first.expect("first fight"), FightOutcome::Defeated);
    assert_eq!(second.expect("second call"), FightOutcome::Rejected);
    assert_eq!(arena.log.actions_of("enemy@(0, 2)"), vec!["spawn"]);
    assert!(arena.registry.lookup(Position::new(0, 2)).unwrap().alive);
    assert!(arena.engine.is_idle());
}

#[tokio::test(start_paused = true)]
async fn animation_failure_releases_session_without_hit() {
    let arena = arena(Fault {
        fail_on: Some("attack"),
        hang_on: None,
    })
    .await;
    let hits = AtomicU32::new(0);

    let result = arena
        .engine
        .resolve(
            request(&arena, Position::new(0, 1), RoundPolicy::Weighted),
            Some(Box::new(|| {
                hits.fetch_add(1, Ordering::SeqCst);
            })),
        )
        .await;

    assert!(result.is_err());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(arena.engine.is_idle());
    assert!(arena.registry.lookup(Position::new(0, 1)).unwrap().alive);
}

#[tokio::test(start_paused = true)]
async fn seeded_draws_are_reproducible() {
    let draw = |seed| async move {
        let arena = arena(Fault::default()).await;
        let engine = FightEngine::new(
            Arc::clone(&arena.registry),
            arena.bus.clone(),
            Timings::default(),
            Some(seed),
        );
        let mut rx = arena.bus.subscribe(Topic::Encounter);
        engine
            .resolve(request(&arena, Position::new(0, 1), RoundPolicy::Weighted), None)
            .await
            .expect("fight resolves");
        drain(&mut rx).into_iter().find_map(|event| match event {
            Event::Encounter(EncounterEvent::FightStarted { rounds, .. }) => Some(rounds),
            _ => None,
        })
    };

    let first = draw(42).await.expect("fight started");
    let second = draw(42).await.expect("fight started");
    assert_eq!(first, second);
    assert!((1..=3).contains(&first));
}
