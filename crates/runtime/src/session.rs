//! Per-dungeon session state owned by the session worker.
//!
//! A [`Session`] holds everything a walk mutates: the hero, the encounter
//! registry, the fight engine and the hero/NPC visuals. The walk itself is
//! implemented in [`crate::traversal`] and the closing scene in
//! [`crate::terminal`].
use std::collections::HashSet;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use game_core::{ArchetypeTable, Direction, Dungeon, HeroState, Position};

use crate::api::{Acknowledger, EntityVisual, Prompt, Result, VisualFactory};
use crate::events::{DialogEvent, EventBus, HeroEvent, TerminalStage, TraversalEvent};
use crate::fight::{FightEngine, FightSession};
use crate::registry::{EncounterRegistry, PopulateReport};
use crate::runtime::RuntimeConfig;

/// Result of a walk that reached the reunion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkOutcome {
    /// Whether the final cell held the boss.
    pub boss_fought: bool,
    /// Hero state at the reunion, before the session was reset.
    pub hero: HeroState,
}

/// Read-only view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub hero: HeroState,
    pub fight: Option<FightSession>,
    pub populated: bool,
    pub encounters: usize,
    pub alive: usize,
    pub pickups: usize,
    pub uncollected: usize,
}

pub struct Session {
    pub(crate) dungeon: Arc<Dungeon>,
    archetypes: Arc<ArchetypeTable>,
    pub(crate) config: RuntimeConfig,
    visuals: Arc<dyn VisualFactory>,
    acknowledger: Arc<dyn Acknowledger>,
    pub(crate) event_bus: EventBus,
    pub(crate) registry: Arc<EncounterRegistry>,
    pub(crate) engine: FightEngine,
    pub(crate) hero: HeroState,
    /// Direction of the last move, reused when a move has no direction.
    pub(crate) heading: Direction,
    /// Bounty rooms whose hit points were already granted.
    pub(crate) claimed: HashSet<Position>,
    /// Set once a walk starts; cleared by [`Session::reset`].
    pub(crate) dirty: bool,
    hero_visual: Option<Arc<dyn EntityVisual>>,
    npc_visual: Option<Arc<dyn EntityVisual>>,
    pub(crate) buff_rng: StdRng,
}

impl Session {
    pub fn new(
        dungeon: Arc<Dungeon>,
        archetypes: Arc<ArchetypeTable>,
        config: RuntimeConfig,
        visuals: Arc<dyn VisualFactory>,
        acknowledger: Arc<dyn Acknowledger>,
        event_bus: EventBus,
    ) -> Self {
        let (registry, engine) = fresh_parts(&visuals, &archetypes, &config, &event_bus);
        let hero = HeroState::new(dungeon.path().entrance(), dungeon.minimum_hp());

        Self {
            dungeon,
            archetypes,
            config,
            visuals,
            acknowledger,
            event_bus,
            registry,
            engine,
            hero,
            heading: Direction::Right,
            claimed: HashSet::new(),
            dirty: false,
            hero_visual: None,
            npc_visual: None,
            buff_rng: StdRng::from_entropy(),
        }
    }

    /// Creates the hero and NPC visuals and populates the registry.
    pub async fn populate(&mut self) -> Result<PopulateReport> {
        self.hero_visual().await?;
        self.npc_visual().await?;
        Ok(self.registry.populate(&self.dungeon).await)
    }

    /// Rebuilds the session from the dungeon as if freshly started.
    pub async fn reset(&mut self) -> Result<PopulateReport> {
        self.registry.dispose_all();
        self.engine.reset();
        for visual in [self.hero_visual.take(), self.npc_visual.take()]
            .into_iter()
            .flatten()
        {
            visual.dispose();
        }

        let (registry, engine) =
            fresh_parts(&self.visuals, &self.archetypes, &self.config, &self.event_bus);
        self.registry = registry;
        self.engine = engine;
        self.hero = HeroState::new(self.dungeon.path().entrance(), self.dungeon.minimum_hp());
        self.heading = Direction::Right;
        self.claimed.clear();
        self.dirty = false;

        info!(target: "runtime::session", "session reset");
        self.event_bus.publish(TraversalEvent::Reset);

        self.populate().await
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            hero: self.hero,
            fight: self.engine.session(),
            populated: self.registry.is_ready(),
            encounters: self.registry.encounter_count(),
            alive: self.registry.alive_count(),
            pickups: self.registry.pickup_count(),
            uncollected: self.registry.uncollected_count(),
        }
    }

    pub(crate) async fn hero_visual(&mut self) -> Result<Arc<dyn EntityVisual>> {
        if let Some(visual) = &self.hero_visual {
            return Ok(Arc::clone(visual));
        }

        let visual = self.visuals.spawn_hero(self.hero.position).await?;
        visual.set_direction(self.hero.facing);
        self.hero_visual = Some(Arc::clone(&visual));
        Ok(visual)
    }

    pub(crate) async fn npc_visual(&mut self) -> Result<Arc<dyn EntityVisual>> {
        if let Some(visual) = &self.npc_visual {
            return Ok(Arc::clone(visual));
        }

        let at = self.dungeon.terminal_layout().npc;
        let visual = self.visuals.spawn_npc(at).await?;
        visual.set_direction(Direction::Left);
        self.npc_visual = Some(Arc::clone(&visual));
        Ok(visual)
    }

    /// Walks the hero onto the adjacent cell `to`.
    ///
    /// The logical position only changes once the move animation finished.
    pub(crate) async fn advance_to(&mut self, to: Position) -> Result<()> {
        let from = self.hero.position;
        let direction = Direction::between(from, to).unwrap_or(self.heading);
        let visual = self.hero_visual().await?;

        visual.set_direction(direction.sprite_axis(self.hero.facing));
        visual
            .play_move(to, direction, self.config.timings.step)
            .await?;

        self.hero.arrive(to, direction);
        self.heading = direction;
        self.event_bus.publish(HeroEvent::Moved {
            from,
            to,
            direction,
        });
        Ok(())
    }

    /// Shows `prompt` and waits for the player to confirm it.
    pub(crate) async fn acknowledge(&self, prompt: Prompt) -> Result<()> {
        info!(target: "runtime::dialog", %prompt, "{}", prompt.text());
        self.event_bus.publish(DialogEvent::Shown {
            prompt,
            text: prompt.text().to_string(),
        });

        self.acknowledger.acknowledge(prompt).await?;

        self.event_bus
            .publish(DialogEvent::Acknowledged { prompt });
        Ok(())
    }

    pub(crate) fn stage(&self, stage: TerminalStage) {
        info!(target: "runtime::terminal", ?stage, "terminal stage");
        self.event_bus.publish(TraversalEvent::Terminal(stage));
    }
}

/// Drains `amount` hit points and reports the change.
///
/// Exhaustion is reported but does not stop the walk.
pub(crate) fn apply_damage(hero: &mut HeroState, event_bus: &EventBus, amount: u32) {
    let previous = hero.hp.current;
    hero.take_damage(amount);
    event_bus.publish(HeroEvent::HpChanged {
        previous,
        hp: hero.hp,
    });

    if hero.is_exhausted() {
        warn!(
            target: "runtime::session",
            position = %hero.position,
            hp = hero.hp.current,
            "hero exhausted; continuing"
        );
        event_bus.publish(HeroEvent::Exhausted {
            position: hero.position,
        });
    }
}

fn fresh_parts(
    visuals: &Arc<dyn VisualFactory>,
    archetypes: &Arc<ArchetypeTable>,
    config: &RuntimeConfig,
    event_bus: &EventBus,
) -> (Arc<EncounterRegistry>, FightEngine) {
    let registry = Arc::new(EncounterRegistry::new(
        Arc::clone(visuals),
        Arc::clone(archetypes),
        event_bus.clone(),
    ));
    let engine = FightEngine::new(
        Arc::clone(&registry),
        event_bus.clone(),
        config.timings,
        config.fight_seed,
    );
    (registry, engine)
}
