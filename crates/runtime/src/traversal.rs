//! Walking the dungeon path room by room.
//!
//! Every cell of the path, the entrance included, is entered exactly once in
//! order. Room effects are dispatched on the room's sign: corridors pause,
//! bounty rooms heal and hand over their pickup, threat rooms start a fight.
//! The final cell's threat is the boss, which is left to the closing scene.
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use game_core::{Position, RoomKind, theme_at};

use crate::api::{Prompt, Result, RuntimeError};
use crate::events::{HeroEvent, TraversalEvent};
use crate::fight::{FightOutcome, FightRequest, FirstHitHook, RoundPolicy};
use crate::session::{Session, WalkOutcome, apply_damage};

impl Session {
    /// Walks the whole path, then plays the closing scene.
    ///
    /// A session that already walked (completely or not) is reset first, so
    /// every walk starts from the entrance with a fresh registry.
    pub async fn walk(&mut self) -> Result<WalkOutcome> {
        if self.dirty {
            self.reset().await?;
        } else if !self.registry.is_ready() {
            self.populate().await?;
        }
        self.dirty = true;

        let steps = self.dungeon.path().steps().to_vec();
        info!(target: "runtime::traversal", steps = steps.len(), "walk started");
        self.event_bus
            .publish(TraversalEvent::Started { steps: steps.len() });

        for (index, cell) in steps.into_iter().enumerate() {
            let result = match self.config.timings.step_timeout {
                Some(limit) => {
                    let guarded = timeout(limit, self.step(index, cell)).await;
                    match guarded {
                        Ok(result) => result,
                        Err(_) => return self.stall(cell, limit).await,
                    }
                }
                None => self.step(index, cell).await,
            };

            if let Err(error) = result {
                return Err(self.abort(cell, error));
            }
        }

        match self.finish().await {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                let position = self.hero.position;
                Err(self.abort(position, error))
            }
        }
    }

    async fn step(&mut self, index: usize, cell: Position) -> Result<()> {
        if index > 0 {
            self.advance_to(cell).await?;
        }
        self.enter_room(cell).await
    }

    async fn enter_room(&mut self, cell: Position) -> Result<()> {
        let value = self.dungeon.grid().value(cell).unwrap_or(0);
        let room = RoomKind::from_value(value);
        let theme = theme_at(cell, value);

        debug!(target: "runtime::traversal", %cell, ?room, %theme, "entered room");
        self.event_bus.publish(TraversalEvent::RoomEntered {
            position: cell,
            room,
            theme,
        });

        match room {
            RoomKind::Corridor => sleep(self.config.timings.corridor_pause).await,
            RoomKind::Bounty(amount) => self.claim_bounty(cell, amount).await?,
            RoomKind::Threat(_) if self.dungeon.is_exit(cell) => {
                debug!(target: "runtime::traversal", %cell, "boss waits past the exit");
            }
            RoomKind::Threat(damage) => self.confront(cell, damage).await?,
        }
        Ok(())
    }

    async fn claim_bounty(&mut self, cell: Position, amount: u32) -> Result<()> {
        if !self.claimed.insert(cell) {
            debug!(target: "runtime::traversal", %cell, "bounty already claimed");
            return Ok(());
        }

        let previous = self.hero.hp.current;
        self.hero.heal(amount);
        self.event_bus.publish(HeroEvent::HpChanged {
            previous,
            hp: self.hero.hp,
        });

        if let Some(item) = self.registry.collect(cell).await? {
            let previous = self.hero.hold(item);
            debug!(target: "runtime::traversal", %cell, %item, "picked up");
            self.event_bus.publish(HeroEvent::ItemChanged {
                previous,
                current: item,
            });
        }
        Ok(())
    }

    async fn confront(&mut self, cell: Position, damage: u32) -> Result<()> {
        let Some(foe) = self.registry.lookup(cell) else {
            warn!(
                target: "runtime::traversal",
                %cell,
                damage,
                "occupant missing; applying damage without a fight"
            );
            apply_damage(&mut self.hero, &self.event_bus, damage);
            return Ok(());
        };
        if !foe.alive {
            debug!(target: "runtime::traversal", %cell, "occupant already defeated");
            return Ok(());
        }

        let request = FightRequest {
            hero: self.hero_visual().await?,
            foe,
            facing: self.hero.facing,
            rounds: RoundPolicy::Weighted,
        };
        let hero = &mut self.hero;
        let event_bus = &self.event_bus;
        let on_first_hit: FirstHitHook<'_> = Box::new(move || apply_damage(hero, event_bus, damage));

        let outcome = self.engine.resolve(request, Some(on_first_hit)).await?;
        if outcome == FightOutcome::Rejected {
            warn!(target: "runtime::traversal", %cell, "fight rejected; moving on");
        }
        Ok(())
    }

    /// Watchdog expiry: report, ask for a restart and rebuild the session.
    async fn stall(&mut self, cell: Position, waited: Duration) -> Result<WalkOutcome> {
        error!(
            target: "runtime::traversal",
            %cell,
            ?waited,
            "walk stalled; restarting"
        );
        self.event_bus
            .publish(TraversalEvent::Stalled { position: cell });

        self.acknowledge(Prompt::Restart).await?;
        self.reset().await?;
        Err(RuntimeError::Stalled {
            position: cell,
            waited,
        })
    }

    fn abort(&self, position: Position, error: RuntimeError) -> RuntimeError {
        error!(
            target: "runtime::traversal",
            %position,
            error = %error,
            "walk aborted"
        );
        self.event_bus.publish(TraversalEvent::Aborted {
            position,
            reason: error.to_string(),
        });
        error
    }
}
