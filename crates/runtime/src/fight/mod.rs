//! Round-based fight resolution.
//!
//! [`FightEngine`] sequences the animations of one hero-versus-foe exchange.
//! Hit points are not its business: callers pass a first-hit hook and apply
//! damage there, exactly once, after the foe's first strike lands.
//!
//! Only one fight may run at a time. A second [`FightEngine::resolve`] while
//! a session is active is rejected without touching any animation.
mod policy;
mod session;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::time::sleep;
use tracing::{debug, info, warn};

pub use policy::RoundPolicy;
pub use session::{FightOutcome, FightPhase, FightSession};

use crate::api::{EntityVisual, Result};
use crate::events::{EncounterEvent, EventBus};
use crate::registry::{EncounterEntity, EncounterRegistry};
use crate::runtime::Timings;
use game_core::{Direction, EncounterRole};

/// Callback run once, right after the foe's first strike lands.
pub type FirstHitHook<'a> = Box<dyn FnOnce() + Send + 'a>;

/// Participants and parameters of one fight.
pub struct FightRequest {
    pub hero: Arc<dyn EntityVisual>,
    pub foe: EncounterEntity,
    /// Direction the hero faces the foe in. A vertical direction falls back
    /// to facing right.
    pub facing: Direction,
    pub rounds: RoundPolicy,
}

pub struct FightEngine {
    registry: Arc<EncounterRegistry>,
    event_bus: EventBus,
    timings: Timings,
    rng: Mutex<StdRng>,
    session: Mutex<Option<FightSession>>,
}

impl FightEngine {
    /// `seed` makes round draws reproducible; `None` seeds from entropy.
    pub fn new(
        registry: Arc<EncounterRegistry>,
        event_bus: EventBus,
        timings: Timings,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            registry,
            event_bus,
            timings,
            rng: Mutex::new(rng),
            session: Mutex::new(None),
        }
    }

    /// Plays a full fight and reports how it ended.
    ///
    /// Each round: the foe attacks while the hero, after a short delay,
    /// plays hurt and blink together; after a pause the hero attacks while
    /// the foe plays hurt and blink. Rounds are separated by a longer pause.
    /// Ordinary foes then die and are marked dead in the registry; the boss
    /// is left standing.
    ///
    /// An animation failure aborts the fight and releases the session.
    pub async fn resolve(
        &self,
        request: FightRequest,
        on_first_hit: Option<FirstHitHook<'_>>,
    ) -> Result<FightOutcome> {
        let FightRequest {
            hero,
            foe,
            facing,
            rounds,
        } = request;

        let Some(rounds) = self.begin(&foe, facing, rounds) else {
            warn!(
                target: "runtime::fight",
                foe = %foe.position,
                "fight already in progress; request rejected"
            );
            return Ok(FightOutcome::Rejected);
        };
        let _release = SessionRelease(&self.session);

        info!(
            target: "runtime::fight",
            foe = %foe.position,
            kind = %foe.kind,
            role = %foe.role,
            rounds,
            "fight started"
        );
        // sprites face each other along the horizontal axis
        let hero_row = facing.sprite_axis(Direction::Right);
        let foe_row = hero_row.opposite();
        self.event_bus.publish(EncounterEvent::FightStarted {
            position: foe.position,
            kind: foe.kind,
            role: foe.role,
            rounds,
            facing: hero_row,
        });

        hero.set_direction(hero_row);
        self.registry.face(foe.position, foe_row);

        let mut on_first_hit = on_first_hit;
        for round in 1..=rounds {
            self.enter_phase(round, FightPhase::FoeStrike);
            tokio::try_join!(foe.visual.play_attack(foe_row), async {
                sleep(self.timings.hurt_delay).await;
                tokio::try_join!(hero.play_hurt(hero_row), hero.play_blink(self.timings.blink))
                    .map(|_| ())
            })?;

            if let Some(hook) = on_first_hit.take() {
                debug!(target: "runtime::fight", foe = %foe.position, "first hit landed");
                hook();
            }

            sleep(self.timings.inter_step_pause).await;

            self.enter_phase(round, FightPhase::HeroStrike);
            tokio::try_join!(
                hero.play_attack(hero_row),
                foe.visual.play_hurt(foe_row),
                foe.visual.play_blink(self.timings.blink)
            )?;

            self.event_bus.publish(EncounterEvent::RoundCompleted {
                position: foe.position,
                round,
                rounds,
            });

            if round < rounds {
                sleep(self.timings.inter_round_pause).await;
            }
        }

        self.enter_phase(rounds, FightPhase::Resolution);
        let outcome = match foe.role {
            EncounterRole::Boss => FightOutcome::BossStanding,
            EncounterRole::Enemy => {
                foe.visual.play_death(foe_row).await?;
                self.registry.mark_dead(foe.position);
                FightOutcome::Defeated
            }
        };

        info!(
            target: "runtime::fight",
            foe = %foe.position,
            ?outcome,
            "fight finished"
        );
        self.event_bus.publish(EncounterEvent::FightFinished {
            position: foe.position,
            outcome,
        });

        Ok(outcome)
    }

    /// Copy of the session in progress, if any.
    pub fn session(&self) -> Option<FightSession> {
        lock(&self.session).clone()
    }

    pub fn is_idle(&self) -> bool {
        lock(&self.session).is_none()
    }

    /// Forgets any session in progress.
    pub fn reset(&self) {
        if let Some(stale) = lock(&self.session).take() {
            warn!(
                target: "runtime::fight",
                foe = %stale.foe,
                "discarding unfinished fight"
            );
        }
    }

    /// Claims the session slot and draws the round count.
    fn begin(&self, foe: &EncounterEntity, facing: Direction, policy: RoundPolicy) -> Option<u32> {
        let mut session = lock(&self.session);
        if session.is_some() {
            return None;
        }

        let rounds = policy.draw(&mut *lock(&self.rng));
        *session = Some(FightSession {
            foe: foe.position,
            kind: foe.kind,
            role: foe.role,
            facing,
            rounds,
            round: 1,
            phase: FightPhase::FoeStrike,
        });
        Some(rounds)
    }

    fn enter_phase(&self, round: u32, phase: FightPhase) {
        if let Some(session) = lock(&self.session).as_mut() {
            session.round = round;
            session.phase = phase;
        }
    }
}

/// Frees the session slot when a fight ends, fails or is cancelled.
struct SessionRelease<'a>(&'a Mutex<Option<FightSession>>);

impl Drop for SessionRelease<'_> {
    fn drop(&mut self) {
        lock(self.0).take();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
