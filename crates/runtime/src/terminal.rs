//! Closing scene played after the last path cell.
//!
//! The hero walks past the exit toward the waiting NPC. If the final cell
//! held a threat, the boss appears: threat dialog, the NPC's blessing (a
//! random buff), anger dialog, a fixed-length boss fight, victory dialog and
//! the boss's death. The hero then steps next to the NPC and the reunion
//! dialog ends the walk; acknowledging it resets the session.
use rand::Rng;
use tracing::{info, warn};

use game_core::{Direction, ItemKind, RoomKind};

use crate::api::{Prompt, Result};
use crate::events::{HeroEvent, TerminalStage, TraversalEvent};
use crate::fight::{FightOutcome, FightRequest, FirstHitHook, RoundPolicy};
use crate::session::{Session, WalkOutcome, apply_damage};

impl Session {
    pub(crate) async fn finish(&mut self) -> Result<WalkOutcome> {
        let layout = self.dungeon.terminal_layout();

        self.stage(TerminalStage::Approach);
        for cell in layout.approach {
            self.advance_to(cell).await?;
        }

        let boss_fought = match self.dungeon.terminal_room() {
            RoomKind::Threat(damage) => {
                self.confront_boss(damage).await?;
                true
            }
            RoomKind::Corridor | RoomKind::Bounty(_) => false,
        };

        self.stage(TerminalStage::Reunion);
        self.advance_to(layout.reunion).await?;
        self.acknowledge(Prompt::Reunion).await?;

        let outcome = WalkOutcome {
            boss_fought,
            hero: self.hero,
        };
        info!(
            target: "runtime::terminal",
            boss_fought,
            hp = self.hero.hp.current,
            "walk complete"
        );
        self.event_bus
            .publish(TraversalEvent::Completed { boss_fought });

        self.reset().await?;
        Ok(outcome)
    }

    async fn confront_boss(&mut self, damage: u32) -> Result<()> {
        let exit = self.dungeon.path().exit();

        self.acknowledge(Prompt::Threat).await?;

        self.stage(TerminalStage::Blessing);
        let npc = self.npc_visual().await?;
        npc.play_blessing().await?;
        let buff = ItemKind::BUFFS[self.buff_rng.gen_range(0..ItemKind::BUFFS.len())];
        let previous = self.hero.hold(buff);
        info!(target: "runtime::terminal", %buff, "blessing received");
        self.event_bus.publish(HeroEvent::ItemChanged {
            previous,
            current: buff,
        });

        self.acknowledge(Prompt::Anger).await?;

        self.stage(TerminalStage::BossFight);
        let Some(boss) = self.registry.lookup(exit).filter(|boss| boss.alive) else {
            warn!(
                target: "runtime::terminal",
                %exit,
                damage,
                "boss missing; applying damage without a fight"
            );
            apply_damage(&mut self.hero, &self.event_bus, damage);
            return Ok(());
        };

        let request = FightRequest {
            hero: self.hero_visual().await?,
            foe: boss.clone(),
            facing: Direction::Right,
            rounds: RoundPolicy::Fixed(self.config.game_config.boss_rounds),
        };
        let hero = &mut self.hero;
        let event_bus = &self.event_bus;
        let on_first_hit: FirstHitHook<'_> = Box::new(move || apply_damage(hero, event_bus, damage));

        let outcome = self.engine.resolve(request, Some(on_first_hit)).await?;
        if outcome == FightOutcome::Rejected {
            warn!(target: "runtime::terminal", "boss fight rejected");
        }

        self.acknowledge(Prompt::Victory).await?;
        boss.visual.play_death(Direction::Left).await?;
        self.registry.mark_dead(exit);
        Ok(())
    }
}
