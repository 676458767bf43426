use serde::{Deserialize, Serialize};

use game_core::{Direction, EncounterRole, EnemyKind, Position};

/// Step inside a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightPhase {
    /// The foe strikes and the hero recoils.
    FoeStrike,
    /// The hero strikes back.
    HeroStrike,
    /// All rounds done; the foe dies or, for the boss, stays standing.
    Resolution,
}

/// The single fight in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightSession {
    pub foe: Position,
    pub kind: EnemyKind,
    pub role: EncounterRole,
    /// Direction the hero faces; the foe faces the opposite way.
    pub facing: Direction,
    pub rounds: u32,
    /// 1-based round currently playing.
    pub round: u32,
    pub phase: FightPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightOutcome {
    /// The foe played its death clip and was marked dead.
    Defeated,
    /// Boss fights end with the boss alive; its death is sequenced later.
    BossStanding,
    /// Another fight was already in progress.
    Rejected,
}
