use std::fmt;
use std::sync::Arc;

use game_core::{Direction, EncounterRole, EnemyKind, ItemKind, Position, RoomTheme};

use crate::api::EntityVisual;

/// Occupant of a threat room (or the boss keyed at the exit cell).
#[derive(Clone)]
pub struct EncounterEntity {
    pub position: Position,
    pub kind: EnemyKind,
    pub subtype: u8,
    pub role: EncounterRole,
    pub theme: RoomTheme,
    pub alive: bool,
    pub facing: Direction,
    pub visual: Arc<dyn EntityVisual>,
}

impl EncounterEntity {
    pub fn is_boss(&self) -> bool {
        self.role == EncounterRole::Boss
    }
}

impl fmt::Debug for EncounterEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncounterEntity")
            .field("position", &self.position)
            .field("kind", &self.kind)
            .field("subtype", &self.subtype)
            .field("role", &self.role)
            .field("theme", &self.theme)
            .field("alive", &self.alive)
            .field("facing", &self.facing)
            .field("object", &self.visual.object())
            .finish()
    }
}

/// Item lying in a beneficial room.
#[derive(Clone)]
pub struct PickupEntity {
    pub position: Position,
    pub item: ItemKind,
    pub theme: RoomTheme,
    pub collected: bool,
    pub visual: Arc<dyn EntityVisual>,
}

impl fmt::Debug for PickupEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickupEntity")
            .field("position", &self.position)
            .field("item", &self.item)
            .field("theme", &self.theme)
            .field("collected", &self.collected)
            .field("object", &self.visual.object())
            .finish()
    }
}
