//! Logical state of the travelling hero.
use crate::catalog::ItemKind;
use crate::grid::{Direction, Position, ResourceMeter};

/// Hero state mutated by traversal and encounter outcomes.
///
/// Position only ever holds a cell the hero has fully arrived at; the
/// in-between interpolation lives in the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroState {
    pub position: Position,
    pub facing: Direction,
    pub hp: ResourceMeter,
    /// Single inventory slot.
    pub item: Option<ItemKind>,
}

impl HeroState {
    /// Fresh hero standing on `entrance` with a full pool of `minimum_hp`.
    pub fn new(entrance: Position, minimum_hp: i32) -> Self {
        Self {
            position: entrance,
            facing: Direction::default(),
            hp: ResourceMeter::full(minimum_hp),
            item: None,
        }
    }

    /// Moves onto an adjacent cell, updating facing to the sprite axis.
    pub fn arrive(&mut self, position: Position, direction: Direction) {
        self.position = position;
        self.facing = direction.sprite_axis(self.facing);
    }

    pub fn heal(&mut self, amount: u32) -> i32 {
        self.hp.grant(amount)
    }

    pub fn take_damage(&mut self, amount: u32) -> i32 {
        self.hp.drain(amount)
    }

    /// Puts `item` in the slot, returning whatever was held before.
    pub fn hold(&mut self, item: ItemKind) -> Option<ItemKind> {
        self.item.replace(item)
    }

    pub fn is_exhausted(&self) -> bool {
        self.hp.is_empty()
    }
}
