//! Fixed content catalogs: encounter kinds, room themes and items.
//!
//! Indices into the `ORDINARY`, `ALL`, `PICKUPS` and `BUFFS` tables are what
//! the assignment functions in [`crate::assign`] produce, so the order of each
//! table is part of the deterministic contract and must not be shuffled.

/// Kind of occupant in a threat room.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnemyKind {
    Ghost,
    Beholder,
    Demon,
    Lich,
    /// Only ever placed in the final room.
    Dragon,
}

impl EnemyKind {
    /// Kinds placed in ordinary threat rooms, in assignment order.
    pub const ORDINARY: [EnemyKind; 4] = [Self::Ghost, Self::Beholder, Self::Demon, Self::Lich];

    /// The final-room occupant.
    pub const BOSS: EnemyKind = Self::Dragon;

    pub const fn is_boss(self) -> bool {
        matches!(self, Self::Dragon)
    }
}

/// Whether an encounter is an ordinary enemy or the terminal boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EncounterRole {
    Enemy,
    Boss,
}

/// Visual theme of a room.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RoomTheme {
    Crypt,
    Cavern,
    Library,
    Forge,
}

impl RoomTheme {
    pub const ALL: [RoomTheme; 4] = [Self::Crypt, Self::Cavern, Self::Library, Self::Forge];
}

/// Items the hero can hold in its single inventory slot.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    HealthPotion,
    ManaPotion,
    Elixir,
    Sword,
    Shield,
    Amulet,
}

impl ItemKind {
    /// Items lying in beneficial rooms, in assignment order.
    pub const PICKUPS: [ItemKind; 3] = [Self::HealthPotion, Self::ManaPotion, Self::Elixir];

    /// Blessings the rescued NPC can grant before the boss fight.
    pub const BUFFS: [ItemKind; 3] = [Self::Sword, Self::Shield, Self::Amulet];

    pub fn is_buff(self) -> bool {
        Self::BUFFS.contains(&self)
    }
}
