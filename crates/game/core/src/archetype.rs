//! Data-driven encounter archetypes.
//!
//! One row per `(kind, subtype)` replaces a class per enemy kind: the
//! renderer only needs frame counts, an asset path and a scale factor, and
//! every kind shares the same fight state machine.

use std::collections::HashMap;

use crate::catalog::EnemyKind;
use crate::config::GameConfig;

/// Animation clip names used in asset templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AnimationClip {
    Idle,
    Walk,
    Attack,
    Hurt,
    Death,
}

/// Frame count of each clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCounts {
    pub idle: u16,
    pub walk: u16,
    pub attack: u16,
    pub hurt: u16,
    pub death: u16,
}

impl FrameCounts {
    pub const fn get(&self, clip: AnimationClip) -> u16 {
        match clip {
            AnimationClip::Idle => self.idle,
            AnimationClip::Walk => self.walk,
            AnimationClip::Attack => self.attack,
            AnimationClip::Hurt => self.hurt,
            AnimationClip::Death => self.death,
        }
    }
}

/// Rendering parameters for one encounter variant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Archetype {
    pub kind: EnemyKind,
    pub subtype: u8,
    pub frames: FrameCounts,
    /// Path with `{kind}`, `{subtype}` and `{clip}` placeholders.
    pub asset_template: String,
    /// Scale relative to a one-cell sprite.
    pub size: f32,
}

impl Archetype {
    pub const DEFAULT_TEMPLATE: &'static str = "enemies/{kind}/{subtype}/{clip}.png";

    /// Resolves the asset path of `clip`.
    pub fn asset_path(&self, clip: AnimationClip) -> String {
        self.asset_template
            .replace("{kind}", self.kind.as_ref())
            .replace("{subtype}", &self.subtype.to_string())
            .replace("{clip}", clip.as_ref())
    }
}

/// Lookup table keyed by `(kind, subtype)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArchetypeTable {
    rows: HashMap<(EnemyKind, u8), Archetype>,
}

impl ArchetypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table covering every kind and subtype with stock frame counts.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for kind in EnemyKind::ORDINARY.into_iter().chain([EnemyKind::BOSS]) {
            let (frames, base_size) = stock(kind);
            for subtype in 1..=GameConfig::SUBTYPE_COUNT {
                table.insert(Archetype {
                    kind,
                    subtype,
                    frames,
                    asset_template: Archetype::DEFAULT_TEMPLATE.to_string(),
                    size: base_size + 0.15 * f32::from(subtype - 1),
                });
            }
        }
        table
    }

    /// Inserts or replaces a row, returning the previous one.
    pub fn insert(&mut self, archetype: Archetype) -> Option<Archetype> {
        self.rows
            .insert((archetype.kind, archetype.subtype), archetype)
    }

    pub fn get(&self, kind: EnemyKind, subtype: u8) -> Option<&Archetype> {
        self.rows.get(&(kind, subtype))
    }

    /// Overlays `overrides` on top of this table.
    pub fn merge(&mut self, overrides: ArchetypeTable) {
        self.rows.extend(overrides.rows);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn stock(kind: EnemyKind) -> (FrameCounts, f32) {
    let frames = |idle, walk, attack, hurt, death| FrameCounts {
        idle,
        walk,
        attack,
        hurt,
        death,
    };
    match kind {
        EnemyKind::Ghost => (frames(4, 4, 6, 3, 7), 1.0),
        EnemyKind::Beholder => (frames(6, 6, 8, 3, 9), 1.1),
        EnemyKind::Demon => (frames(6, 8, 8, 4, 10), 1.2),
        EnemyKind::Lich => (frames(6, 6, 10, 4, 12), 1.2),
        EnemyKind::Dragon => (frames(8, 8, 12, 5, 16), 2.0),
    }
}
