//! Effect definitions.
//!
//! A [`SkillEffect`] is one entry in a skill's ordered effect list: the common
//! fields (recipient selection, delay, duration override) plus an
//! [`EffectKind`] carrying the kind-specific parameters.

mod custom;
mod damage;
mod kinds;
mod movement;
mod result;
mod spawn;
mod status;
mod tile;
mod value;

pub use custom::CustomEffect;
pub use damage::{DamageEffect, HealEffect, SuppressEffect};
pub use kinds::EffectKind;
pub use movement::{MoveEffect, MoveKind};
pub use result::{AppliedValue, EffectFlags, EffectResult};
pub use spawn::SpawnEffect;
pub use status::{ApplyStatusEffect, RemoveStatusEffect};
pub use tile::CreateTileEffect;
pub use value::Magnitude;

use crate::state::FactionFilter;

/// One effect of a skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillEffect {
    pub kind: EffectKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: EffectTarget,
    /// Turns to wait before applying; zero applies immediately.
    #[cfg_attr(feature = "serde", serde(default))]
    pub delay: u32,
    /// Duration override for statuses and tile effects; negative means the
    /// template default.
    #[cfg_attr(feature = "serde", serde(default = "default_duration"))]
    pub duration: i32,
}

#[cfg(feature = "serde")]
fn default_duration() -> i32 {
    -1
}

impl SkillEffect {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            target: EffectTarget::Target,
            delay: 0,
            duration: -1,
        }
    }

    pub fn targeting(mut self, target: EffectTarget) -> Self {
        self.target = target;
        self
    }

    pub fn delayed(mut self, turns: u32) -> Self {
        self.delay = turns;
        self
    }

    pub fn lasting(mut self, turns: u32) -> Self {
        self.duration = turns as i32;
        self
    }

    pub fn is_delayed(&self) -> bool {
        self.delay > 0
    }

    /// Explicit duration, or `fallback` when not overridden.
    pub fn duration_or(&self, fallback: u32) -> u32 {
        u32::try_from(self.duration).unwrap_or(fallback)
    }
}

/// How an effect picks its recipient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTarget {
    /// The entity the current resolution pass is aimed at.
    #[default]
    Target,
    /// The acting entity. Applied once per use.
    #[cfg_attr(feature = "serde", serde(rename = "Self"))]
    SelfTarget,
    /// The aimed tile. Applied once per use.
    Tile,
    /// Every gathered entity.
    Area,
    /// Gathered entities allied with the actor, the actor included.
    AlliesInArea,
    /// Gathered entities hostile to the actor.
    EnemiesInArea,
}

impl EffectTarget {
    /// Self and tile effects run once per use, not once per gathered target.
    pub fn is_per_use(self) -> bool {
        matches!(self, EffectTarget::SelfTarget | EffectTarget::Tile)
    }

    /// Faction policy for area re-expansion, `None` for non-area targets.
    pub fn area_filter(self) -> Option<FactionFilter> {
        match self {
            EffectTarget::Area => Some(FactionFilter::Any),
            EffectTarget::AlliesInArea => Some(FactionFilter::Allies),
            EffectTarget::EnemiesInArea => Some(FactionFilter::Enemies),
            _ => None,
        }
    }
}
