//! Effect kind enum and dispatcher.
//!
//! The set of kinds is closed: adding a variant forces every match below to
//! handle it.

use crate::skill::SkillError;
use crate::skill::execute::EffectApplication;

use super::{
    ApplyStatusEffect, CreateTileEffect, CustomEffect, DamageEffect, EffectResult, HealEffect,
    MoveEffect, RemoveStatusEffect, SpawnEffect, SuppressEffect,
};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    // ========================================================================
    // Offense (hit-tier modulated)
    // ========================================================================
    Damage(DamageEffect),
    Suppress(SuppressEffect),

    // ========================================================================
    // Support
    // ========================================================================
    Heal(HealEffect),
    ApplyStatus(ApplyStatusEffect),
    RemoveStatus(RemoveStatusEffect),

    // ========================================================================
    // Battlefield
    // ========================================================================
    Move(MoveEffect),
    Spawn(SpawnEffect),
    TileEffect(CreateTileEffect),

    /// Forwarded to the registered custom handler.
    Custom(CustomEffect),
}

impl EffectKind {
    /// Applies the effect to the resolved recipient.
    pub fn apply(&self, app: &mut EffectApplication<'_>) -> Result<EffectResult, SkillError> {
        match self {
            EffectKind::Damage(effect) => effect.apply(app),
            EffectKind::Suppress(effect) => effect.apply(app),
            EffectKind::Heal(effect) => effect.apply(app),
            EffectKind::ApplyStatus(effect) => effect.apply(app),
            EffectKind::RemoveStatus(effect) => effect.apply(app),
            EffectKind::Move(effect) => effect.apply(app),
            EffectKind::Spawn(effect) => effect.apply(app),
            EffectKind::TileEffect(effect) => effect.apply(app),
            EffectKind::Custom(effect) => effect.apply(app),
        }
    }

    /// Damage and suppression scale with the recipient's hit tier; every
    /// other kind ignores it.
    pub fn is_hit_modulated(&self) -> bool {
        matches!(self, EffectKind::Damage(_) | EffectKind::Suppress(_))
    }

    /// Rolls drawn from the shared stream when this effect is scheduled, so
    /// its probability gates are fixed at use time.
    pub fn presampled_rolls(&self) -> usize {
        match self {
            EffectKind::ApplyStatus(_) => ApplyStatusEffect::ROLLS,
            EffectKind::Damage(_)
            | EffectKind::Suppress(_)
            | EffectKind::Heal(_)
            | EffectKind::RemoveStatus(_)
            | EffectKind::Move(_)
            | EffectKind::Spawn(_)
            | EffectKind::TileEffect(_)
            | EffectKind::Custom(_) => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Damage(_) => "damage",
            EffectKind::Suppress(_) => "suppress",
            EffectKind::Heal(_) => "heal",
            EffectKind::ApplyStatus(_) => "apply_status",
            EffectKind::RemoveStatus(_) => "remove_status",
            EffectKind::Move(_) => "move",
            EffectKind::Spawn(_) => "spawn",
            EffectKind::TileEffect(_) => "tile_effect",
            EffectKind::Custom(_) => "custom",
        }
    }
}
