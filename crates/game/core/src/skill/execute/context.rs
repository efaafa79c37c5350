//! Effect execution context.

use std::sync::Arc;

use crate::combat::HitTier;
use crate::env::{CombatEnv, RollSource};
use crate::skill::{SkillEffect, SkillId};
use crate::state::{Battlefield, Entity, EntityId, Faction, Properties, Tile, Turn};

/// Frozen description of one resolution pass of a skill use.
///
/// Built once per gathered target and never mutated; area re-expansion
/// derives a new value per recipient. Because it is plain data it can be
/// captured by delayed effects and persisted with them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectContext {
    pub skill: SkillId,
    pub source: EntityId,
    pub source_faction: Faction,
    pub source_tile: Tile,
    /// Actor's critical multiplier in percent, captured at use time.
    pub crit_multiplier_percent: u32,
    /// Actor's properties at use time. Scaled magnitudes and armor
    /// penetration read these, never the live entity.
    pub source_properties: Properties,
    /// Primary target of this pass; `None` for a tile-only pass.
    pub target: Option<EntityId>,
    pub target_tile: Tile,
    pub hit_tier: HitTier,
    /// Entities gathered for the whole use, shared by every pass.
    pub affected: Arc<[EntityId]>,
    /// True for the one pass that also runs self and tile effects.
    pub lead: bool,
    /// Turn the skill was used on.
    pub turn: Turn,
}

impl EffectContext {
    /// Sub-context aimed at `recipient` standing on `tile`.
    pub fn derive_for(&self, recipient: EntityId, tile: Tile) -> Self {
        Self {
            target: Some(recipient),
            target_tile: tile,
            ..self.clone()
        }
    }

    pub fn is_affected(&self, entity: EntityId) -> bool {
        self.affected.contains(&entity)
    }
}

/// Everything a single effect application may touch.
pub struct EffectApplication<'a> {
    pub effect: &'a SkillEffect,
    pub ctx: &'a EffectContext,
    /// Entity the effect lands on, already resolved from the target type.
    pub recipient: Option<EntityId>,
    pub battlefield: &'a mut Battlefield,
    pub env: &'a CombatEnv<'a>,
    pub rolls: &'a mut dyn RollSource,
}

impl EffectApplication<'_> {
    /// The recipient if it exists and is alive.
    pub fn live_recipient(&self) -> Option<&Entity> {
        self.recipient
            .and_then(|id| self.battlefield.entity(id))
            .filter(|e| e.is_alive())
    }
}
