//! Outbound notifications and the custom-effect escape hatch.

use crate::skill::{AppliedValue, CustomEffect, EffectContext, SkillId};
use crate::state::{Battlefield, EntityId};

/// Summary handed to observers after a successful skill use.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillUsed {
    pub actor: EntityId,
    pub skill: SkillId,
    pub targets: Vec<EntityId>,
    pub total_damage: u32,
    pub any_kill: bool,
}

/// Observer for UI, AI and achievement layers.
pub trait SkillListener: Send + Sync {
    fn on_skill_used(&self, _event: &SkillUsed) {}
}

/// Handles `Custom` effects. Without a handler they resolve as no-ops.
pub trait CustomEffectHandler: Send + Sync {
    fn apply(
        &self,
        effect: &CustomEffect,
        recipient: Option<EntityId>,
        ctx: &EffectContext,
        battlefield: &mut Battlefield,
    ) -> AppliedValue;
}
