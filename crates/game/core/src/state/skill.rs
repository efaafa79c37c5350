//! Per-entity runtime skill state.

use std::sync::Arc;

use crate::skill::{SkillId, SkillTemplate};

/// A skill owned by an entity: the shared static template plus the entity's
/// remaining cooldown. Cooldown is written only by the skill orchestrator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub template: Arc<SkillTemplate>,
    pub cooldown: u32,
}

impl Skill {
    pub fn new(template: Arc<SkillTemplate>) -> Self {
        Self {
            template,
            cooldown: 0,
        }
    }

    pub fn id(&self) -> SkillId {
        self.template.id
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown == 0
    }
}
