//! Status application and removal.

use crate::env::OracleError;
use crate::skill::SkillError;
use crate::skill::execute::EffectApplication;
use crate::state::{Property, StatusChange, StatusId};

use super::{AppliedValue, EffectFlags, EffectResult};

/// Apply a status, gated by an apply chance and the recipient's resistance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplyStatusEffect {
    pub status: StatusId,
    /// Percent chance to apply at all.
    #[cfg_attr(feature = "serde", serde(default = "always"))]
    pub chance: u32,
    #[cfg_attr(feature = "serde", serde(default = "one_stack"))]
    pub stacks: u32,
    /// Whether the recipient's `Resistance` property can shrug it off.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistible: bool,
}

#[cfg(feature = "serde")]
fn always() -> u32 {
    100
}

#[cfg(feature = "serde")]
fn one_stack() -> u32 {
    1
}

impl ApplyStatusEffect {
    /// Upper bound on rolls one application draws (apply chance, resistance).
    pub const ROLLS: usize = 2;

    pub fn new(status: StatusId) -> Self {
        Self {
            status,
            chance: 100,
            stacks: 1,
            resistible: false,
        }
    }

    pub fn apply(&self, app: &mut EffectApplication<'_>) -> Result<EffectResult, SkillError> {
        let catalog = app.env.catalog()?;
        let template = catalog
            .status(self.status)
            .ok_or(OracleError::StatusTemplateNotFound(self.status))?;

        let Some(target) = app.live_recipient() else {
            return Ok(EffectResult::no_op(app.recipient));
        };
        let target_id = target.id;
        let resistance = target.property(Property::Resistance);

        // Gate order is fixed: apply chance first, then resistance.
        if self.chance < 100 {
            let roll = app.rolls.roll_percent();
            if roll >= self.chance as f32 {
                return Ok(EffectResult::no_op(Some(target_id)));
            }
        }
        if self.resistible && resistance > 0 {
            let roll = app.rolls.roll_percent();
            if roll < resistance as f32 {
                return Ok(EffectResult::no_op(Some(target_id)).with_flags(EffectFlags::RESISTED));
            }
        }

        let duration = app.effect.duration_or(template.default_duration);
        let source = Some(app.ctx.source);
        let Some(target) = app.battlefield.entity_mut(target_id) else {
            return Ok(EffectResult::no_op(Some(target_id)));
        };

        match target.statuses.add(template, duration, self.stacks, source) {
            StatusChange::Added { stacks } | StatusChange::Merged { stacks } => {
                Ok(EffectResult::new(
                    Some(target_id),
                    AppliedValue::StatusApplied {
                        status: self.status,
                        duration,
                        stacks,
                    },
                ))
            }
            StatusChange::Rejected => {
                tracing::debug!(
                    target: "combat::effect",
                    entity = %target_id,
                    status = %self.status,
                    "status collection full"
                );
                Ok(EffectResult::no_op(Some(target_id)))
            }
        }
    }
}

/// Remove stacks of a status (all of them when `stacks` is `None`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveStatusEffect {
    pub status: StatusId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacks: Option<u32>,
}

impl RemoveStatusEffect {
    pub fn apply(&self, app: &mut EffectApplication<'_>) -> Result<EffectResult, SkillError> {
        let Some(target_id) = app.live_recipient().map(|e| e.id) else {
            return Ok(EffectResult::no_op(app.recipient));
        };
        let removed = app
            .battlefield
            .entity_mut(target_id)
            .map_or(0, |e| e.statuses.remove(self.status, self.stacks));

        if removed == 0 {
            return Ok(EffectResult::no_op(Some(target_id)));
        }
        Ok(EffectResult::new(
            Some(target_id),
            AppliedValue::StatusRemoved {
                status: self.status,
                stacks: removed,
            },
        ))
    }
}
