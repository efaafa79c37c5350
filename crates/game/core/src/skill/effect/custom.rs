use std::collections::BTreeMap;

use crate::skill::SkillError;
use crate::skill::execute::EffectApplication;

use super::EffectResult;

/// Escape hatch for behavior the built-in kinds do not cover.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomEffect {
    pub tag: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: BTreeMap<String, i32>,
}

impl CustomEffect {
    pub fn apply(&self, app: &mut EffectApplication<'_>) -> Result<EffectResult, SkillError> {
        let Some(handler) = app.env.custom_handler() else {
            tracing::debug!(
                target: "combat::effect",
                tag = %self.tag,
                "no custom handler registered"
            );
            return Ok(EffectResult::no_op(app.recipient));
        };
        let value = handler.apply(self, app.recipient, app.ctx, app.battlefield);
        Ok(EffectResult::new(app.recipient, value))
    }
}
