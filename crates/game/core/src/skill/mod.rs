//! Skill domain: templates, effects and the execution pipeline.
//!
//! # Module Structure
//!
//! - `template`: static skill definitions (targeting, area, costs)
//! - `effect`: effect variants and their results
//! - `execute`: validation, target gathering, effect processing
//! - `error`: [`SkillError`]

pub mod effect;
pub mod error;
pub mod execute;
pub mod template;

pub use effect::{
    AppliedValue, ApplyStatusEffect, CreateTileEffect, CustomEffect, DamageEffect, EffectFlags,
    EffectKind, EffectResult, EffectTarget, HealEffect, Magnitude, MoveEffect, MoveKind,
    RemoveStatusEffect, SkillEffect, SpawnEffect, SuppressEffect,
};
pub use error::SkillError;
pub use execute::{EffectApplication, EffectContext};
pub use template::{AreaShape, AreaSpec, SkillCosts, SkillId, SkillTemplate, TargetingRules};
