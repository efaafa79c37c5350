//! Deterministic combat-effect resolution for a turn-based tactics game.
//!
//! `tactics-core` turns a "use this skill on this target/tile" request into
//! validated, costed, hit-resolved and applied battlefield changes. All
//! mutation flows through [`engine::SkillContainer`]; every probabilistic
//! decision of one skill use draws from a single [`env::RngStream`] seeded
//! from the current turn and the acting entity, so replays are bit-identical.
//!
//! Collaborators the engine consumes but does not own (grid geometry, damage
//! application, hit-chance tables, catalogs, the delayed-effect queue) are
//! expressed as traits in [`env`] and [`engine::scheduler`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod skill;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use combat::{DamageInfo, DamageType, HitChance, HitTier, resolve_hit_tier};
pub use config::{CombatConfig, HitTableParams};
pub use engine::{
    EffectScheduler, ScheduledEffect, SkillContainer, SkillOutcome, SkillRequest, TargetOutcome,
    TurnQueue,
};
pub use env::{
    CatalogOracle, CombatEnv, CombatRules, CustomEffectHandler, GridDimensions, GridOracle,
    HitChanceOracle, HitTable, OpenGrid, OracleError, PathStop, RngStream, RollSource,
    ScriptedRolls, SkillListener, SkillUsed, StandardRules, UnitTemplate,
};
pub use error::{ErrorSeverity, GameError};
pub use skill::{
    AppliedValue, AreaShape, AreaSpec, EffectContext, EffectFlags, EffectKind, EffectResult,
    EffectTarget, Magnitude, SkillCosts, SkillEffect, SkillError, SkillId, SkillTemplate,
    TargetingRules,
};
pub use state::{
    Battlefield, CombatResources, Entity, EntityId, Faction, FactionFilter, Properties, Property,
    ResourceKind, ResourceMeter, Skill, StackPolicy, StatusCollection, StatusId, StatusInstance,
    StatusTemplate, Tile, TileEffectId, TileEffectInstance, TileEffectTemplate, TileEffects, Turn,
    UnitId,
};
