//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::skill::SkillId;
use crate::state::{StatusId, TileEffectId, UnitId};

/// Errors that occur when accessing collaborator data.
///
/// A missing collaborator means the engine was wired incorrectly; a missing
/// template means the content references something that was never authored.
/// Both are bugs rather than runtime conditions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("GridOracle not available")]
    GridNotAvailable,

    #[error("CatalogOracle not available")]
    CatalogNotAvailable,

    #[error("HitChanceOracle not available")]
    HitChanceNotAvailable,

    #[error("CombatRules not available")]
    RulesNotAvailable,

    #[error("skill template {0:?} not found")]
    SkillTemplateNotFound(SkillId),

    #[error("status template {0} not found")]
    StatusTemplateNotFound(StatusId),

    #[error("unit template {0:?} not found")]
    UnitTemplateNotFound(UnitId),

    #[error("tile effect template {0} not found")]
    TileEffectTemplateNotFound(TileEffectId),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        // Both wiring gaps and dangling template references are authoring bugs.
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            GridNotAvailable => "ORACLE_GRID_NOT_AVAILABLE",
            CatalogNotAvailable => "ORACLE_CATALOG_NOT_AVAILABLE",
            HitChanceNotAvailable => "ORACLE_HIT_CHANCE_NOT_AVAILABLE",
            RulesNotAvailable => "ORACLE_RULES_NOT_AVAILABLE",
            SkillTemplateNotFound(_) => "ORACLE_SKILL_TEMPLATE_NOT_FOUND",
            StatusTemplateNotFound(_) => "ORACLE_STATUS_TEMPLATE_NOT_FOUND",
            UnitTemplateNotFound(_) => "ORACLE_UNIT_TEMPLATE_NOT_FOUND",
            TileEffectTemplateNotFound(_) => "ORACLE_TILE_EFFECT_TEMPLATE_NOT_FOUND",
        }
    }
}
