//! Skill use errors.
//!
//! Validation failures are returned before anything is mutated. Fatal
//! variants indicate authoring bugs or miswired collaborators.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, ResourceKind, StatusId};

use super::SkillId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("actor {0} is dead")]
    ActorDead(EntityId),

    #[error("actor {actor} does not have {skill}")]
    SkillNotFound { actor: EntityId, skill: SkillId },

    #[error("{skill} is on cooldown for {remaining} more turns")]
    OnCooldown { skill: SkillId, remaining: u32 },

    #[error("not enough {resource}: requires {required}, has {available}")]
    InsufficientResource {
        resource: ResourceKind,
        required: u32,
        available: u32,
    },

    #[error("skills are blocked by {status}")]
    BlockedByStatus { status: StatusId },

    #[error("invalid target")]
    InvalidTarget,

    #[error("target at distance {distance} is outside range {min}..={max}")]
    OutOfRange { distance: u32, min: u32, max: u32 },

    #[error("no line of sight to target")]
    NoLineOfSight,

    #[error("effect failed: {0}")]
    EffectFailed(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl SkillError {
    /// Whether this is a pre-mutation validation failure.
    pub fn is_validation(&self) -> bool {
        !matches!(self, SkillError::EffectFailed(_) | SkillError::Oracle(_))
    }
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        use SkillError::*;
        match self {
            OnCooldown { .. } | InsufficientResource { .. } | BlockedByStatus { .. } => {
                ErrorSeverity::Recoverable
            }
            ActorNotFound(_) | ActorDead(_) | SkillNotFound { .. } => ErrorSeverity::Validation,
            InvalidTarget | OutOfRange { .. } | NoLineOfSight => ErrorSeverity::Validation,
            EffectFailed(_) => ErrorSeverity::Internal,
            Oracle(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use SkillError::*;
        match self {
            ActorNotFound(_) => "SKILL_ACTOR_NOT_FOUND",
            ActorDead(_) => "SKILL_ACTOR_DEAD",
            SkillNotFound { .. } => "SKILL_NOT_FOUND",
            OnCooldown { .. } => "SKILL_ON_COOLDOWN",
            InsufficientResource { .. } => "SKILL_INSUFFICIENT_RESOURCE",
            BlockedByStatus { .. } => "SKILL_BLOCKED_BY_STATUS",
            InvalidTarget => "SKILL_INVALID_TARGET",
            OutOfRange { .. } => "SKILL_OUT_OF_RANGE",
            NoLineOfSight => "SKILL_NO_LINE_OF_SIGHT",
            EffectFailed(_) => "SKILL_EFFECT_FAILED",
            Oracle(e) => e.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_expected_failures() {
        let cooldown = SkillError::OnCooldown {
            skill: SkillId(1),
            remaining: 2,
        };
        assert_eq!(cooldown.severity(), ErrorSeverity::Recoverable);
        assert_eq!(cooldown.error_code(), "SKILL_ON_COOLDOWN");
        assert!(cooldown.is_validation());

        let missing = SkillError::from(OracleError::StatusTemplateNotFound(StatusId(9)));
        assert_eq!(missing.severity(), ErrorSeverity::Fatal);
        assert!(!missing.is_validation());
        assert_eq!(missing.error_code(), "ORACLE_STATUS_TEMPLATE_NOT_FOUND");
    }
}
