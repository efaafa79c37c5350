//! Common error infrastructure for tactics-core.
//!
//! Domain errors ([`SkillError`](crate::skill::SkillError),
//! [`OracleError`](crate::env::OracleError)) live next to the code that
//! raises them and implement [`GameError`] for uniform classification.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each failure carries the data needed to explain it
//! - **Severity Classification**: Validation failures are expected control
//!   flow; fatal errors indicate authoring bugs or missing collaborators
//! - **Deterministic**: No error path consumes randomness or mutates state
//!   before validation has passed

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The same request may succeed later (cooldown, resources)
/// - **Validation**: The request itself is wrong (bad target, out of range)
/// - **Internal**: Unexpected state inconsistency that requires investigation
/// - **Fatal**: Missing or malformed template data, missing collaborators
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative request later.
    ///
    /// Examples: skill on cooldown, not enough action points
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: invalid target, out of range, no line of sight
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - authoring bug or missing collaborator, cannot continue.
    ///
    /// Examples: status template missing from the catalog, no grid oracle
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug rather than a bad request.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable identifiers suitable for metrics and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
