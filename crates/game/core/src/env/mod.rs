//! Collaborators the engine consumes but does not own.
//!
//! Oracles expose battlefield geometry, template catalogs, hit-chance tables
//! and the rules that turn resolved damage into hitpoint changes. The
//! [`CombatEnv`] aggregate bundles them so the engine can reach everything it
//! needs without hard coupling to concrete implementations.
mod catalog;
mod error;
mod grid;
mod hit;
mod listener;
mod rng;
mod rules;

pub use catalog::{CatalogOracle, UnitTemplate};
pub use error::OracleError;
pub use grid::{GridDimensions, GridOracle, OpenGrid, PathStop, line_between};
pub use hit::{HitChanceOracle, HitTable};
pub use listener::{CustomEffectHandler, SkillListener, SkillUsed};
pub use rng::{RngStream, RollSource, ScriptedRolls, compute_seed};
pub use rules::{CombatRules, StandardRules};

use crate::config::CombatConfig;

/// Aggregates the collaborators required by skill resolution.
///
/// Grid, catalog, hit-chance table and combat rules are required; asking for
/// a missing one yields a fatal [`OracleError`]. The listener and custom
/// handler are optional.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    config: &'a CombatConfig,
    grid: Option<&'a dyn GridOracle>,
    catalog: Option<&'a dyn CatalogOracle>,
    hit_chance: Option<&'a dyn HitChanceOracle>,
    rules: Option<&'a dyn CombatRules>,
    listener: Option<&'a dyn SkillListener>,
    custom: Option<&'a dyn CustomEffectHandler>,
}

impl<'a> CombatEnv<'a> {
    pub fn new(config: &'a CombatConfig) -> Self {
        Self {
            config,
            grid: None,
            catalog: None,
            hit_chance: None,
            rules: None,
            listener: None,
            custom: None,
        }
    }

    pub fn with_grid(mut self, grid: &'a dyn GridOracle) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_catalog(mut self, catalog: &'a dyn CatalogOracle) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_hit_chance(mut self, hit_chance: &'a dyn HitChanceOracle) -> Self {
        self.hit_chance = Some(hit_chance);
        self
    }

    pub fn with_rules(mut self, rules: &'a dyn CombatRules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_listener(mut self, listener: &'a dyn SkillListener) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn with_custom_handler(mut self, handler: &'a dyn CustomEffectHandler) -> Self {
        self.custom = Some(handler);
        self
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.config
    }

    /// Returns the GridOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::GridNotAvailable` if no grid oracle was provided.
    pub fn grid(&self) -> Result<&'a dyn GridOracle, OracleError> {
        self.grid.ok_or(OracleError::GridNotAvailable)
    }

    /// Returns the CatalogOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CatalogNotAvailable` if no catalog was provided.
    pub fn catalog(&self) -> Result<&'a dyn CatalogOracle, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the HitChanceOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::HitChanceNotAvailable` if no table was provided.
    pub fn hit_chance(&self) -> Result<&'a dyn HitChanceOracle, OracleError> {
        self.hit_chance.ok_or(OracleError::HitChanceNotAvailable)
    }

    /// Returns the CombatRules, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RulesNotAvailable` if no rules were provided.
    pub fn rules(&self) -> Result<&'a dyn CombatRules, OracleError> {
        self.rules.ok_or(OracleError::RulesNotAvailable)
    }

    pub fn listener(&self) -> Option<&'a dyn SkillListener> {
        self.listener
    }

    pub fn custom_handler(&self) -> Option<&'a dyn CustomEffectHandler> {
        self.custom
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("config", self.config)
            .field("grid", &self.grid.is_some())
            .field("catalog", &self.catalog.is_some())
            .field("hit_chance", &self.hit_chance.is_some())
            .field("rules", &self.rules.is_some())
            .field("listener", &self.listener.is_some())
            .field("custom", &self.custom.is_some())
            .finish()
    }
}
