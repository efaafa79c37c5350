//! Data-driven combat content and loaders.
//!
//! This crate houses the static catalogs the combat engine consults and
//! provides loaders for RON/TOML data files:
//! - Skill templates (data-driven via RON)
//! - Status templates (data-driven via RON)
//! - Unit templates (data-driven via RON)
//! - Tile-effect templates (data-driven via RON)
//! - Combat configuration (data-driven via TOML)
//!
//! Content is consumed through the core's catalog oracle and never appears
//! in battlefield state. Cross references are validated at load time so
//! authoring mistakes fail fast instead of surfacing mid-battle.

pub mod registry;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use registry::ContentRegistry;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
