//! Scripted battle simulator.
//!
//! Loads combat content and a scenario, then drives the engine turn by turn
//! the way a game's turn loop would. Exists to exercise skill resolution
//! end to end and to print a replay digest that must not change between runs.

pub mod config;
pub mod runner;
pub mod scenario;

pub use config::SimConfig;
pub use runner::{RunReport, run};
pub use scenario::{Placement, Scenario, ScriptedUse};
