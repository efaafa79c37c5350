//! Skill execution pipeline pieces.
//!
//! - `validation`: read-only request checks
//! - `targets`: area and single-target gathering
//! - `context`: frozen per-pass context and the per-application view
//! - `processor`: immediate application and delayed scheduling

mod context;
mod processor;
mod targets;
mod validation;

pub use context::{EffectApplication, EffectContext};
pub use processor::{apply_effect, process_effects, run_scheduled};
pub use targets::gather_targets;
pub use validation::validate;
