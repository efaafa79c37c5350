//! Combat resolution primitives.
//!
//! Pure, side-effect free helpers shared by the effect variants:
//!
//! - `resolve_hit_tier`: one roll against a hit/crit chance pair
//! - `HitTier::modulate`: scales offensive magnitudes by tier
//! - `DamageInfo`: the fully resolved damage handed to the combat rules

pub mod damage;
pub mod hit;

pub use damage::{DamageInfo, DamageType};
pub use hit::{HitChance, HitTier, resolve_hit_tier};
