//! Damage descriptors.

use crate::skill::SkillId;
use crate::state::EntityId;

/// Damage type consulted by the combat rules for mitigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    /// Bullets, blades, impacts.
    #[default]
    Kinetic,
    Explosive,
    Fire,
    Energy,
    Toxic,
    /// Ignores all mitigation.
    True,
}

/// Fully resolved damage, after hit-tier modulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageInfo {
    pub amount: u32,
    pub damage_type: DamageType,
    /// `None` for environmental damage with no attributable entity.
    pub source: Option<EntityId>,
    pub skill: SkillId,
    pub armor_penetration: u32,
    pub critical: bool,
}
