//! Static skill definitions.

use crate::state::{FactionFilter, ResourceKind};

use super::SkillEffect;

/// Identifier of a skill template in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId(pub u16);

impl core::fmt::Display for SkillId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "skill:{}", self.0)
    }
}

/// Immutable definition shared by every entity that owns the skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillTemplate {
    pub id: SkillId,
    pub name: String,
    pub targeting: TargetingRules,
    #[cfg_attr(feature = "serde", serde(default))]
    pub area: AreaSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub costs: SkillCosts,
    /// Applied in declaration order.
    pub effects: Vec<SkillEffect>,
    /// Turns the skill is unavailable after a successful use.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    /// Skips the hit roll; every target resolves as a Hit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub always_hits: bool,
}

impl SkillTemplate {
    pub fn is_area(&self) -> bool {
        self.area.radius > 0
    }
}

/// Where the skill may be aimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetingRules {
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_range: u32,
    pub max_range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_los: bool,
    /// An area skill with this flag still needs a live entity at the aim point.
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_target: bool,
    /// Relationship the primary target must have with the actor.
    #[cfg_attr(feature = "serde", serde(default))]
    pub filter: FactionFilter,
}

/// Area-of-effect footprint. A radius of zero means single target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaSpec {
    #[cfg_attr(feature = "serde", serde(default))]
    pub shape: AreaShape,
    #[cfg_attr(feature = "serde", serde(default))]
    pub radius: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub filter: FactionFilter,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AreaShape {
    /// Euclidean disc.
    #[default]
    Circle,
    /// Chebyshev ball.
    Square,
    /// Manhattan ball.
    Diamond,
    /// Orthogonal arms only.
    Cross,
}

impl AreaShape {
    /// Whether the offset `(dx, dy)` from the center lies inside the shape.
    pub fn contains(self, dx: i32, dy: i32, radius: u32) -> bool {
        let r = radius as i64;
        let (dx, dy) = (dx.unsigned_abs() as i64, dy.unsigned_abs() as i64);
        match self {
            AreaShape::Circle => dx * dx + dy * dy <= r * r,
            AreaShape::Square => dx.max(dy) <= r,
            AreaShape::Diamond => dx + dy <= r,
            AreaShape::Cross => (dx == 0 || dy == 0) && dx + dy <= r,
        }
    }
}

/// Resources paid once per successful use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillCosts {
    #[cfg_attr(feature = "serde", serde(default))]
    pub action_points: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ammo: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub special: u32,
}

impl SkillCosts {
    /// Non-zero costs in payment order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> {
        [
            (ResourceKind::ActionPoints, self.action_points),
            (ResourceKind::Ammo, self.ammo),
            (ResourceKind::Special, self.special),
        ]
        .into_iter()
        .filter(|(_, amount)| *amount > 0)
    }
}
