//! Hit-chance tables.

use crate::combat::HitChance;
use crate::config::HitTableParams;
use crate::state::{Entity, Property, Tile};

/// Computes the to-hit and crit percentages for one attacker/defender pair.
///
/// Must be a pure function of its inputs.
pub trait HitChanceOracle: Send + Sync {
    fn calculate_hit_chance(
        &self,
        attacker: &Entity,
        defender: &Entity,
        from: Tile,
        to: Tile,
    ) -> HitChance;
}

/// Accuracy-versus-defense table with a per-tile range penalty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitTable {
    params: HitTableParams,
}

impl HitTable {
    pub fn new(params: HitTableParams) -> Self {
        Self { params }
    }
}

impl HitChanceOracle for HitTable {
    fn calculate_hit_chance(
        &self,
        attacker: &Entity,
        defender: &Entity,
        from: Tile,
        to: Tile,
    ) -> HitChance {
        let distance = (to.x - from.x).abs().max((to.y - from.y).abs());
        let raw = self.params.base + attacker.property(Property::Accuracy)
            - defender.property(Property::Defense)
            - self.params.range_penalty_per_tile as i32 * distance;
        let hit = raw.clamp(self.params.min as i32, self.params.max as i32);
        let crit = attacker.property(Property::CritChance).clamp(0, 99);

        HitChance::new(hit as f32, crit as f32)
    }
}
