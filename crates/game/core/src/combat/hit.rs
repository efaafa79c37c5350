//! Hit tiers.

/// To-hit and crit percentages for one attacker/defender pair.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitChance {
    pub final_hit_chance: f32,
    pub crit_chance: f32,
}

impl HitChance {
    pub fn new(final_hit_chance: f32, crit_chance: f32) -> Self {
        Self {
            final_hit_chance,
            crit_chance,
        }
    }
}

/// Coarse outcome of a to-hit roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitTier {
    Miss,
    Graze,
    Hit,
    Critical,
}

impl HitTier {
    /// Scales an offensive magnitude.
    ///
    /// Miss zeroes, Graze halves (rounding down), Critical multiplies by
    /// `crit_multiplier_percent` when the effect allows crits and otherwise
    /// behaves like a Hit.
    pub fn modulate(self, amount: u32, can_crit: bool, crit_multiplier_percent: u32) -> u32 {
        match self {
            HitTier::Miss => 0,
            HitTier::Graze => amount / 2,
            HitTier::Hit => amount,
            HitTier::Critical if can_crit => {
                (amount as u64 * crit_multiplier_percent as u64 / 100).min(u32::MAX as u64) as u32
            }
            HitTier::Critical => amount,
        }
    }
}

/// Resolves a roll in `[0, 100)` into a hit tier.
///
/// Checks run Miss, Graze, Critical, Hit. The graze band is the top
/// `graze_window_percent` of the hit window, so where it overlaps the crit
/// window a roll resolves as Graze.
pub fn resolve_hit_tier(chance: HitChance, roll: f32, graze_window_percent: u32) -> HitTier {
    let hit = chance.final_hit_chance;
    let graze_floor = hit * (100 - graze_window_percent.min(100)) as f32 / 100.0;

    if roll >= hit {
        HitTier::Miss
    } else if roll >= graze_floor {
        HitTier::Graze
    } else if roll < chance.crit_chance {
        HitTier::Critical
    } else {
        HitTier::Hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_rolls_resolve_to_expected_tiers() {
        let chance = HitChance::new(75.0, 5.0);
        assert_eq!(resolve_hit_tier(chance, 4.0, 15), HitTier::Critical);
        assert_eq!(resolve_hit_tier(chance, 10.0, 15), HitTier::Hit);
        assert_eq!(resolve_hit_tier(chance, 70.0, 15), HitTier::Graze);
        assert_eq!(resolve_hit_tier(chance, 80.0, 15), HitTier::Miss);
    }

    #[test]
    fn graze_boundaries_are_half_open() {
        let chance = HitChance::new(80.0, 0.0);
        assert_eq!(resolve_hit_tier(chance, 68.0, 15), HitTier::Graze);
        assert_eq!(resolve_hit_tier(chance, 67.9, 15), HitTier::Hit);
        assert_eq!(resolve_hit_tier(chance, 80.0, 15), HitTier::Miss);
    }

    #[test]
    fn graze_wins_where_it_overlaps_crit() {
        let chance = HitChance::new(50.0, 49.0);
        assert_eq!(resolve_hit_tier(chance, 45.0, 15), HitTier::Graze);
        assert_eq!(resolve_hit_tier(chance, 40.0, 15), HitTier::Critical);
    }

    #[test]
    fn zero_hit_chance_always_misses() {
        let chance = HitChance::new(0.0, 0.0);
        assert_eq!(resolve_hit_tier(chance, 0.0, 15), HitTier::Miss);
    }

    #[test]
    fn modulation_by_tier() {
        assert_eq!(HitTier::Miss.modulate(10, true, 150), 0);
        assert_eq!(HitTier::Graze.modulate(11, true, 150), 5);
        assert_eq!(HitTier::Hit.modulate(11, true, 150), 11);
        assert_eq!(HitTier::Critical.modulate(11, true, 150), 16);
        assert_eq!(HitTier::Critical.modulate(11, false, 150), 11);
    }
}
