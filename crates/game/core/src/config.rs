/// Combat tuning constants and data-driven balance parameters.
///
/// Loaded from TOML by the content crate; every field has a default so a
/// partial file only overrides what it names.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Upper share of the hit window that resolves to a graze, in percent.
    pub graze_window_percent: u32,

    /// Critical multiplier (percent) used when the actor carries no
    /// `CritMultiplier` property of its own.
    pub default_crit_multiplier_percent: u32,

    /// Parameters for the default hit-chance table.
    pub hit_table: HitTableParams,

    /// Suppression ceiling applied by the standard combat rules.
    pub max_suppression: u32,

    /// Kinetic damage dealt by a forced move that hits an obstacle, unless
    /// the move effect names its own amount.
    pub collision_damage: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_SKILLS: usize = 12;

    /// How far a spawn effect searches around its tile for free placement.
    pub const SPAWN_SEARCH_RADIUS: u32 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GRAZE_WINDOW_PERCENT: u32 = 15;
    pub const DEFAULT_CRIT_MULTIPLIER_PERCENT: u32 = 150;
    pub const DEFAULT_MAX_SUPPRESSION: u32 = 100;
    pub const DEFAULT_COLLISION_DAMAGE: u32 = 5;

    pub fn new() -> Self {
        Self {
            graze_window_percent: Self::DEFAULT_GRAZE_WINDOW_PERCENT,
            default_crit_multiplier_percent: Self::DEFAULT_CRIT_MULTIPLIER_PERCENT,
            hit_table: HitTableParams::default(),
            max_suppression: Self::DEFAULT_MAX_SUPPRESSION,
            collision_damage: Self::DEFAULT_COLLISION_DAMAGE,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Inputs of the standard accuracy-versus-defense hit table.
///
/// ```text
/// final_hit_chance = clamp(base + accuracy - defense - range_penalty * distance, min, max)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitTableParams {
    pub base: i32,
    pub min: u32,
    pub max: u32,
    pub range_penalty_per_tile: u32,
}

impl Default for HitTableParams {
    fn default() -> Self {
        Self {
            base: 65,
            min: 5,
            max: 95,
            range_penalty_per_tile: 2,
        }
    }
}
