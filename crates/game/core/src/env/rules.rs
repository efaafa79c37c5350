//! Damage and suppression application.
//!
//! The engine decides *how much* damage or suppression an effect deals; the
//! rules decide what that does to the entity (armor, absorption, caps).

use crate::combat::{DamageInfo, DamageType};
use crate::state::{Entity, Property};

pub trait CombatRules: Send + Sync {
    /// Applies resolved damage and returns the hitpoints actually removed.
    fn apply_damage(&self, target: &mut Entity, damage: &DamageInfo) -> u32;

    /// Adds suppression and returns the amount actually accumulated.
    fn apply_suppression(&self, target: &mut Entity, amount: u32, max: u32) -> u32;
}

/// Flat armor reduction and capped suppression.
///
/// `Armor` minus the attack's armor penetration is subtracted from every
/// non-`True` hit; the remainder is capped at current hitpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardRules;

impl CombatRules for StandardRules {
    fn apply_damage(&self, target: &mut Entity, damage: &DamageInfo) -> u32 {
        let mitigation = match damage.damage_type {
            DamageType::True => 0,
            _ => {
                let armor = target.property(Property::Armor).max(0) as u32;
                armor.saturating_sub(damage.armor_penetration)
            }
        };

        let actual = damage
            .amount
            .saturating_sub(mitigation)
            .min(target.hp.current);
        target.hp.current -= actual;
        actual
    }

    fn apply_suppression(&self, target: &mut Entity, amount: u32, max: u32) -> u32 {
        let before = target.suppression;
        target.suppression = before.saturating_add(amount).min(max);
        target.suppression.saturating_sub(before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::SkillId;
    use crate::state::{EntityId, Faction, Properties, Tile};

    fn armored(armor: i32) -> Entity {
        Entity::new(EntityId(2), "target", Faction::Enemy, Tile::ORIGIN, 20)
            .with_properties(Properties::default().with(Property::Armor, armor))
    }

    fn hit(amount: u32, damage_type: DamageType, armor_penetration: u32) -> DamageInfo {
        DamageInfo {
            amount,
            damage_type,
            source: Some(EntityId(1)),
            skill: SkillId(1),
            armor_penetration,
            critical: false,
        }
    }

    #[test]
    fn armor_reduces_and_penetration_negates() {
        let rules = StandardRules;

        let mut target = armored(3);
        assert_eq!(rules.apply_damage(&mut target, &hit(10, DamageType::Kinetic, 0)), 7);
        assert_eq!(target.hp.current, 13);

        let mut target = armored(3);
        assert_eq!(rules.apply_damage(&mut target, &hit(10, DamageType::Kinetic, 2)), 9);

        let mut target = armored(3);
        assert_eq!(rules.apply_damage(&mut target, &hit(10, DamageType::True, 0)), 10);
    }

    #[test]
    fn damage_is_capped_at_current_hp() {
        let rules = StandardRules;
        let mut target = armored(0);
        assert_eq!(rules.apply_damage(&mut target, &hit(50, DamageType::Fire, 0)), 20);
        assert!(!target.is_alive());
    }

    #[test]
    fn suppression_is_capped() {
        let rules = StandardRules;
        let mut target = armored(0);
        assert_eq!(rules.apply_suppression(&mut target, 60, 100), 60);
        assert_eq!(rules.apply_suppression(&mut target, 60, 100), 40);
        assert_eq!(target.suppression, 100);
    }
}
