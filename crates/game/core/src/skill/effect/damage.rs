//! Damage, suppression and healing.

use crate::combat::{DamageInfo, DamageType, HitTier};
use crate::skill::SkillError;
use crate::skill::execute::EffectApplication;
use crate::state::Property;

use super::{AppliedValue, EffectFlags, EffectResult, EffectTarget, Magnitude};

/// Flags describing how a hit tier shaped an offensive effect.
fn tier_flags(tier: HitTier, can_crit: bool) -> EffectFlags {
    match tier {
        HitTier::Miss => EffectFlags::MISSED,
        HitTier::Graze => EffectFlags::GRAZED,
        HitTier::Critical if can_crit => EffectFlags::CRITICAL,
        HitTier::Critical | HitTier::Hit => EffectFlags::empty(),
    }
}

/// Deal damage to the recipient.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEffect {
    pub value: Magnitude,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub can_crit: bool,
    /// Overrides the source's `ArmorPenetration` property.
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor_penetration: Option<u32>,
}

impl DamageEffect {
    pub fn new(value: Magnitude, damage_type: DamageType) -> Self {
        Self {
            value,
            damage_type,
            can_crit: false,
            armor_penetration: None,
        }
    }

    pub fn with_crit(mut self) -> Self {
        self.can_crit = true;
        self
    }

    pub fn apply(&self, app: &mut EffectApplication<'_>) -> Result<EffectResult, SkillError> {
        let Some(target) = app.live_recipient() else {
            return Ok(EffectResult::no_op(app.recipient));
        };
        let target_id = target.id;
        let tier = app.ctx.hit_tier;
        let flags = tier_flags(tier, self.can_crit);

        if tier == HitTier::Miss {
            return Ok(EffectResult::new(
                Some(target_id),
                AppliedValue::Damage {
                    planned: 0,
                    actual: 0,
                },
            )
            .with_flags(flags));
        }

        let source = &app.ctx.source_properties;
        let base = self.value.resolve(source, target);
        let armor_penetration = self
            .armor_penetration
            .unwrap_or_else(|| source.get(Property::ArmorPenetration).max(0) as u32);
        let amount = tier.modulate(base, self.can_crit, app.ctx.crit_multiplier_percent);

        let info = DamageInfo {
            amount,
            damage_type: self.damage_type,
            source: Some(app.ctx.source),
            skill: app.ctx.skill,
            armor_penetration,
            critical: flags.contains(EffectFlags::CRITICAL),
        };

        let rules = app.env.rules()?;
        let actual = match app.battlefield.entity_mut(target_id) {
            Some(target) => rules.apply_damage(target, &info),
            None => 0,
        };

        Ok(EffectResult::new(
            Some(target_id),
            AppliedValue::Damage {
                planned: amount,
                actual,
            },
        )
        .with_flags(flags))
    }
}

/// Accumulate suppression on the recipient, falling off with distance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuppressEffect {
    pub amount: u32,
    /// Full strength at or within this distance from the source.
    pub near: u32,
    /// Zero strength at or beyond this distance.
    pub far: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub can_crit: bool,
}

impl SuppressEffect {
    /// Linear falloff between `near` and `far`.
    pub fn falloff(&self, distance: u32) -> u32 {
        if distance <= self.near {
            self.amount
        } else if distance >= self.far {
            0
        } else {
            let span = (self.far - self.near) as u64;
            let remaining = (self.far - distance) as u64;
            (self.amount as u64 * remaining / span) as u32
        }
    }

    pub fn apply(&self, app: &mut EffectApplication<'_>) -> Result<EffectResult, SkillError> {
        let Some(target) = app.live_recipient() else {
            return Ok(EffectResult::no_op(app.recipient));
        };
        let target_id = target.id;
        let distance = app.env.grid()?.distance(app.ctx.source_tile, target.tile);

        let tier = app.ctx.hit_tier;
        let amount = tier.modulate(
            self.falloff(distance),
            self.can_crit,
            app.ctx.crit_multiplier_percent,
        );

        let applied = if amount == 0 {
            0
        } else {
            let rules = app.env.rules()?;
            let max = app.env.config().max_suppression;
            match app.battlefield.entity_mut(target_id) {
                Some(target) => rules.apply_suppression(target, amount, max),
                None => 0,
            }
        };

        Ok(EffectResult::new(
            Some(target_id),
            AppliedValue::Suppression { amount: applied },
        )
        .with_flags(tier_flags(tier, self.can_crit)))
    }
}

/// Restore hitpoints. Ignores hit tier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealEffect {
    pub amount: Magnitude,
    /// When set, healing may exceed max hitpoints by this percentage of max.
    #[cfg_attr(feature = "serde", serde(default))]
    pub overheal_percent: Option<u32>,
}

impl HealEffect {
    pub fn apply(&self, app: &mut EffectApplication<'_>) -> Result<EffectResult, SkillError> {
        let recipient = match app.effect.target {
            EffectTarget::SelfTarget => Some(app.ctx.source),
            _ => app.recipient,
        };
        let Some(target) = recipient
            .and_then(|id| app.battlefield.entity(id))
            .filter(|e| e.is_alive())
        else {
            return Ok(EffectResult::no_op(recipient));
        };

        let planned = self.amount.resolve(&app.ctx.source_properties, target);
        let target_id = target.id;

        let Some(target) = app.battlefield.entity_mut(target_id) else {
            return Ok(EffectResult::no_op(recipient));
        };
        let max = target.hp.maximum;
        let cap = match self.overheal_percent {
            Some(percent) => max.saturating_add((max as u64 * percent as u64 / 100) as u32),
            None => max,
        };
        let before = target.hp.current;
        let after = before.saturating_add(planned).min(cap).max(before);
        target.hp.current = after;

        let mut result = EffectResult::new(
            Some(target_id),
            AppliedValue::Healing {
                planned,
                actual: after - before,
            },
        );
        if after > max {
            result = result.with_flags(EffectFlags::OVERHEAL);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppression_falls_off_linearly() {
        let effect = SuppressEffect {
            amount: 40,
            near: 2,
            far: 6,
            can_crit: false,
        };
        assert_eq!(effect.falloff(0), 40);
        assert_eq!(effect.falloff(2), 40);
        assert_eq!(effect.falloff(3), 30);
        assert_eq!(effect.falloff(5), 10);
        assert_eq!(effect.falloff(6), 0);
        assert_eq!(effect.falloff(9), 0);
    }

    #[test]
    fn degenerate_falloff_is_a_step() {
        let effect = SuppressEffect {
            amount: 40,
            near: 3,
            far: 3,
            can_crit: false,
        };
        assert_eq!(effect.falloff(3), 40);
        assert_eq!(effect.falloff(4), 0);
    }
}
