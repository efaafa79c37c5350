//! In-memory content registry.
//!
//! Holds every template the engine may look up during a battle and serves
//! them through [`CatalogOracle`]. Registration rejects duplicate ids;
//! [`ContentRegistry::validate`] checks cross references and value ranges
//! once everything is registered.

use std::collections::BTreeMap;
use std::sync::Arc;

use tactics_core::{
    CatalogOracle, EffectKind, SkillId, SkillTemplate, StatusId, StatusTemplate, TileEffectId,
    TileEffectTemplate, UnitId, UnitTemplate,
};

/// Registry of skill, status, unit and tile-effect templates keyed by id.
#[derive(Clone, Debug, Default)]
pub struct ContentRegistry {
    skills: BTreeMap<SkillId, Arc<SkillTemplate>>,
    statuses: BTreeMap<StatusId, StatusTemplate>,
    units: BTreeMap<UnitId, UnitTemplate>,
    tile_effects: BTreeMap<TileEffectId, TileEffectTemplate>,
}

impl ContentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a skill template.
    ///
    /// # Errors
    ///
    /// Returns an error if a skill with the same id is already registered.
    pub fn add_skill(&mut self, template: SkillTemplate) -> Result<(), String> {
        if self.skills.contains_key(&template.id) {
            return Err(format!("Duplicate skill id {}", template.id));
        }
        self.skills.insert(template.id, Arc::new(template));
        Ok(())
    }

    /// Registers a status template.
    pub fn add_status(&mut self, template: StatusTemplate) -> Result<(), String> {
        if self.statuses.contains_key(&template.id) {
            return Err(format!("Duplicate status id {}", template.id));
        }
        self.statuses.insert(template.id, template);
        Ok(())
    }

    /// Registers a unit template.
    pub fn add_unit(&mut self, template: UnitTemplate) -> Result<(), String> {
        if self.units.contains_key(&template.id) {
            return Err(format!("Duplicate unit id {}", template.id));
        }
        self.units.insert(template.id, template);
        Ok(())
    }

    /// Registers a tile-effect template.
    pub fn add_tile_effect(&mut self, template: TileEffectTemplate) -> Result<(), String> {
        if self.tile_effects.contains_key(&template.id) {
            return Err(format!("Duplicate tile effect id {}", template.id));
        }
        self.tile_effects.insert(template.id, template);
        Ok(())
    }

    pub fn skills(&self) -> impl Iterator<Item = &Arc<SkillTemplate>> {
        self.skills.values()
    }

    pub fn statuses(&self) -> impl Iterator<Item = &StatusTemplate> {
        self.statuses.values()
    }

    pub fn units(&self) -> impl Iterator<Item = &UnitTemplate> {
        self.units.values()
    }

    pub fn tile_effects(&self) -> impl Iterator<Item = &TileEffectTemplate> {
        self.tile_effects.values()
    }

    /// Looks up a unit template by its display name.
    pub fn unit_by_name(&self, name: &str) -> Option<&UnitTemplate> {
        self.units.values().find(|unit| unit.name == name)
    }

    /// Checks every cross reference and value range.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending template.
    pub fn validate(&self) -> Result<(), String> {
        for status in self.statuses.values() {
            if status.max_stacks == 0 {
                return Err(format!("Status {} ('{}') has zero max_stacks", status.id, status.name));
            }
        }

        for unit in self.units.values() {
            if unit.hp == 0 {
                return Err(format!("Unit {} ('{}') has zero hp", unit.id, unit.name));
            }
            if let Some(missing) = unit.skills.iter().find(|id| !self.skills.contains_key(id)) {
                return Err(format!(
                    "Unit {} ('{}') references unknown skill {}",
                    unit.id, unit.name, missing
                ));
            }
        }

        for skill in self.skills.values() {
            self.validate_skill(skill)
                .map_err(|e| format!("Skill {} ('{}'): {}", skill.id, skill.name, e))?;
        }

        Ok(())
    }

    fn validate_skill(&self, skill: &SkillTemplate) -> Result<(), String> {
        let targeting = &skill.targeting;
        if targeting.max_range == 0 {
            return Err("max_range must be positive".into());
        }
        if targeting.min_range > targeting.max_range {
            return Err(format!(
                "min_range {} exceeds max_range {}",
                targeting.min_range, targeting.max_range
            ));
        }
        if skill.effects.is_empty() {
            return Err("no effects".into());
        }

        for (index, effect) in skill.effects.iter().enumerate() {
            match &effect.kind {
                EffectKind::ApplyStatus(apply) => {
                    self.require_status(apply.status, index)?;
                    if apply.chance == 0 || apply.chance > 100 {
                        return Err(format!(
                            "effect #{index}: apply chance {} outside 1..=100",
                            apply.chance
                        ));
                    }
                }
                EffectKind::RemoveStatus(remove) => self.require_status(remove.status, index)?,
                EffectKind::Suppress(suppress) => {
                    if suppress.near >= suppress.far {
                        return Err(format!(
                            "effect #{index}: suppression falloff near {} must be below far {}",
                            suppress.near, suppress.far
                        ));
                    }
                }
                EffectKind::Spawn(spawn) => {
                    if !self.units.contains_key(&spawn.unit) {
                        return Err(format!("effect #{index}: unknown unit {}", spawn.unit));
                    }
                    if spawn.count == 0 {
                        return Err(format!("effect #{index}: spawn count is zero"));
                    }
                }
                EffectKind::TileEffect(tile) => {
                    if !self.tile_effects.contains_key(&tile.template) {
                        return Err(format!(
                            "effect #{index}: unknown tile effect {}",
                            tile.template
                        ));
                    }
                }
                EffectKind::Damage(_)
                | EffectKind::Heal(_)
                | EffectKind::Move(_)
                | EffectKind::Custom(_) => {}
            }
        }
        Ok(())
    }

    fn require_status(&self, status: StatusId, index: usize) -> Result<(), String> {
        if self.statuses.contains_key(&status) {
            Ok(())
        } else {
            Err(format!("effect #{index}: unknown status {status}"))
        }
    }
}

impl CatalogOracle for ContentRegistry {
    fn skill(&self, id: SkillId) -> Option<Arc<SkillTemplate>> {
        self.skills.get(&id).cloned()
    }

    fn status(&self, id: StatusId) -> Option<&StatusTemplate> {
        self.statuses.get(&id)
    }

    fn unit(&self, id: UnitId) -> Option<&UnitTemplate> {
        self.units.get(&id)
    }

    fn tile_effect(&self, id: TileEffectId) -> Option<&TileEffectTemplate> {
        self.tile_effects.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::skill::{ApplyStatusEffect, DamageEffect, SpawnEffect, SuppressEffect};
    use tactics_core::{
        AreaSpec, DamageType, FactionFilter, Magnitude, SkillCosts, SkillEffect, StackPolicy,
        TargetingRules,
    };

    fn skill(id: u16, effects: Vec<SkillEffect>) -> SkillTemplate {
        SkillTemplate {
            id: SkillId(id),
            name: format!("skill-{id}"),
            targeting: TargetingRules {
                min_range: 1,
                max_range: 5,
                requires_los: true,
                requires_target: true,
                filter: FactionFilter::Enemies,
            },
            area: AreaSpec::default(),
            costs: SkillCosts::default(),
            effects,
            cooldown: 0,
            always_hits: false,
        }
    }

    fn shot() -> SkillEffect {
        SkillEffect::new(EffectKind::Damage(DamageEffect::new(
            Magnitude::Flat(6),
            DamageType::Kinetic,
        )))
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut registry = ContentRegistry::new();
        registry.add_skill(skill(1, vec![shot()])).unwrap();
        let err = registry.add_skill(skill(1, vec![shot()])).unwrap_err();
        assert!(err.contains("skill:1"));
    }

    #[test]
    fn unknown_status_reference_fails_validation() {
        let mut registry = ContentRegistry::new();
        let poison = SkillEffect::new(EffectKind::ApplyStatus(ApplyStatusEffect::new(StatusId(4))));
        registry.add_skill(skill(1, vec![shot(), poison])).unwrap();

        let err = registry.validate().unwrap_err();
        assert!(err.contains("effect #1: unknown status status:4"), "{err}");

        registry
            .add_status(StatusTemplate {
                id: StatusId(4),
                name: "poisoned".into(),
                max_stacks: 3,
                default_duration: 2,
                stacking: StackPolicy::Stack,
                blocks_skills: false,
            })
            .unwrap();
        registry.validate().unwrap();
    }

    #[test]
    fn ranges_and_falloff_are_checked() {
        let mut zero_range = skill(1, vec![shot()]);
        zero_range.targeting.max_range = 0;
        let mut registry = ContentRegistry::new();
        registry.add_skill(zero_range).unwrap();
        assert!(registry.validate().unwrap_err().contains("max_range"));

        let inverted = SkillEffect::new(EffectKind::Suppress(SuppressEffect {
            amount: 30,
            near: 4,
            far: 2,
            can_crit: false,
        }));
        let mut registry = ContentRegistry::new();
        registry.add_skill(skill(2, vec![inverted])).unwrap();
        assert!(registry.validate().unwrap_err().contains("falloff"));
    }

    #[test]
    fn spawn_needs_a_known_unit() {
        let spawn = SkillEffect::new(EffectKind::Spawn(SpawnEffect {
            unit: UnitId(9),
            count: 1,
        }));
        let mut registry = ContentRegistry::new();
        registry.add_skill(skill(1, vec![spawn])).unwrap();
        assert!(registry.validate().unwrap_err().contains("unknown unit"));
    }

    #[test]
    fn units_must_reference_known_skills() {
        let mut registry = ContentRegistry::new();
        registry
            .add_unit(UnitTemplate {
                id: UnitId(1),
                name: "rifleman".into(),
                hp: 12,
                action_points: 2,
                ammo: 3,
                special: 0,
                properties: Default::default(),
                skills: vec![SkillId(3)],
            })
            .unwrap();
        assert!(registry.validate().unwrap_err().contains("unknown skill skill:3"));

        registry.add_skill(skill(3, vec![shot()])).unwrap();
        registry.validate().unwrap();
        assert_eq!(registry.unit_by_name("rifleman").map(|u| u.id), Some(UnitId(1)));
        assert!(registry.skill(SkillId(3)).is_some());
    }
}
