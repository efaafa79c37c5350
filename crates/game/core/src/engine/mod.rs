//! Skill use orchestration.
//!
//! [`SkillContainer`] is the single entry point that mutates the battlefield
//! for a skill use. It sequences the pipeline:
//!
//! validate → gather targets → pay costs → per-target hit roll → process
//! effects → set cooldown → aggregate → notify
//!
//! Validation is read-only; once it passes, costs are paid and the use runs
//! to completion. Every roll of the use comes from one [`RngStream`] seeded
//! from the current turn and the actor.

mod scheduler;

pub use scheduler::{EffectScheduler, ScheduledEffect, TurnQueue};

use std::sync::Arc;

use crate::combat::{HitTier, resolve_hit_tier};
use crate::env::{CombatEnv, RngStream, RollSource, SkillUsed};
use crate::error::GameError;
use crate::skill::execute::{EffectContext, gather_targets, process_effects, validate};
use crate::skill::{EffectFlags, EffectResult, SkillError, SkillId, SkillTemplate};
use crate::state::{Battlefield, Entity, EntityId, Property, Tile};

/// "Use this skill on this tile (and entity)."
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillRequest {
    pub actor: EntityId,
    pub skill: SkillId,
    pub target_tile: Tile,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_entity: Option<EntityId>,
}

impl SkillRequest {
    /// Request aimed at an entity standing on `tile`.
    pub fn at_entity(actor: EntityId, skill: SkillId, target: EntityId, tile: Tile) -> Self {
        Self {
            actor,
            skill,
            target_tile: tile,
            target_entity: Some(target),
        }
    }

    /// Request aimed at a tile with no designated entity.
    pub fn at_tile(actor: EntityId, skill: SkillId, tile: Tile) -> Self {
        Self {
            actor,
            skill,
            target_tile: tile,
            target_entity: None,
        }
    }
}

/// Hit tier resolved for one gathered target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetOutcome {
    pub entity: EntityId,
    pub hit_tier: HitTier,
}

/// Aggregated result of one successful skill use.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillOutcome {
    pub skill: SkillId,
    pub actor: EntityId,
    /// Gathered targets in resolution order.
    pub targets: Vec<TargetOutcome>,
    pub effects: Vec<EffectResult>,
    /// Hitpoints lost by gathered targets during this use.
    pub total_damage: u32,
    /// Whether any gathered target went from alive to dead.
    pub any_kill: bool,
    pub scheduled: u32,
}

/// Orchestrates skill uses against a battlefield.
pub struct SkillContainer<'a> {
    battlefield: &'a mut Battlefield,
    env: CombatEnv<'a>,
    scheduler: &'a mut dyn EffectScheduler,
}

impl<'a> SkillContainer<'a> {
    pub fn new(
        battlefield: &'a mut Battlefield,
        env: CombatEnv<'a>,
        scheduler: &'a mut dyn EffectScheduler,
    ) -> Self {
        Self {
            battlefield,
            env,
            scheduler,
        }
    }

    pub fn battlefield(&self) -> &Battlefield {
        self.battlefield
    }

    /// Resolves one skill use.
    ///
    /// # Errors
    ///
    /// Validation failures (cooldown, resources, blocking status, target,
    /// range, line of sight) are returned before anything changes. Fatal
    /// errors (missing template or collaborator) may surface after costs
    /// were paid.
    pub fn use_skill(&mut self, request: &SkillRequest) -> Result<SkillOutcome, SkillError> {
        let template = match validate(self.battlefield, &self.env, request) {
            Ok(template) => template,
            Err(error) => {
                tracing::debug!(
                    target: "combat::skill",
                    actor = %request.actor,
                    skill = %request.skill,
                    code = error.error_code(),
                    "skill use rejected: {error}"
                );
                return Err(error);
            }
        };

        let grid = self.env.grid()?;
        let hit_chance = self.env.hit_chance()?;
        let turn = self.battlefield.turn;
        let (faction, actor_tile, crit_multiplier_percent, source_properties) = {
            let actor = self.actor(request.actor)?;
            (
                actor.faction,
                actor.tile,
                actor
                    .properties
                    .lookup(Property::CritMultiplier)
                    .map_or(self.env.config().default_crit_multiplier_percent, |m| {
                        m.max(0) as u32
                    }),
                actor.properties.clone(),
            )
        };

        let targets = gather_targets(
            self.battlefield,
            grid,
            faction,
            &template,
            request.target_tile,
            request.target_entity,
        );
        let hp_before: Vec<u32> = targets
            .iter()
            .map(|&id| self.battlefield.entity(id).map_or(0, |e| e.hp.current))
            .collect();

        self.pay_costs(request.actor, &template)?;

        let mut rng = RngStream::for_skill_use(turn, request.actor);
        let base = EffectContext {
            skill: template.id,
            source: request.actor,
            source_faction: faction,
            source_tile: actor_tile,
            crit_multiplier_percent,
            source_properties,
            target: None,
            target_tile: request.target_tile,
            hit_tier: HitTier::Hit,
            affected: Arc::from(targets.as_slice()),
            lead: true,
            turn,
        };

        let mut effects = Vec::new();
        let mut outcomes = Vec::with_capacity(targets.len());

        if targets.is_empty() {
            tracing::debug!(
                target: "combat::skill",
                skill = %template.name,
                tile = %request.target_tile,
                "no targets gathered, resolving tile pass"
            );
            effects.extend(process_effects(
                &template.effects,
                &base,
                self.battlefield,
                &self.env,
                &mut rng,
                self.scheduler,
            )?);
        }

        for (index, &target) in targets.iter().enumerate() {
            let hit_tier = if template.always_hits {
                HitTier::Hit
            } else {
                let attacker = self.actor(request.actor)?;
                let defender = self
                    .battlefield
                    .entity(target)
                    .ok_or(SkillError::InvalidTarget)?;
                let chance = hit_chance.calculate_hit_chance(
                    attacker,
                    defender,
                    attacker.tile,
                    defender.tile,
                );
                let roll = rng.roll_percent();
                resolve_hit_tier(chance, roll, self.env.config().graze_window_percent)
            };

            tracing::debug!(
                target: "combat::skill",
                skill = %template.name,
                entity = %target,
                tier = ?hit_tier,
                "hit resolved"
            );

            let ctx = EffectContext {
                target: Some(target),
                hit_tier,
                lead: index == 0,
                ..base.clone()
            };
            effects.extend(process_effects(
                &template.effects,
                &ctx,
                self.battlefield,
                &self.env,
                &mut rng,
                self.scheduler,
            )?);
            outcomes.push(TargetOutcome {
                entity: target,
                hit_tier,
            });
        }

        if let Some(skill) = self
            .battlefield
            .entity_mut(request.actor)
            .and_then(|actor| actor.skill_mut(request.skill))
        {
            skill.cooldown = template.cooldown;
        }

        let mut total_damage = 0;
        let mut any_kill = false;
        for (&id, &before) in targets.iter().zip(&hp_before) {
            let after = self.battlefield.entity(id).map_or(0, |e| e.hp.current);
            total_damage += before.saturating_sub(after);
            any_kill |= before > 0 && after == 0;
        }
        let scheduled = effects
            .iter()
            .filter(|r| r.flags.contains(EffectFlags::DEFERRED))
            .count() as u32;

        tracing::info!(
            target: "combat::skill",
            actor = %request.actor,
            skill = %template.name,
            targets = targets.len(),
            total_damage,
            any_kill,
            scheduled,
            rolls = rng.draws(),
            "skill used"
        );

        if let Some(listener) = self.env.listener() {
            listener.on_skill_used(&SkillUsed {
                actor: request.actor,
                skill: template.id,
                targets: targets.clone(),
                total_damage,
                any_kill,
            });
        }

        Ok(SkillOutcome {
            skill: template.id,
            actor: request.actor,
            targets: outcomes,
            effects,
            total_damage,
            any_kill,
            scheduled,
        })
    }

    /// Counts every skill cooldown on the battlefield down by one turn.
    ///
    /// Called by the turn driver at each turn boundary.
    pub fn tick_cooldowns(&mut self) {
        let ids: Vec<EntityId> = self.battlefield.entities().map(|e| e.id).collect();
        for id in ids {
            if let Some(entity) = self.battlefield.entity_mut(id) {
                for skill in entity.skills.iter_mut() {
                    skill.cooldown = skill.cooldown.saturating_sub(1);
                }
            }
        }
    }

    fn actor(&self, id: EntityId) -> Result<&Entity, SkillError> {
        self.battlefield
            .entity(id)
            .ok_or(SkillError::ActorNotFound(id))
    }

    fn pay_costs(&mut self, actor: EntityId, template: &SkillTemplate) -> Result<(), SkillError> {
        let entity = self
            .battlefield
            .entity_mut(actor)
            .ok_or(SkillError::ActorNotFound(actor))?;
        for (resource, amount) in template.costs.iter() {
            let meter = entity.resources.meter_mut(resource);
            meter.current = meter.current.saturating_sub(amount);
        }
        tracing::debug!(
            target: "combat::skill",
            actor = %actor,
            skill = %template.name,
            costs = ?template.costs,
            "costs paid"
        );
        Ok(())
    }
}
