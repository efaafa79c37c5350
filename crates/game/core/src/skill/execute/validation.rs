//! Read-only validation of a skill request.
//!
//! Checks run in a fixed order and return the first failure. Nothing here
//! mutates the battlefield or draws randomness, so a failed request leaves
//! no trace.

use std::sync::Arc;

use crate::engine::SkillRequest;
use crate::env::{CombatEnv, OracleError};
use crate::skill::{SkillError, SkillTemplate};
use crate::state::{Battlefield, Entity};

/// Validates `request` and returns the template to resolve.
pub fn validate(
    battlefield: &Battlefield,
    env: &CombatEnv<'_>,
    request: &SkillRequest,
) -> Result<Arc<SkillTemplate>, SkillError> {
    let actor = battlefield
        .entity(request.actor)
        .ok_or(SkillError::ActorNotFound(request.actor))?;
    if !actor.is_alive() {
        return Err(SkillError::ActorDead(actor.id));
    }

    let skill = actor.skill(request.skill).ok_or(SkillError::SkillNotFound {
        actor: actor.id,
        skill: request.skill,
    })?;
    if !skill.is_ready() {
        return Err(SkillError::OnCooldown {
            skill: request.skill,
            remaining: skill.cooldown,
        });
    }

    check_blocking_status(actor, env)?;

    let template = Arc::clone(&skill.template);
    for (resource, required) in template.costs.iter() {
        let available = actor.resources.meter(resource).current;
        if available < required {
            return Err(SkillError::InsufficientResource {
                resource,
                required,
                available,
            });
        }
    }

    check_target(actor, battlefield, env, &template, request)?;
    Ok(template)
}

fn check_blocking_status(actor: &Entity, env: &CombatEnv<'_>) -> Result<(), SkillError> {
    let catalog = env.catalog()?;
    for instance in actor.statuses.iter() {
        let template = catalog
            .status(instance.status)
            .ok_or(OracleError::StatusTemplateNotFound(instance.status))?;
        if template.blocks_skills {
            return Err(SkillError::BlockedByStatus {
                status: instance.status,
            });
        }
    }
    Ok(())
}

fn check_target(
    actor: &Entity,
    battlefield: &Battlefield,
    env: &CombatEnv<'_>,
    template: &SkillTemplate,
    request: &SkillRequest,
) -> Result<(), SkillError> {
    let grid = env.grid()?;
    if !grid.contains(request.target_tile) {
        return Err(SkillError::InvalidTarget);
    }

    let target = match request.target_entity {
        Some(id) => {
            let target = battlefield
                .entity(id)
                .filter(|e| e.is_alive() && e.tile == request.target_tile)
                .ok_or(SkillError::InvalidTarget)?;
            Some(target)
        }
        None => None,
    };

    let needs_target = !template.is_area() || template.targeting.requires_target;
    match target {
        None if needs_target => return Err(SkillError::InvalidTarget),
        Some(target)
            if !template
                .targeting
                .filter
                .accepts(actor.faction, target.faction) =>
        {
            return Err(SkillError::InvalidTarget);
        }
        _ => {}
    }

    let rules = &template.targeting;
    let distance = grid.distance(actor.tile, request.target_tile);
    if distance < rules.min_range || distance > rules.max_range {
        return Err(SkillError::OutOfRange {
            distance,
            min: rules.min_range,
            max: rules.max_range,
        });
    }

    if rules.requires_los && !grid.has_line_of_sight(actor.tile, request.target_tile) {
        return Err(SkillError::NoLineOfSight);
    }

    Ok(())
}
