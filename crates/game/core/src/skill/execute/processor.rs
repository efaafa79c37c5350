//! Effect processor.
//!
//! Runs a skill's effect list against one resolution pass:
//!
//! 1. Drop per-use effects (self, tile) unless this is the lead pass. Damage
//!    and suppression aimed at the tile instead run on the pass of the
//!    gathered entity standing there, so they use that entity's hit tier
//! 2. Partition into immediate and delayed, each keeping declaration order
//! 3. Apply immediate effects synchronously
//! 4. Hand delayed effects to the scheduler with their frozen context and
//!    the rolls they will need, drawn now from the shared stream
//!
//! A missing or dead recipient is a no-op result, never an error, and never
//! stops the remaining effects.

use crate::engine::{EffectScheduler, ScheduledEffect};
use crate::env::{CombatEnv, RollSource, ScriptedRolls};
use crate::skill::{AppliedValue, EffectFlags, EffectResult, EffectTarget, SkillEffect, SkillError};
use crate::state::{Battlefield, EntityId};

use super::{EffectApplication, EffectContext};

/// Applies or schedules every effect relevant to `ctx`.
pub fn process_effects(
    effects: &[SkillEffect],
    ctx: &EffectContext,
    battlefield: &mut Battlefield,
    env: &CombatEnv<'_>,
    rolls: &mut dyn RollSource,
    scheduler: &mut dyn EffectScheduler,
) -> Result<Vec<EffectResult>, SkillError> {
    let occupant = tile_occupant(ctx, battlefield);
    let (immediate, delayed): (Vec<_>, Vec<_>) = effects
        .iter()
        .filter(|effect| runs_in_pass(effect, ctx, occupant))
        .partition(|effect| !effect.is_delayed());

    let mut results = Vec::with_capacity(immediate.len() + delayed.len());
    for effect in immediate {
        results.push(apply_effect(effect, ctx, battlefield, env, rolls)?);
    }

    for effect in delayed {
        let snapshot: Vec<f32> = (0..effect.kind.presampled_rolls())
            .map(|_| rolls.roll_percent())
            .collect();
        let due = ctx.turn + effect.delay;

        tracing::debug!(
            target: "combat::schedule",
            skill = %ctx.skill,
            effect = effect.kind.name(),
            delay = effect.delay,
            due = %due,
            "effect scheduled"
        );
        scheduler.schedule(
            effect.delay,
            ScheduledEffect {
                effect: effect.clone(),
                context: ctx.clone(),
                rolls: snapshot,
                scheduled_at: ctx.turn,
            },
        );

        let recipient = match effect.target {
            EffectTarget::SelfTarget => Some(ctx.source),
            _ => ctx.target,
        };
        results.push(
            EffectResult::new(recipient, AppliedValue::Scheduled { due })
                .with_flags(EffectFlags::DEFERRED),
        );
    }

    Ok(results)
}

fn runs_in_pass(effect: &SkillEffect, ctx: &EffectContext, occupant: Option<EntityId>) -> bool {
    match effect.target {
        EffectTarget::Tile if effect.kind.is_hit_modulated() => match occupant {
            Some(id) => ctx.target == Some(id),
            None => ctx.lead,
        },
        target => ctx.lead || !target.is_per_use(),
    }
}

/// First live gathered entity standing on the aimed tile.
fn tile_occupant(ctx: &EffectContext, battlefield: &Battlefield) -> Option<EntityId> {
    battlefield
        .live_entities_at(ctx.target_tile)
        .map(|e| e.id)
        .find(|&id| ctx.is_affected(id))
}

/// Resolves the recipient for `effect` and applies it.
pub fn apply_effect(
    effect: &SkillEffect,
    ctx: &EffectContext,
    battlefield: &mut Battlefield,
    env: &CombatEnv<'_>,
    rolls: &mut dyn RollSource,
) -> Result<EffectResult, SkillError> {
    let derived;
    let (recipient, ctx) = match effect.target {
        EffectTarget::SelfTarget => (Some(ctx.source), ctx),
        EffectTarget::Target => (ctx.target, ctx),
        EffectTarget::Tile if effect.kind.is_hit_modulated() => {
            let occupant = tile_occupant(ctx, battlefield).filter(|&id| ctx.target == Some(id));
            if occupant.is_none() {
                tracing::trace!(
                    target: "combat::effect",
                    skill = %ctx.skill,
                    tile = %ctx.target_tile,
                    "no gathered target on tile"
                );
                return Ok(EffectResult::no_op(None));
            }
            (occupant, ctx)
        }
        EffectTarget::Tile => (
            battlefield
                .live_entities_at(ctx.target_tile)
                .next()
                .map(|e| e.id),
            ctx,
        ),
        EffectTarget::Area | EffectTarget::AlliesInArea | EffectTarget::EnemiesInArea => {
            let filter = effect.target.area_filter().unwrap_or_default();
            let member = ctx
                .target
                .and_then(|id| battlefield.entity(id))
                .filter(|e| ctx.is_affected(e.id))
                .filter(|e| filter.accepts(ctx.source_faction, e.faction));
            match member {
                Some(entity) => {
                    derived = ctx.derive_for(entity.id, entity.tile);
                    (Some(entity.id), &derived)
                }
                None => {
                    tracing::trace!(
                        target: "combat::effect",
                        skill = %ctx.skill,
                        entity = ?ctx.target,
                        "outside area policy"
                    );
                    return Ok(EffectResult::no_op(ctx.target));
                }
            }
        }
    };

    let mut app = EffectApplication {
        effect,
        ctx,
        recipient,
        battlefield,
        env,
        rolls,
    };
    let result = effect.kind.apply(&mut app)?;

    tracing::debug!(
        target: "combat::effect",
        skill = %ctx.skill,
        effect = effect.kind.name(),
        recipient = ?result.recipient,
        value = ?result.value,
        flags = ?result.flags,
        "effect applied"
    );
    Ok(result)
}

/// Applies a delayed effect using the rolls captured when it was scheduled.
pub fn run_scheduled(
    entry: &ScheduledEffect,
    battlefield: &mut Battlefield,
    env: &CombatEnv<'_>,
) -> Result<EffectResult, SkillError> {
    let mut rolls = ScriptedRolls::new(entry.rolls.iter().copied());
    apply_effect(&entry.effect, &entry.context, battlefield, env, &mut rolls)
}
