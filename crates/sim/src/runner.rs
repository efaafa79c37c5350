//! Turn driver for scripted battles.
//!
//! Each turn: refill action points, fire delayed effects that came due,
//! resolve the scripted skill uses in order, then count cooldowns down.

use std::sync::atomic::{AtomicU32, Ordering};

use tactics_content::ContentRegistry;
use tactics_core::skill::CustomEffect;
use tactics_core::{
    AppliedValue, Battlefield, CombatConfig, CombatEnv, CustomEffectHandler, EffectContext,
    EntityId, ErrorSeverity, GameError, HitTable, SkillContainer, SkillListener, SkillRequest,
    SkillUsed, StandardRules, Turn, TurnQueue,
};

use crate::scenario::Scenario;

/// Summary of a finished run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub turns: u32,
    pub uses: u32,
    pub rejected: u32,
    pub kills: u32,
    pub pending: usize,
    pub digest: [u8; 32],
    pub battlefield: Battlefield,
}

#[derive(Default)]
struct KillCounter {
    uses: AtomicU32,
    kills: AtomicU32,
}

impl SkillListener for KillCounter {
    fn on_skill_used(&self, event: &SkillUsed) {
        self.uses.fetch_add(1, Ordering::Relaxed);
        if event.any_kill {
            self.kills.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Logs custom effects; the simulation gives them no mechanical meaning.
struct LoggingHandler;

impl CustomEffectHandler for LoggingHandler {
    fn apply(
        &self,
        effect: &CustomEffect,
        recipient: Option<EntityId>,
        ctx: &EffectContext,
        _battlefield: &mut Battlefield,
    ) -> AppliedValue {
        tracing::info!(
            tag = %effect.tag,
            params = ?effect.params,
            tile = %ctx.target_tile,
            recipient = ?recipient,
            "custom effect"
        );
        AppliedValue::Custom {
            tag: effect.tag.clone(),
        }
    }
}

/// Plays `scenario` for `turns` turns against the loaded content.
///
/// Rejected skill uses are logged and skipped; fatal engine errors abort
/// the run.
pub fn run(
    scenario: &Scenario,
    registry: &ContentRegistry,
    config: &CombatConfig,
    turns: u32,
) -> anyhow::Result<RunReport> {
    let grid = scenario.grid();
    let hit_table = HitTable::new(config.hit_table);
    let rules = StandardRules;
    let counter = KillCounter::default();
    let handler = LoggingHandler;
    let env = CombatEnv::new(config)
        .with_grid(&grid)
        .with_catalog(registry)
        .with_hit_chance(&hit_table)
        .with_rules(&rules)
        .with_listener(&counter)
        .with_custom_handler(&handler);

    let mut battlefield = scenario.battlefield(registry)?;
    let mut queue = TurnQueue::new();
    let mut rejected = 0;

    for turn in (0..turns).map(Turn) {
        battlefield.turn = turn;
        refill_action_points(&mut battlefield);

        for result in queue.fire_due(turn, &mut battlefield, &env)? {
            tracing::info!(
                turn = %turn,
                recipient = ?result.recipient,
                value = ?result.value,
                flags = ?result.flags,
                "delayed effect resolved"
            );
        }

        for scripted in scenario.script.iter().filter(|s| s.turn == turn.0) {
            let request = match battlefield.live_entities_at(scripted.target).next() {
                Some(entity) => SkillRequest::at_entity(
                    scripted.actor,
                    scripted.skill,
                    entity.id,
                    scripted.target,
                ),
                None => SkillRequest::at_tile(scripted.actor, scripted.skill, scripted.target),
            };

            let mut container = SkillContainer::new(&mut battlefield, env, &mut queue);
            match container.use_skill(&request) {
                Ok(outcome) => {
                    tracing::info!(
                        turn = %turn,
                        actor = %outcome.actor,
                        skill = %outcome.skill,
                        tiers = ?outcome
                            .targets
                            .iter()
                            .map(|t| (t.entity.0, t.hit_tier))
                            .collect::<Vec<_>>(),
                        total_damage = outcome.total_damage,
                        any_kill = outcome.any_kill,
                        scheduled = outcome.scheduled,
                        "skill resolved"
                    );
                }
                Err(error) if error.severity() != ErrorSeverity::Fatal => {
                    rejected += 1;
                    tracing::warn!(
                        turn = %turn,
                        actor = %scripted.actor,
                        skill = %scripted.skill,
                        code = error.error_code(),
                        "skill rejected: {error}"
                    );
                }
                Err(error) => return Err(error.into()),
            }
        }

        SkillContainer::new(&mut battlefield, env, &mut queue).tick_cooldowns();
    }

    let digest = battlefield
        .digest()
        .map_err(|e| anyhow::anyhow!("Failed to hash battlefield: {}", e))?;
    Ok(RunReport {
        turns,
        uses: counter.uses.load(Ordering::Relaxed),
        rejected,
        kills: counter.kills.load(Ordering::Relaxed),
        pending: queue.pending(),
        digest,
        battlefield,
    })
}

fn refill_action_points(battlefield: &mut Battlefield) {
    let ids: Vec<EntityId> = battlefield.entities().map(|e| e.id).collect();
    for id in ids {
        if let Some(entity) = battlefield.entity_mut(id) {
            let meter = &mut entity.resources.action_points;
            meter.current = meter.maximum;
        }
    }
}
