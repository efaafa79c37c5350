//! Delayed-effect scheduling.
//!
//! The engine hands delayed effects to an [`EffectScheduler`] instead of a
//! global queue. [`TurnQueue`] is the default implementation: a turn-indexed
//! map fired by the external turn driver.

use std::collections::BTreeMap;

use crate::env::CombatEnv;
use crate::skill::execute::{EffectContext, run_scheduled};
use crate::skill::{EffectResult, SkillEffect, SkillError};
use crate::state::{Battlefield, Turn};

/// A delayed effect captured with everything needed to apply it later.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledEffect {
    pub effect: SkillEffect,
    pub context: EffectContext,
    /// Rolls drawn at scheduling time, consumed in order on execution.
    pub rolls: Vec<f32>,
    pub scheduled_at: Turn,
}

impl ScheduledEffect {
    pub fn due(&self) -> Turn {
        self.scheduled_at + self.effect.delay
    }
}

/// Accepts delayed effects keyed by a delay in turns.
///
/// Implementations must apply each entry exactly once, `delay` turns after
/// it was scheduled. There is no cancellation.
pub trait EffectScheduler {
    fn schedule(&mut self, delay: u32, entry: ScheduledEffect);
}

/// Turn-indexed queue of pending delayed effects.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnQueue {
    entries: BTreeMap<Turn, Vec<ScheduledEffect>>,
}

impl TurnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries not yet fired.
    pub fn pending(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries due exactly at `turn`.
    pub fn due_at(&self, turn: Turn) -> &[ScheduledEffect] {
        self.entries.get(&turn).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes every entry due at or before `turn`, earliest turn first and
    /// in enqueue order within a turn.
    pub fn drain_due(&mut self, turn: Turn) -> Vec<ScheduledEffect> {
        let later = self.entries.split_off(&turn.next());
        let due = std::mem::replace(&mut self.entries, later);
        due.into_values().flatten().collect()
    }

    /// Drains and applies every entry due at or before `turn`.
    ///
    /// # Errors
    ///
    /// Stops at the first fatal failure (missing template or collaborator).
    /// The failing entry is consumed; entries after it stay queued and fire
    /// on the next call.
    pub fn fire_due(
        &mut self,
        turn: Turn,
        battlefield: &mut Battlefield,
        env: &CombatEnv<'_>,
    ) -> Result<Vec<EffectResult>, SkillError> {
        let mut due = self.drain_due(turn).into_iter();
        let mut results = Vec::with_capacity(due.len());
        while let Some(entry) = due.next() {
            tracing::debug!(
                target: "combat::schedule",
                skill = %entry.context.skill,
                effect = entry.effect.kind.name(),
                scheduled_at = %entry.scheduled_at,
                turn = %turn,
                "firing delayed effect"
            );
            match run_scheduled(&entry, battlefield, env) {
                Ok(result) => results.push(result),
                Err(error) => {
                    self.requeue(due);
                    tracing::warn!(
                        target: "combat::schedule",
                        skill = %entry.context.skill,
                        pending = self.pending(),
                        "delayed effect failed: {error}"
                    );
                    return Err(error);
                }
            }
        }
        Ok(results)
    }

    /// Puts drained but unapplied entries back, ahead of anything queued
    /// later for the same turn.
    fn requeue(&mut self, rest: impl Iterator<Item = ScheduledEffect>) {
        let mut back: BTreeMap<Turn, Vec<ScheduledEffect>> = BTreeMap::new();
        for entry in rest {
            back.entry(entry.due()).or_default().push(entry);
        }
        for (due, mut entries) in back {
            let bucket = self.entries.entry(due).or_default();
            entries.append(bucket);
            *bucket = entries;
        }
    }
}

impl EffectScheduler for TurnQueue {
    fn schedule(&mut self, delay: u32, entry: ScheduledEffect) {
        let due = entry.scheduled_at + delay;
        self.entries.entry(due).or_default().push(entry);
    }
}
