//! Forced movement.

use crate::combat::{DamageInfo, DamageType};
use crate::env::PathStop;
use crate::skill::SkillError;
use crate::skill::execute::EffectApplication;
use crate::state::{EntityId, Tile};

use super::{AppliedValue, EffectFlags, EffectResult, EffectTarget};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    /// Away from the anchor.
    Push,
    /// Toward the anchor, stopping adjacent to it.
    Pull,
    /// Straight to the aimed tile.
    Teleport,
}

/// Push, pull or teleport the recipient.
///
/// The anchor is the source tile when moving someone else, and the aimed tile
/// when the source moves itself (recoil, charge).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveEffect {
    pub kind: MoveKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance: u32,
    /// Skip intermediate obstacles; the destination must still be free.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignore_collision: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deal_collision_damage: bool,
    /// Overrides the configured collision damage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub collision_damage: Option<u32>,
}

impl MoveEffect {
    pub fn apply(&self, app: &mut EffectApplication<'_>) -> Result<EffectResult, SkillError> {
        let mover_id = match app.effect.target {
            EffectTarget::SelfTarget => Some(app.ctx.source),
            _ => app.recipient,
        };
        let Some(mover) = mover_id
            .and_then(|id| app.battlefield.entity(id))
            .filter(|e| e.is_alive())
        else {
            return Ok(EffectResult::no_op(mover_id));
        };
        let mover_id = mover.id;
        let from = mover.tile;

        let grid = app.env.grid()?;
        let anchor = if mover_id == app.ctx.source {
            app.ctx.target_tile
        } else {
            app.ctx.source_tile
        };

        let destination = match self.kind {
            MoveKind::Teleport => app.ctx.target_tile,
            MoveKind::Push => {
                let away = grid.direction(anchor, from);
                grid.tile_in_direction(from, away, self.distance)
            }
            MoveKind::Pull => {
                let toward = grid.direction(from, anchor);
                let gap = grid.distance(from, anchor).saturating_sub(1);
                grid.tile_in_direction(from, toward, self.distance.min(gap))
            }
        };
        if destination == from {
            return Ok(EffectResult::no_op(Some(mover_id)));
        }

        let battlefield = &*app.battlefield;
        let occupied = |tile: Tile| battlefield.live_entities_at(tile).any(|e| e.id != mover_id);
        let stop = if self.ignore_collision {
            if !grid.is_passable(destination) || occupied(destination) {
                return Ok(EffectResult::no_op(Some(mover_id)));
            }
            PathStop {
                tile: destination,
                collided: false,
            }
        } else {
            grid.walk(from, destination, &occupied)
        };

        if let Some(mover) = app.battlefield.entity_mut(mover_id) {
            mover.tile = stop.tile;
        }

        let collision_damage = if stop.collided && self.deal_collision_damage {
            self.collide(app, mover_id)?
        } else {
            0
        };

        let mut result = EffectResult::new(
            Some(mover_id),
            AppliedValue::Moved {
                from,
                to: stop.tile,
                collision_damage,
            },
        );
        if stop.collided {
            result = result.with_flags(EffectFlags::COLLIDED);
        }
        Ok(result)
    }

    fn collide(&self, app: &mut EffectApplication<'_>, mover: EntityId) -> Result<u32, SkillError> {
        let info = DamageInfo {
            amount: self
                .collision_damage
                .unwrap_or(app.env.config().collision_damage),
            damage_type: DamageType::Kinetic,
            source: Some(app.ctx.source),
            skill: app.ctx.skill,
            armor_penetration: 0,
            critical: false,
        };
        let rules = app.env.rules()?;
        Ok(app
            .battlefield
            .entity_mut(mover)
            .map_or(0, |e| rules.apply_damage(e, &info)))
    }
}
