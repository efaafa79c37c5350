//! Unit spawning.

use crate::config::CombatConfig;
use crate::env::OracleError;
use crate::skill::execute::EffectApplication;
use crate::skill::{AreaShape, SkillError};
use crate::state::UnitId;

use super::{AppliedValue, EffectResult};

/// Create units at the aimed tile and the nearest free tiles around it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnEffect {
    pub unit: UnitId,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub count: u32,
}

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

impl SpawnEffect {
    pub fn apply(&self, app: &mut EffectApplication<'_>) -> Result<EffectResult, SkillError> {
        let catalog = app.env.catalog()?;
        let grid = app.env.grid()?;
        let template = catalog
            .unit(self.unit)
            .ok_or(OracleError::UnitTemplateNotFound(self.unit))?;

        let center = app.ctx.target_tile;
        let mut candidates: Vec<_> = grid
            .tiles_in_area(center, AreaShape::Square, CombatConfig::SPAWN_SEARCH_RADIUS)
            .into_iter()
            .filter(|&tile| grid.is_passable(tile) && !app.battlefield.is_occupied(tile))
            .collect();
        // Stable sort keeps row-major order among equally distant tiles.
        candidates.sort_by_key(|&tile| grid.distance(center, tile));

        let mut spawned = Vec::new();
        for tile in candidates.into_iter().take(self.count as usize) {
            let id = app.battlefield.allocate_id();
            let entity = template.instantiate(id, tile, app.ctx.source_faction, catalog)?;
            app.battlefield.insert(entity);
            spawned.push(id);
        }

        if spawned.is_empty() {
            return Ok(EffectResult::no_op(None));
        }
        tracing::debug!(
            target: "combat::effect",
            unit = %template.name,
            count = spawned.len(),
            "spawned units"
        );
        Ok(EffectResult::new(
            None,
            AppliedValue::Spawned { entities: spawned },
        ))
    }
}
