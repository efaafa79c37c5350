//! Tile effects.

use crate::env::OracleError;
use crate::skill::execute::EffectApplication;
use crate::skill::{AreaShape, SkillError};
use crate::state::TileEffectId;

use super::{AppliedValue, EffectResult};

/// Stamp a tile-effect template onto every tile within `radius` of the aimed tile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateTileEffect {
    pub template: TileEffectId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub radius: u32,
}

impl CreateTileEffect {
    pub fn apply(&self, app: &mut EffectApplication<'_>) -> Result<EffectResult, SkillError> {
        let catalog = app.env.catalog()?;
        let grid = app.env.grid()?;
        let template = catalog
            .tile_effect(self.template)
            .ok_or(OracleError::TileEffectTemplateNotFound(self.template))?;

        let duration = app.effect.duration_or(template.default_duration);
        let tiles = grid.tiles_in_area(app.ctx.target_tile, AreaShape::Circle, self.radius);
        for &tile in &tiles {
            app.battlefield
                .tile_effects
                .add(tile, self.template, duration, Some(app.ctx.source));
        }

        if tiles.is_empty() {
            return Ok(EffectResult::no_op(None));
        }
        Ok(EffectResult::new(
            None,
            AppliedValue::TileEffect {
                template: self.template,
                tiles: tiles.len() as u32,
            },
        ))
    }
}
