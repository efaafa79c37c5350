//! Scenario files: map, starting units and the scripted skill uses.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tactics_content::ContentRegistry;
use tactics_core::{
    Battlefield, CatalogOracle, EntityId, Faction, OpenGrid, SkillId, Tile, UnitId,
};

/// A battle setup loaded from RON.
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub blocked: Vec<Tile>,
    pub units: Vec<Placement>,
    pub script: Vec<ScriptedUse>,
}

/// One unit placed at battle start. Entity ids follow placement order from 1.
#[derive(Clone, Debug, Deserialize)]
pub struct Placement {
    pub unit: UnitId,
    pub faction: Faction,
    pub tile: Tile,
}

/// A skill use issued on a given turn.
///
/// When a live entity stands on `target` it becomes the primary target,
/// otherwise the skill is aimed at the bare tile.
#[derive(Clone, Debug, Deserialize)]
pub struct ScriptedUse {
    pub turn: u32,
    pub actor: EntityId,
    pub skill: SkillId,
    pub target: Tile,
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON {}: {}", path.display(), e))
    }

    pub fn grid(&self) -> OpenGrid {
        OpenGrid::new(self.width, self.height).with_blocked(self.blocked.iter().copied())
    }

    /// Instantiates every placement from the registry.
    pub fn battlefield(&self, registry: &ContentRegistry) -> anyhow::Result<Battlefield> {
        let mut battlefield = Battlefield::default();
        for (index, placement) in self.units.iter().enumerate() {
            let template = registry.unit(placement.unit).ok_or_else(|| {
                anyhow::anyhow!("Scenario '{}' places unknown {}", self.name, placement.unit)
            })?;
            let id = EntityId(index as u32 + 1);
            let entity = template.instantiate(id, placement.tile, placement.faction, registry)?;
            battlefield.insert(entity);
        }
        Ok(battlefield)
    }
}
