//! Static content lookups: skills, statuses, spawnable units, tile effects.

use std::sync::Arc;

use super::OracleError;
use crate::skill::{SkillId, SkillTemplate};
use crate::state::{
    CombatResources, Entity, EntityId, Faction, Properties, ResourceMeter, Skill, StatusId,
    StatusTemplate, Tile, TileEffectId, TileEffectTemplate, UnitId,
};

/// Read-only template catalog.
pub trait CatalogOracle: Send + Sync {
    fn skill(&self, id: SkillId) -> Option<Arc<SkillTemplate>>;
    fn status(&self, id: StatusId) -> Option<&StatusTemplate>;
    fn unit(&self, id: UnitId) -> Option<&UnitTemplate>;
    fn tile_effect(&self, id: TileEffectId) -> Option<&TileEffectTemplate>;
}

/// Blueprint for entities created by scenarios and spawn effects.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTemplate {
    pub id: UnitId,
    pub name: String,
    pub hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub action_points: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ammo: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub special: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: Properties,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillId>,
}

impl UnitTemplate {
    /// Builds a full-health entity with every template skill ready.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SkillTemplateNotFound` if the template lists a
    /// skill the catalog does not know.
    pub fn instantiate(
        &self,
        id: EntityId,
        tile: Tile,
        faction: Faction,
        catalog: &dyn CatalogOracle,
    ) -> Result<Entity, OracleError> {
        let resources = CombatResources {
            action_points: ResourceMeter::full(self.action_points),
            ammo: ResourceMeter::full(self.ammo),
            special: ResourceMeter::full(self.special),
        };

        let mut entity = Entity::new(id, self.name.clone(), faction, tile, self.hp)
            .with_resources(resources)
            .with_properties(self.properties.clone());
        entity.unit = Some(self.id);

        for &skill in &self.skills {
            let template = catalog
                .skill(skill)
                .ok_or(OracleError::SkillTemplateNotFound(skill))?;
            entity = entity.with_skill(Skill::new(template));
        }

        Ok(entity)
    }
}
