//! Fixtures shared by unit tests.

use crate::skill::{AreaShape, AreaSpec, SkillCosts, SkillId, SkillTemplate, TargetingRules};
use crate::state::{CombatResources, Entity, EntityId, Faction, FactionFilter, ResourceMeter, Tile};

/// A 20 hp combatant with a few action points and some ammo.
pub fn unit(id: u32, faction: Faction, tile: Tile) -> Entity {
    Entity::new(EntityId(id), format!("unit-{id}"), faction, tile, 20).with_resources(
        CombatResources {
            action_points: ResourceMeter::full(4),
            ammo: ResourceMeter::full(2),
            special: ResourceMeter::full(0),
        },
    )
}

/// Effect-less template with the given footprint.
pub fn area_template(shape: AreaShape, radius: u32, filter: FactionFilter) -> SkillTemplate {
    SkillTemplate {
        id: SkillId(1),
        name: "test-area".into(),
        targeting: TargetingRules {
            min_range: 0,
            max_range: 8,
            requires_los: false,
            requires_target: false,
            filter: FactionFilter::Any,
        },
        area: AreaSpec {
            shape,
            radius,
            filter,
        },
        costs: SkillCosts::default(),
        effects: Vec::new(),
        cooldown: 0,
        always_hits: false,
    }
}
