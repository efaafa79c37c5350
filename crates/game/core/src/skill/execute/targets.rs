//! Target gathering.

use std::collections::BTreeSet;

use crate::env::GridOracle;
use crate::skill::SkillTemplate;
use crate::state::{Battlefield, EntityId, Faction, Tile};

/// Entities a skill use resolves against, in canonical order.
///
/// Single-target skills yield the supplied entity if it is alive. Area skills
/// walk the footprint row-major, take live entities per tile by ascending id,
/// apply the area's faction policy and drop duplicates.
pub fn gather_targets(
    battlefield: &Battlefield,
    grid: &dyn GridOracle,
    actor_faction: Faction,
    template: &SkillTemplate,
    target_tile: Tile,
    target_entity: Option<EntityId>,
) -> Vec<EntityId> {
    if !template.is_area() {
        return target_entity
            .filter(|&id| battlefield.entity(id).is_some_and(|e| e.is_alive()))
            .into_iter()
            .collect();
    }

    let area = &template.area;
    let mut seen = BTreeSet::new();
    let mut targets = Vec::new();
    for tile in grid.tiles_in_area(target_tile, area.shape, area.radius) {
        for entity in battlefield.live_entities_at(tile) {
            if area.filter.accepts(actor_faction, entity.faction) && seen.insert(entity.id) {
                targets.push(entity.id);
            }
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::OpenGrid;
    use crate::skill::AreaShape;
    use crate::state::FactionFilter;
    use crate::testing::{area_template, unit};

    #[test]
    fn single_target_ignores_dead_entity() {
        let mut battlefield = Battlefield::default();
        let mut corpse = unit(2, Faction::Enemy, Tile::new(3, 3));
        corpse.hp.current = 0;
        battlefield.insert(corpse);

        let template = area_template(AreaShape::Circle, 0, FactionFilter::Any);
        let grid = OpenGrid::new(10, 10);
        let targets = gather_targets(
            &battlefield,
            &grid,
            Faction::Player,
            &template,
            Tile::new(3, 3),
            Some(EntityId(2)),
        );
        assert!(targets.is_empty());
    }

    #[test]
    fn area_targets_are_row_major_filtered_and_alive() {
        let mut battlefield = Battlefield::default();
        battlefield.insert(unit(5, Faction::Enemy, Tile::new(4, 4)));
        battlefield.insert(unit(3, Faction::Enemy, Tile::new(5, 3)));
        battlefield.insert(unit(4, Faction::Allied, Tile::new(3, 3)));
        battlefield.insert(unit(2, Faction::Enemy, Tile::new(4, 4)));
        let mut corpse = unit(6, Faction::Enemy, Tile::new(4, 5));
        corpse.hp.current = 0;
        battlefield.insert(corpse);

        let grid = OpenGrid::new(10, 10);
        let all = area_template(AreaShape::Square, 1, FactionFilter::Any);
        let targets = gather_targets(
            &battlefield,
            &grid,
            Faction::Player,
            &all,
            Tile::new(4, 4),
            None,
        );
        assert_eq!(targets, vec![EntityId(4), EntityId(3), EntityId(2), EntityId(5)]);

        let enemies = area_template(AreaShape::Square, 1, FactionFilter::Enemies);
        let targets = gather_targets(
            &battlefield,
            &grid,
            Faction::Player,
            &enemies,
            Tile::new(4, 4),
            None,
        );
        assert_eq!(targets, vec![EntityId(3), EntityId(2), EntityId(5)]);
    }

    #[test]
    fn every_shape_yields_unique_live_targets() {
        let mut battlefield = Battlefield::default();
        let mut id = 1;
        for y in 0..7 {
            for x in 0..7 {
                battlefield.insert(unit(id, Faction::Enemy, Tile::new(x, y)));
                let mut second = unit(id + 100, Faction::Enemy, Tile::new(x, y));
                if (x + y) % 2 == 0 {
                    second.hp.current = 0;
                }
                battlefield.insert(second);
                id += 1;
            }
        }
        // (3,3) holds live #25 and corpse #125.
        let center_corpse = EntityId(125);

        let grid = OpenGrid::new(7, 7);
        for shape in [
            AreaShape::Circle,
            AreaShape::Square,
            AreaShape::Diamond,
            AreaShape::Cross,
        ] {
            let template = area_template(shape, 2, FactionFilter::Any);
            let targets = gather_targets(
                &battlefield,
                &grid,
                Faction::Player,
                &template,
                Tile::new(3, 3),
                None,
            );
            let unique: BTreeSet<_> = targets.iter().copied().collect();
            assert_eq!(unique.len(), targets.len(), "duplicates for {shape}");
            assert!(targets.contains(&EntityId(25)), "center missing for {shape}");
            assert!(!targets.contains(&center_corpse), "corpse gathered for {shape}");
            assert!(
                targets
                    .iter()
                    .all(|id| battlefield.entity(*id).is_some_and(|e| e.is_alive())),
                "dead entity gathered for {shape}"
            );
        }
    }
}
