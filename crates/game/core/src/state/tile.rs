//! Effects stamped onto battlefield tiles (fire, smoke, gas).

use std::collections::BTreeMap;

use crate::state::{EntityId, Tile};

/// Identifier of a tile-effect template in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileEffectId(pub u16);

impl core::fmt::Display for TileEffectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "tile-effect:{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileEffectTemplate {
    pub id: TileEffectId,
    pub name: String,
    pub default_duration: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileEffectInstance {
    pub template: TileEffectId,
    pub remaining: u32,
    pub source: Option<EntityId>,
}

/// Active tile effects keyed by tile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileEffects {
    tiles: BTreeMap<Tile, Vec<TileEffectInstance>>,
}

impl TileEffects {
    /// Stamps a tile effect. The same template on the same tile refreshes to
    /// the longer duration instead of duplicating.
    pub fn add(
        &mut self,
        tile: Tile,
        template: TileEffectId,
        duration: u32,
        source: Option<EntityId>,
    ) {
        let effects = self.tiles.entry(tile).or_default();
        if let Some(existing) = effects.iter_mut().find(|e| e.template == template) {
            existing.remaining = existing.remaining.max(duration);
            existing.source = source.or(existing.source);
            return;
        }
        effects.push(TileEffectInstance {
            template,
            remaining: duration,
            source,
        });
    }

    pub fn at(&self, tile: Tile) -> &[TileEffectInstance] {
        self.tiles.get(&tile).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, tile: Tile, template: TileEffectId) -> bool {
        self.at(tile).iter().any(|e| e.template == template)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tile, &Vec<TileEffectInstance>)> {
        self.tiles.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_template_refreshes_instead_of_duplicating() {
        let mut effects = TileEffects::default();
        let tile = Tile::new(2, 3);

        effects.add(tile, TileEffectId(1), 2, None);
        effects.add(tile, TileEffectId(1), 5, Some(EntityId(1)));
        effects.add(tile, TileEffectId(1), 1, None);
        effects.add(tile, TileEffectId(2), 1, None);

        let at = effects.at(tile);
        assert_eq!(at.len(), 2);
        assert_eq!(at[0].remaining, 5);
        assert_eq!(at[0].source, Some(EntityId(1)));
        assert!(effects.at(Tile::ORIGIN).is_empty());
    }
}
