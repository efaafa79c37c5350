//! Authoritative battlefield state.
//!
//! The battlefield owns every entity and the tile-effect layer. Runtime layers
//! read it freely but mutate it only through the skill engine and the
//! delayed-effect runner.
mod common;
mod entity;
mod faction;
mod skill;
mod status;
mod tile;

use std::collections::BTreeMap;

pub use common::{EntityId, ResourceMeter, Tile, Turn};
pub use entity::{CombatResources, Entity, Properties, Property, ResourceKind, UnitId};
pub use faction::{Faction, FactionFilter};
pub use skill::Skill;
pub use status::{
    StackPolicy, StatusChange, StatusCollection, StatusId, StatusInstance, StatusTemplate,
};
pub use tile::{TileEffectId, TileEffectInstance, TileEffectTemplate, TileEffects};

/// Canonical snapshot of the combat state.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battlefield {
    /// Current turn, advanced by the turn driver.
    pub turn: Turn,

    /// Sequential entity ID allocator. IDs are never reused.
    next_entity_id: u32,

    entities: BTreeMap<EntityId, Entity>,

    /// Runtime tile effects (fire, smoke).
    pub tile_effects: TileEffects,
}

impl Battlefield {
    pub fn new(turn: Turn) -> Self {
        Self {
            turn,
            ..Self::default()
        }
    }

    /// Allocates an ID that has never been handed out on this battlefield.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.saturating_add(1);
        id
    }

    /// Inserts an entity, keeping the allocator ahead of explicit IDs.
    pub fn insert(&mut self, entity: Entity) {
        self.next_entity_id = self.next_entity_id.max(entity.id.0.saturating_add(1));
        self.entities.insert(entity.id, entity);
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// All entities in ID order, dead ones included.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Live entities standing on `tile`, in ID order.
    pub fn live_entities_at(&self, tile: Tile) -> impl Iterator<Item = &Entity> {
        self.entities
            .values()
            .filter(move |e| e.tile == tile && e.is_alive())
    }

    pub fn is_occupied(&self, tile: Tile) -> bool {
        self.live_entities_at(tile).next().is_some()
    }

    /// SHA-256 over the bincode encoding of the whole battlefield.
    ///
    /// Two replays of the same inputs must produce the same digest.
    ///
    /// # Errors
    ///
    /// Returns the encoder error if the battlefield cannot be serialized.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}
