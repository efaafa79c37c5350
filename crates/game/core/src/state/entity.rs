//! Combatants on the battlefield.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use super::{EntityId, Faction, ResourceMeter, Skill, StatusCollection, Tile};
use crate::config::CombatConfig;
use crate::skill::SkillId;

/// Identifier of a unit template (spawnable archetype) in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u16);

impl core::fmt::Display for UnitId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unit:{}", self.0)
    }
}

/// Named numeric attributes read by hit tables and effects.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Property {
    Accuracy,
    Defense,
    CritChance,
    /// Critical multiplier in percent; absent means the configured default.
    CritMultiplier,
    ArmorPenetration,
    Armor,
    /// Chance in percent to resist resistible statuses.
    Resistance,
    Power,
    Tech,
}

/// Sparse property table. Missing properties read as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Properties(pub BTreeMap<Property, i32>);

impl Properties {
    pub fn get(&self, property: Property) -> i32 {
        self.0.get(&property).copied().unwrap_or(0)
    }

    /// Returns the value only when the property is explicitly set.
    pub fn lookup(&self, property: Property) -> Option<i32> {
        self.0.get(&property).copied()
    }

    pub fn set(&mut self, property: Property, value: i32) {
        self.0.insert(property, value);
    }

    pub fn with(mut self, property: Property, value: i32) -> Self {
        self.set(property, value);
        self
    }
}

/// Resources a skill may consume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    ActionPoints,
    Ammo,
    Special,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResources {
    pub action_points: ResourceMeter,
    pub ammo: ResourceMeter,
    pub special: ResourceMeter,
}

impl CombatResources {
    pub fn meter(&self, kind: ResourceKind) -> &ResourceMeter {
        match kind {
            ResourceKind::ActionPoints => &self.action_points,
            ResourceKind::Ammo => &self.ammo,
            ResourceKind::Special => &self.special,
        }
    }

    pub fn meter_mut(&mut self, kind: ResourceKind) -> &mut ResourceMeter {
        match kind {
            ResourceKind::ActionPoints => &mut self.action_points,
            ResourceKind::Ammo => &mut self.ammo,
            ResourceKind::Special => &mut self.special,
        }
    }
}

/// A combatant. Dead entities stay in the battlefield with zero hitpoints
/// and are ignored by targeting.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub faction: Faction,
    pub tile: Tile,
    pub hp: ResourceMeter,
    pub resources: CombatResources,
    pub suppression: u32,
    pub properties: Properties,
    pub statuses: StatusCollection,
    pub skills: ArrayVec<Skill, { CombatConfig::MAX_SKILLS }>,
    /// Template this entity was instantiated from, if any.
    pub unit: Option<UnitId>,
}

impl Entity {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        faction: Faction,
        tile: Tile,
        hp: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            faction,
            tile,
            hp: ResourceMeter::full(hp),
            resources: CombatResources::default(),
            suppression: 0,
            properties: Properties::default(),
            statuses: StatusCollection::empty(),
            skills: ArrayVec::new(),
            unit: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp.current > 0
    }

    pub fn property(&self, property: Property) -> i32 {
        self.properties.get(property)
    }

    pub fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id() == id)
    }

    pub fn skill_mut(&mut self, id: SkillId) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|s| s.id() == id)
    }

    pub fn with_resources(mut self, resources: CombatResources) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Adds a skill; silently ignored once the skill list is full.
    pub fn with_skill(mut self, skill: Skill) -> Self {
        let _ = self.skills.try_push(skill);
        self
    }
}
