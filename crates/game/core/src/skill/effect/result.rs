//! Per-application results.

use bitflags::bitflags;

use crate::state::{EntityId, StatusId, Tile, TileEffectId, Turn};

bitflags! {
    /// Qualifiers on how an application resolved.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EffectFlags: u16 {
        const CRITICAL  = 1 << 0;
        const GRAZED    = 1 << 1;
        const MISSED    = 1 << 2;
        const RESISTED  = 1 << 3;
        /// Nothing happened: no recipient, dead recipient, failed chance.
        const NO_OP     = 1 << 4;
        /// Handed to the scheduler instead of applied.
        const DEFERRED  = 1 << 5;
        const OVERHEAL  = 1 << 6;
        /// A forced move was cut short by an obstacle.
        const COLLIDED  = 1 << 7;
    }
}

/// What an application changed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedValue {
    Damage {
        /// Amount after hit-tier modulation, before mitigation.
        planned: u32,
        /// Hitpoints actually removed.
        actual: u32,
    },
    Healing {
        planned: u32,
        actual: u32,
    },
    Suppression {
        amount: u32,
    },
    StatusApplied {
        status: StatusId,
        duration: u32,
        stacks: u32,
    },
    StatusRemoved {
        status: StatusId,
        stacks: u32,
    },
    Moved {
        from: Tile,
        to: Tile,
        collision_damage: u32,
    },
    Spawned {
        entities: Vec<EntityId>,
    },
    TileEffect {
        template: TileEffectId,
        tiles: u32,
    },
    Custom {
        tag: String,
    },
    Scheduled {
        due: Turn,
    },
    None,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectResult {
    pub recipient: Option<EntityId>,
    pub value: AppliedValue,
    pub flags: EffectFlags,
}

impl EffectResult {
    pub fn new(recipient: Option<EntityId>, value: AppliedValue) -> Self {
        Self {
            recipient,
            value,
            flags: EffectFlags::empty(),
        }
    }

    pub fn no_op(recipient: Option<EntityId>) -> Self {
        Self {
            recipient,
            value: AppliedValue::None,
            flags: EffectFlags::NO_OP,
        }
    }

    pub fn with_flags(mut self, flags: EffectFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn is_no_op(&self) -> bool {
        self.flags.contains(EffectFlags::NO_OP)
    }

    /// Hitpoints removed by this application.
    pub fn damage_dealt(&self) -> u32 {
        match self.value {
            AppliedValue::Damage { actual, .. } => actual,
            AppliedValue::Moved {
                collision_damage, ..
            } => collision_damage,
            _ => 0,
        }
    }
}
