//! Status effects carried by entities.
//!
//! A status instance is a template reference plus remaining duration, stack
//! count and the entity that applied it. Stacking rules live here, not in the
//! effect that applies the status: the collection enforces the template's
//! stack cap and its stack-versus-refresh policy.
//!
//! Duration is counted in turns. Ticking durations down belongs to the turn
//! driver; this module only stores and merges them.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::EntityId;

/// Identifier of a status template in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusId(pub u16);

impl core::fmt::Display for StatusId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "status:{}", self.0)
    }
}

/// How a re-application merges with an existing instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackPolicy {
    /// Adds stacks up to the cap and resets the duration.
    #[default]
    Stack,
    /// Keeps a single stack and takes the longer duration.
    Refresh,
}

/// Static definition of a status.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTemplate {
    pub id: StatusId,
    pub name: String,
    pub max_stacks: u32,
    pub default_duration: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacking: StackPolicy,
    /// Entities carrying this status cannot use skills (stun, panic).
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocks_skills: bool,
}

/// An active status on an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInstance {
    pub status: StatusId,
    pub remaining: u32,
    pub stacks: u32,
    pub source: Option<EntityId>,
}

/// What [`StatusCollection::add`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusChange {
    /// A new instance was created with this many stacks.
    Added { stacks: u32 },
    /// An existing instance was merged; `stacks` is the resulting count.
    Merged { stacks: u32 },
    /// The collection is full and the status was dropped.
    Rejected,
}

/// Active statuses on one entity, bounded by [`CombatConfig::MAX_STATUS_EFFECTS`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusCollection {
    statuses: ArrayVec<StatusInstance, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusCollection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, status: StatusId) -> Option<&StatusInstance> {
        self.statuses.iter().find(|s| s.status == status)
    }

    pub fn has(&self, status: StatusId) -> bool {
        self.get(status).is_some()
    }

    /// Adds `stacks` of a status, enforcing the template's cap and policy.
    pub fn add(
        &mut self,
        template: &StatusTemplate,
        duration: u32,
        stacks: u32,
        source: Option<EntityId>,
    ) -> StatusChange {
        let cap = template.max_stacks.max(1);

        if let Some(existing) = self.statuses.iter_mut().find(|s| s.status == template.id) {
            match template.stacking {
                StackPolicy::Stack => {
                    existing.stacks = existing.stacks.saturating_add(stacks).min(cap);
                    existing.remaining = duration;
                }
                StackPolicy::Refresh => {
                    existing.stacks = 1;
                    existing.remaining = existing.remaining.max(duration);
                }
            }
            existing.source = source.or(existing.source);
            return StatusChange::Merged {
                stacks: existing.stacks,
            };
        }

        if self.statuses.is_full() {
            return StatusChange::Rejected;
        }

        let stacks = match template.stacking {
            StackPolicy::Stack => stacks.clamp(1, cap),
            StackPolicy::Refresh => 1,
        };
        self.statuses.push(StatusInstance {
            status: template.id,
            remaining: duration,
            stacks,
            source,
        });
        StatusChange::Added { stacks }
    }

    /// Removes `stacks` stacks (or the whole instance when `None`).
    ///
    /// Returns the number of stacks actually removed.
    pub fn remove(&mut self, status: StatusId, stacks: Option<u32>) -> u32 {
        let Some(index) = self.statuses.iter().position(|s| s.status == status) else {
            return 0;
        };

        let current = self.statuses[index].stacks;
        let removed = stacks.map_or(current, |n| n.min(current));
        if removed >= current {
            self.statuses.remove(index);
        } else {
            self.statuses[index].stacks -= removed;
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusInstance> {
        self.statuses.iter()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(stacking: StackPolicy, max_stacks: u32) -> StatusTemplate {
        StatusTemplate {
            id: StatusId(1),
            name: "bleeding".into(),
            max_stacks,
            default_duration: 3,
            stacking,
            blocks_skills: false,
        }
    }

    #[test]
    fn stacking_is_capped_by_template() {
        let bleed = template(StackPolicy::Stack, 3);
        let mut statuses = StatusCollection::empty();

        assert_eq!(statuses.add(&bleed, 2, 2, None), StatusChange::Added { stacks: 2 });
        assert_eq!(
            statuses.add(&bleed, 4, 2, None),
            StatusChange::Merged { stacks: 3 }
        );

        let instance = statuses.get(StatusId(1)).unwrap();
        assert_eq!(instance.stacks, 3);
        assert_eq!(instance.remaining, 4);
    }

    #[test]
    fn initial_application_respects_cap() {
        let bleed = template(StackPolicy::Stack, 2);
        let mut statuses = StatusCollection::empty();

        statuses.add(&bleed, 2, 5, None);
        assert_eq!(statuses.get(StatusId(1)).unwrap().stacks, 2);
    }

    #[test]
    fn refresh_keeps_longer_duration() {
        let stun = template(StackPolicy::Refresh, 1);
        let mut statuses = StatusCollection::empty();

        statuses.add(&stun, 3, 1, Some(EntityId(4)));
        statuses.add(&stun, 1, 1, Some(EntityId(5)));

        let instance = statuses.get(StatusId(1)).unwrap();
        assert_eq!(instance.remaining, 3);
        assert_eq!(instance.stacks, 1);
        assert_eq!(instance.source, Some(EntityId(5)));
    }

    #[test]
    fn removes_partial_and_full_stacks() {
        let bleed = template(StackPolicy::Stack, 5);
        let mut statuses = StatusCollection::empty();
        statuses.add(&bleed, 2, 4, None);

        assert_eq!(statuses.remove(StatusId(1), Some(1)), 1);
        assert_eq!(statuses.get(StatusId(1)).unwrap().stacks, 3);

        assert_eq!(statuses.remove(StatusId(1), None), 3);
        assert!(statuses.is_empty());
        assert_eq!(statuses.remove(StatusId(1), None), 0);
    }

    #[test]
    fn full_collection_rejects_new_status() {
        let mut statuses = StatusCollection::empty();
        for id in 0..CombatConfig::MAX_STATUS_EFFECTS as u16 {
            let mut t = template(StackPolicy::Stack, 1);
            t.id = StatusId(id + 10);
            statuses.add(&t, 1, 1, None);
        }

        let extra = template(StackPolicy::Stack, 1);
        assert_eq!(statuses.add(&extra, 1, 1, None), StatusChange::Rejected);
        assert!(!statuses.has(StatusId(1)));
    }
}
