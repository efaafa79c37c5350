//! Faction membership and the relationship filters used by targeting.

/// Side a combatant fights for.
///
/// `Player` and `Allied` share a side; `Neutral` is hostile to nobody.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    Player,
    Allied,
    Enemy,
    Neutral,
}

impl Faction {
    fn side(self) -> Option<u8> {
        match self {
            Faction::Player | Faction::Allied => Some(0),
            Faction::Enemy => Some(1),
            Faction::Neutral => None,
        }
    }

    pub fn is_hostile_to(self, other: Faction) -> bool {
        matches!((self.side(), other.side()), (Some(a), Some(b)) if a != b)
    }

    pub fn is_allied_with(self, other: Faction) -> bool {
        self == other || matches!((self.side(), other.side()), (Some(a), Some(b)) if a == b)
    }
}

/// Relationship policy relative to the acting entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FactionFilter {
    #[default]
    Any,
    Enemies,
    Allies,
}

impl FactionFilter {
    /// Returns true if an entity of faction `other` passes this filter for an
    /// actor of faction `actor`.
    pub fn accepts(self, actor: Faction, other: Faction) -> bool {
        match self {
            FactionFilter::Any => true,
            FactionFilter::Enemies => actor.is_hostile_to(other),
            FactionFilter::Allies => actor.is_allied_with(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_and_allied_share_a_side() {
        assert!(Faction::Player.is_allied_with(Faction::Allied));
        assert!(!Faction::Player.is_hostile_to(Faction::Allied));
        assert!(Faction::Allied.is_hostile_to(Faction::Enemy));
    }

    #[test]
    fn neutral_is_nobodys_enemy() {
        assert!(!Faction::Neutral.is_hostile_to(Faction::Enemy));
        assert!(!Faction::Enemy.is_hostile_to(Faction::Neutral));
        assert!(Faction::Neutral.is_allied_with(Faction::Neutral));
        assert!(!Faction::Neutral.is_allied_with(Faction::Player));
    }

    #[test]
    fn filters_are_relative_to_the_actor() {
        assert!(FactionFilter::Enemies.accepts(Faction::Enemy, Faction::Player));
        assert!(!FactionFilter::Enemies.accepts(Faction::Enemy, Faction::Enemy));
        assert!(FactionFilter::Allies.accepts(Faction::Enemy, Faction::Enemy));
        assert!(FactionFilter::Any.accepts(Faction::Player, Faction::Neutral));
    }
}
