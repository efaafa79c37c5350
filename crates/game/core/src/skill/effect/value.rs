use crate::state::{Entity, Properties, Property};

/// How an effect's base amount is computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Magnitude {
    Flat(u32),
    /// Percentage of the recipient's maximum hitpoints.
    PercentOfMaxHp(u32),
    /// `base + source.property * percent / 100`, floored at zero.
    Scaled {
        base: u32,
        property: Property,
        percent: u32,
    },
}

impl Magnitude {
    /// Evaluates against the source's captured properties and the recipient.
    pub fn resolve(&self, source: &Properties, recipient: &Entity) -> u32 {
        match *self {
            Magnitude::Flat(amount) => amount,
            Magnitude::PercentOfMaxHp(percent) => {
                (recipient.hp.maximum as u64 * percent as u64 / 100) as u32
            }
            Magnitude::Scaled {
                base,
                property,
                percent,
            } => {
                let scaled = source.get(property) as i64 * percent as i64 / 100;
                (base as i64 + scaled).clamp(0, u32::MAX as i64) as u32
            }
        }
    }
}
