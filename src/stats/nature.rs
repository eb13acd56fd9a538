use super::Stat;
use crate::error::{SfResult, SpreadForgeError};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Nature {
    #[default]
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

/// Nature effect on one stat, kept in integer tenths so flooring is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NatureModifier {
    Lowered,
    Neutral,
    Boosted,
}

impl NatureModifier {
    pub fn tenths(self) -> u32 {
        match self {
            NatureModifier::Lowered => 9,
            NatureModifier::Neutral => 10,
            NatureModifier::Boosted => 11,
        }
    }

    pub fn multiplier(self) -> f32 {
        self.tenths() as f32 / 10.0
    }

    #[inline]
    pub fn apply(self, raw: u32) -> u32 {
        raw * self.tenths() / 10
    }
}

impl Nature {
    /// `(boosted, lowered)`, or `None` for the five neutral natures.
    pub fn effect(self) -> Option<(Stat, Stat)> {
        use Stat::*;
        match self {
            Nature::Lonely => Some((Atk, Def)),
            Nature::Brave => Some((Atk, Spe)),
            Nature::Adamant => Some((Atk, Spa)),
            Nature::Naughty => Some((Atk, Spd)),
            Nature::Bold => Some((Def, Atk)),
            Nature::Relaxed => Some((Def, Spe)),
            Nature::Impish => Some((Def, Spa)),
            Nature::Lax => Some((Def, Spd)),
            Nature::Timid => Some((Spe, Atk)),
            Nature::Hasty => Some((Spe, Def)),
            Nature::Jolly => Some((Spe, Spa)),
            Nature::Naive => Some((Spe, Spd)),
            Nature::Modest => Some((Spa, Atk)),
            Nature::Mild => Some((Spa, Def)),
            Nature::Quiet => Some((Spa, Spe)),
            Nature::Rash => Some((Spa, Spd)),
            Nature::Calm => Some((Spd, Atk)),
            Nature::Gentle => Some((Spd, Def)),
            Nature::Sassy => Some((Spd, Spe)),
            Nature::Careful => Some((Spd, Spa)),
            Nature::Hardy | Nature::Docile | Nature::Serious | Nature::Bashful | Nature::Quirky => {
                None
            }
        }
    }

    pub fn is_neutral(self) -> bool {
        self.effect().is_none()
    }

    pub fn modifier(self, stat: Stat) -> NatureModifier {
        match self.effect() {
            Some((up, _)) if up == stat => NatureModifier::Boosted,
            Some((_, down)) if down == stat => NatureModifier::Lowered,
            _ => NatureModifier::Neutral,
        }
    }

    /// The nature raising `boosted` and lowering `lowered`.
    pub fn from_effect(boosted: Stat, lowered: Stat) -> Option<Nature> {
        Nature::iter().find(|n| n.effect() == Some((boosted, lowered)))
    }

    pub fn parse(name: &str) -> SfResult<Nature> {
        name.trim()
            .parse()
            .map_err(|_| SpreadForgeError::UnknownNature(name.to_string()))
    }
}
