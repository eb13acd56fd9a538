pub mod nature;
pub mod pokedex;

pub use self::nature::{Nature, NatureModifier};
pub use self::pokedex::{Pokedex, Species};

use crate::consts::{EV_STEP, MAX_IV, MAX_STAT_EVS, MAX_TOTAL_EVS};
use crate::error::{SfResult, SpreadForgeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use strum_macros::{Display, EnumIter};

/// The six battle stats in canonical (HP/Atk/Def/SpA/SpD/Spe) order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Atk,
        Stat::Def,
        Stat::Spa,
        Stat::Spd,
        Stat::Spe,
    ];

    /// Showdown export label.
    pub fn label(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Atk => "Atk",
            Stat::Def => "Def",
            Stat::Spa => "SpA",
            Stat::Spd => "SpD",
            Stat::Spe => "Spe",
        }
    }

    /// Matches any known spelling of a stat, ignoring case and whitespace.
    pub fn from_label(label: &str) -> Option<Stat> {
        let normalized: String = label
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "hp" => Some(Stat::Hp),
            "atk" | "attack" => Some(Stat::Atk),
            "def" | "defense" => Some(Stat::Def),
            "spa" | "spatk" | "sp.atk" | "specialattack" => Some(Stat::Spa),
            "spd" | "spdef" | "sp.def" | "specialdefense" => Some(Stat::Spd),
            "spe" | "speed" => Some(Stat::Spe),
            _ => None,
        }
    }
}

impl FromStr for Stat {
    type Err = SpreadForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::from_label(s).ok_or_else(|| SpreadForgeError::UnknownStat(s.to_string()))
    }
}

/// Six named values, one per stat. Base stats, EVs, IVs and computed stat
/// blocks all share this shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StatTable {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

/// Per-stat EV requirement reported by a single goal.
pub type PartialSpread = BTreeMap<Stat, u16>;

impl StatTable {
    pub const fn new(hp: u16, atk: u16, def: u16, spa: u16, spd: u16, spe: u16) -> Self {
        Self {
            hp,
            atk,
            def,
            spa,
            spd,
            spe,
        }
    }

    pub const fn splat(value: u16) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    pub const fn zero() -> Self {
        Self::splat(0)
    }

    pub const fn perfect_ivs() -> Self {
        Self::splat(MAX_IV)
    }

    pub fn get(&self, stat: Stat) -> u16 {
        self[stat]
    }

    pub fn set(&mut self, stat: Stat, value: u16) {
        self[stat] = value;
    }

    pub fn with(mut self, stat: Stat, value: u16) -> Self {
        self[stat] = value;
        self
    }

    pub fn total(&self) -> u32 {
        self.iter().map(|(_, v)| v as u32).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, u16)> + '_ {
        Stat::ALL.iter().map(move |&s| (s, self[s]))
    }

    pub fn to_array(&self) -> [u16; 6] {
        [self.hp, self.atk, self.def, self.spa, self.spd, self.spe]
    }

    pub fn validate_evs(&self) -> SfResult<()> {
        for (stat, ev) in self.iter() {
            if ev > MAX_STAT_EVS {
                return Err(SpreadForgeError::InvalidSpread(format!(
                    "{} EVs exceed {} ({})",
                    stat.label(),
                    MAX_STAT_EVS,
                    ev
                )));
            }
        }
        let total = self.total();
        if total > MAX_TOTAL_EVS as u32 {
            return Err(SpreadForgeError::InvalidSpread(format!(
                "EV total {} exceeds {}",
                total, MAX_TOTAL_EVS
            )));
        }
        Ok(())
    }

    pub fn validate_ivs(&self) -> SfResult<()> {
        match self.iter().find(|&(_, iv)| iv > MAX_IV) {
            Some((stat, iv)) => Err(SpreadForgeError::InvalidSpread(format!(
                "{} IV must be between 0 and {} ({})",
                stat.label(),
                MAX_IV,
                iv
            ))),
            None => Ok(()),
        }
    }
}

impl Index<Stat> for StatTable {
    type Output = u16;

    fn index(&self, stat: Stat) -> &u16 {
        match stat {
            Stat::Hp => &self.hp,
            Stat::Atk => &self.atk,
            Stat::Def => &self.def,
            Stat::Spa => &self.spa,
            Stat::Spd => &self.spd,
            Stat::Spe => &self.spe,
        }
    }
}

impl IndexMut<Stat> for StatTable {
    fn index_mut(&mut self, stat: Stat) -> &mut u16 {
        match stat {
            Stat::Hp => &mut self.hp,
            Stat::Atk => &mut self.atk,
            Stat::Def => &mut self.def,
            Stat::Spa => &mut self.spa,
            Stat::Spd => &mut self.spd,
            Stat::Spe => &mut self.spe,
        }
    }
}

impl From<[u16; 6]> for StatTable {
    fn from(v: [u16; 6]) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

impl fmt::Display for StatTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HP: {} | Atk: {} | Def: {} | SpA: {} | SpD: {} | Spe: {}",
            self.hp, self.atk, self.def, self.spa, self.spd, self.spe
        )
    }
}

#[inline]
fn core_value(base: u16, iv: u16, ev: u16, level: u8) -> u32 {
    (2 * base as u32 + iv as u32 + (ev / 4) as u32) * level as u32 / 100
}

/// HP = floor((2*Base + IV + floor(EV/4)) * Level/100) + Level + 10
pub fn compute_hp(base: u16, iv: u16, ev: u16, level: u8) -> u16 {
    (core_value(base, iv, ev, level) + level as u32 + 10) as u16
}

/// Stat = floor((floor((2*Base + IV + floor(EV/4)) * Level/100) + 5) * Nature)
pub fn compute_stat(base: u16, iv: u16, ev: u16, modifier: NatureModifier, level: u8) -> u16 {
    modifier.apply(core_value(base, iv, ev, level) + 5) as u16
}

/// Computes a full stat block from base stats.
pub fn stat_block(
    base: &StatTable,
    evs: &StatTable,
    ivs: &StatTable,
    nature: Nature,
    level: u8,
) -> StatTable {
    let mut out = StatTable::zero();
    out.hp = compute_hp(base.hp, ivs.hp, evs.hp, level);
    for stat in &Stat::ALL[1..] {
        out[*stat] = compute_stat(
            base[*stat],
            ivs[*stat],
            evs[*stat],
            nature.modifier(*stat),
            level,
        );
    }
    out
}

pub fn compute_all_stats(
    dex: &Pokedex,
    species: &str,
    evs: &StatTable,
    ivs: &StatTable,
    nature: Nature,
    level: u8,
) -> SfResult<StatTable> {
    let entry = dex.get(species)?;
    Ok(stat_block(&entry.base, evs, ivs, nature, level))
}

/// Smallest EV investment (multiple of 4) that reaches `target`, or `None`
/// when even 252 EVs fall short.
pub fn evs_for_target(
    base: u16,
    target: u16,
    iv: u16,
    modifier: NatureModifier,
    level: u8,
    is_hp: bool,
) -> Option<u16> {
    (0..=MAX_STAT_EVS).step_by(EV_STEP as usize).find(|&ev| {
        let value = if is_hp {
            compute_hp(base, iv, ev, level)
        } else {
            compute_stat(base, iv, ev, modifier, level)
        };
        value >= target
    })
}
