use crate::consts::{BENCHMARK_LIMIT, MAX_IV, MAX_STAT_EVS};
use crate::error::SfResult;
use crate::stats::{compute_all_stats, Nature, NatureModifier, Pokedex, StatTable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Notable base speeds, fastest first.
pub const SPEED_BENCHMARKS: &[(u16, &[&str])] = &[
    (200, &["Regieleki"]),
    (150, &["Calyrex-Shadow", "Electrode-Hisui"]),
    (142, &["Dragapult"]),
    (136, &["Iron Bundle"]),
    (135, &["Flutter Mane", "Chien-Pao", "Miraidon", "Koraidon"]),
    (126, &["Talonflame"]),
    (125, &["Weavile"]),
    (123, &["Meowscarada"]),
    (120, &["Sneasler"]),
    (119, &["Cinderace"]),
    (116, &["Whimsicott"]),
    (111, &["Tornadus", "Maushold"]),
    (110, &["Gengar", "Ogerpon"]),
    (109, &["Ninetales-Alola"]),
    (102, &["Garchomp"]),
    (100, &["Chi-Yu", "Charizard", "Volcarona", "Salamence", "Palafin-Hero"]),
    (97, &["Urshifu"]),
    (95, &["Arcanine"]),
    (91, &["Landorus-Therian"]),
    (90, &["Lucario", "Annihilape", "Arcanine-Hisui"]),
    (87, &["Baxcalibur"]),
    (86, &["Glimmora"]),
    (85, &["Rillaboom", "Indeedee-F"]),
    (84, &["Gholdengo"]),
    (82, &["Tatsugiri"]),
    (81, &["Gyarados"]),
    (80, &["Dragonite", "Togekiss"]),
    (77, &["Heatran"]),
    (75, &["Raging Bolt", "Armarouge"]),
    (70, &["Politoed"]),
    (65, &["Pelipper"]),
    (61, &["Tyranitar"]),
    (60, &["Incineroar", "Porygon2", "Farigiraf", "Grimmsnarl"]),
    (50, &["Kingambit", "Iron Hands", "Ursaluna", "Calyrex-Ice"]),
    (35, &["Dondozo"]),
    (30, &["Amoonguss", "Snorlax"]),
    (29, &["Hatterene"]),
    (25, &["Dusclops"]),
    (20, &["Torkoal", "Ferrothorn"]),
    (5, &["Shuckle"]),
];

pub fn speed_of(
    dex: &Pokedex,
    species: &str,
    evs: &StatTable,
    ivs: &StatTable,
    nature: Nature,
    level: u8,
) -> SfResult<u16> {
    Ok(compute_all_stats(dex, species, evs, ivs, nature, level)?.spe)
}

/// 0 EVs, 0 IV, speed-lowering nature.
pub fn min_speed(base: u16, level: u8) -> u16 {
    let raw = 2 * base as u32 * level as u32 / 100 + 5;
    NatureModifier::Lowered.apply(raw) as u16
}

/// 252 EVs, 31 IV, speed-boosting nature.
pub fn max_speed(base: u16, level: u8) -> u16 {
    let core = 2 * base as u32 + MAX_IV as u32 + (MAX_STAT_EVS / 4) as u32;
    let raw = core * level as u32 / 100 + 5;
    NatureModifier::Boosted.apply(raw) as u16
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkHit {
    pub pokemon: String,
    pub base_speed: u16,
    pub min_speed: u16,
    pub max_speed: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedBenchmarks {
    pub speed: u16,
    /// Faster than the entry's fastest possible spread.
    pub outspeeds: Vec<BenchmarkHit>,
    /// Slower than the entry's slowest possible spread.
    pub underspeeds: Vec<BenchmarkHit>,
    /// Inside the entry's [min, max] window.
    pub possible_ties: Vec<BenchmarkHit>,
}

pub fn find_benchmarks(speed: u16, level: u8) -> SpeedBenchmarks {
    let mut outspeeds = Vec::new();
    let mut underspeeds = Vec::new();
    let mut possible_ties = Vec::new();

    for &(base, names) in SPEED_BENCHMARKS {
        let lo = min_speed(base, level);
        let hi = max_speed(base, level);
        for name in names {
            let hit = BenchmarkHit {
                pokemon: name.to_string(),
                base_speed: base,
                min_speed: lo,
                max_speed: hi,
            };
            if speed > hi {
                outspeeds.push(hit);
            } else if speed < lo {
                underspeeds.push(hit);
            } else {
                possible_ties.push(hit);
            }
        }
    }

    outspeeds.truncate(BENCHMARK_LIMIT);
    underspeeds.truncate(BENCHMARK_LIMIT);
    possible_ties.truncate(BENCHMARK_LIMIT);

    SpeedBenchmarks {
        speed,
        outspeeds,
        underspeeds,
        possible_ties,
    }
}

/// One side of a speed comparison.
#[derive(Debug, Clone)]
pub struct SpeedEntry<'a> {
    pub species: &'a str,
    pub evs: StatTable,
    pub ivs: StatTable,
    pub nature: Nature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedComparison {
    pub first: (String, u16),
    pub second: (String, u16),
    pub difference: u16,
    /// Name of the faster Pokemon, `None` on a speed tie.
    pub faster: Option<String>,
}

pub fn compare_speeds(
    dex: &Pokedex,
    a: &SpeedEntry<'_>,
    b: &SpeedEntry<'_>,
    level: u8,
) -> SfResult<SpeedComparison> {
    let speed_a = speed_of(dex, a.species, &a.evs, &a.ivs, a.nature, level)?;
    let speed_b = speed_of(dex, b.species, &b.evs, &b.ivs, b.nature, level)?;

    let faster = match speed_a.cmp(&speed_b) {
        Ordering::Greater => Some(a.species.to_string()),
        Ordering::Less => Some(b.species.to_string()),
        Ordering::Equal => None,
    };

    Ok(SpeedComparison {
        first: (a.species.to_string(), speed_a),
        second: (b.species.to_string(), speed_b),
        difference: speed_a.abs_diff(speed_b),
        faster,
    })
}
