#![allow(dead_code)]

use spreadforge::codec;
use spreadforge::optimizer::{CombatantSpec, OptimizerOptions, SpreadOptimizer};
use spreadforge::oracle::{
    DamageOracle, DamageRange, DamageRequest, MoveCategory, OracleError, PokemonSpec,
};
use spreadforge::stats::{stat_block, Nature, Pokedex, StatTable};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Deterministic stand-in for a real damage calculator.
///
/// damage = ((floor(2L/5) + 2) * power * A / D) / 50 + 2, scaled by a fixed
/// per-move multiplier (in tenths). The low roll is 85% of the high roll.
/// No STAB, typing, items or field effects.
pub struct FormulaOracle {
    dex: Pokedex,
    moves: HashMap<&'static str, (u32, MoveCategory, u32)>,
}

impl FormulaOracle {
    pub fn new() -> Self {
        let mut moves = HashMap::new();
        moves.insert("Moonblast", (95, MoveCategory::Special, 30));
        moves.insert("Shadow Ball", (80, MoveCategory::Special, 30));
        moves.insert("Make It Rain", (120, MoveCategory::Special, 30));
        moves.insert("Wicked Blow", (75, MoveCategory::Physical, 30));
        moves.insert("Close Combat", (120, MoveCategory::Physical, 30));
        moves.insert("Flare Blitz", (120, MoveCategory::Physical, 30));
        moves.insert("Spore", (0, MoveCategory::Status, 10));
        Self {
            dex: Pokedex::builtin(),
            moves,
        }
    }

    fn stats_of(&self, p: &PokemonSpec) -> Result<StatTable, OracleError> {
        let species = self
            .dex
            .get(&p.name)
            .map_err(|e| OracleError::Rejected(e.to_string()))?;
        Ok(stat_block(
            &species.base,
            &p.evs.unwrap_or_default(),
            &p.ivs.unwrap_or_else(StatTable::perfect_ivs),
            p.nature.unwrap_or_default(),
            p.level,
        ))
    }
}

impl DamageOracle for FormulaOracle {
    fn evaluate(&self, req: &DamageRequest) -> Result<DamageRange, OracleError> {
        let &(power, category, mult) = self
            .moves
            .get(req.move_name.as_str())
            .ok_or_else(|| OracleError::Rejected(format!("unknown move {}", req.move_name)))?;

        let atk = self.stats_of(&req.attacker)?;
        let def = self.stats_of(&req.defender)?;

        if category == MoveCategory::Status {
            return Ok(DamageRange {
                min_percent: 0.0,
                max_percent: 0.0,
                category,
            });
        }

        let (a, d) = match category {
            MoveCategory::Special => (atk.spa as u32, def.spd as u32),
            _ => (atk.atk as u32, def.def as u32),
        };
        let level = req.attacker.level as u32;
        let base = ((2 * level / 5 + 2) * power * a / d) / 50 + 2;
        let high = base * mult / 10;
        let low = high * 85 / 100;
        let hp = def.hp as f64;

        Ok(DamageRange {
            min_percent: low as f64 * 100.0 / hp,
            max_percent: high as f64 * 100.0 / hp,
            category,
        })
    }
}

/// Counts calls that reach the wrapped oracle.
pub struct CountingOracle<O> {
    pub inner: O,
    pub calls: Arc<AtomicUsize>,
}

impl<O> CountingOracle<O> {
    pub fn new(inner: O) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl<O: DamageOracle> DamageOracle for CountingOracle<O> {
    fn evaluate(&self, req: &DamageRequest) -> Result<DamageRange, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.evaluate(req)
    }
}

pub fn opponent(species: &str, evs: &str, nature: Nature) -> CombatantSpec {
    CombatantSpec::new(species, codec::parse_evs(evs), nature)
}

/// 4 HP / 252 SpA / 252 Spe Modest Flutter Mane.
pub fn special_attacker() -> CombatantSpec {
    opponent("Flutter Mane", "4/0/0/252/0/252", Nature::Modest)
}

/// 252 Atk / 252 Spe Adamant Urshifu.
pub fn physical_attacker() -> CombatantSpec {
    opponent("Urshifu", "0/252/0/0/0/252", Nature::Adamant)
}

pub fn serial_options() -> OptimizerOptions {
    OptimizerOptions {
        oracle_threads: 1,
        ..Default::default()
    }
}

pub fn parallel_options() -> OptimizerOptions {
    OptimizerOptions {
        oracle_threads: 4,
        ..Default::default()
    }
}

pub fn optimizer_with(options: OptimizerOptions) -> SpreadOptimizer {
    SpreadOptimizer::new(Pokedex::builtin(), FormulaOracle::new(), options)
        .expect("optimizer should build")
}

pub fn optimizer() -> SpreadOptimizer {
    optimizer_with(serial_options())
}
