use super::goals::{Goal, GoalResult};
use super::nature::infer_nature;
use super::scan::ScanPolicy;
use super::{ko, speed, survive, GoalOutcome, SolveContext, Subject};
use crate::config::Config;
use crate::consts::{DEFAULT_LEVEL, EV_STEP, MAX_STAT_EVS, MAX_TOTAL_EVS};
use crate::error::{SfResult, SpreadForgeError};
use crate::oracle::{CachedOracle, DamageOracle};
use crate::stats::{stat_block, Nature, PartialSpread, Pokedex, Stat, StatTable};
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

/// Stats topped up with any budget left after every goal, in this order.
const LEFTOVER_ORDER: [Stat; 3] = [Stat::Hp, Stat::Def, Stat::Spd];

#[derive(Debug, Clone)]
pub struct OptimizerOptions {
    pub level: u8,
    pub oracle_threads: usize,
    pub cache_capacity: usize,
    pub max_time: Option<Duration>,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            oracle_threads: 1,
            cache_capacity: 4096,
            max_time: None,
        }
    }
}

impl From<&Config> for OptimizerOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            level: cfg.search.level,
            oracle_threads: cfg.search.oracle_threads.max(1),
            cache_capacity: cfg.search.cache_capacity,
            max_time: match cfg.search.max_time_ms {
                0 => None,
                ms => Some(Duration::from_millis(ms)),
            },
        }
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct OptimizeRequest {
    #[builder(setter(into))]
    pub species: String,
    #[builder(default)]
    pub goals: Vec<Goal>,
    #[builder(default, setter(strip_option))]
    pub nature: Option<Nature>,
    #[builder(default, setter(strip_option, into))]
    pub item: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub ability: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub tera_type: Option<String>,
    #[builder(default, setter(strip_option))]
    pub ivs: Option<StatTable>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedSpread {
    pub species: String,
    pub nature: Nature,
    pub evs: StatTable,
    pub ivs: StatTable,
    pub stats: StatTable,
    pub goal_results: Vec<GoalResult>,
    pub ev_total: u32,
    pub suggestions: Vec<String>,
}

impl OptimizedSpread {
    pub fn all_achieved(&self) -> bool {
        self.goal_results.iter().all(|r| r.achieved)
    }

    fn failed(species: &str, nature: Nature, ivs: StatTable, result: GoalResult) -> Self {
        Self {
            species: species.to_string(),
            nature,
            evs: StatTable::zero(),
            ivs,
            stats: StatTable::zero(),
            goal_results: vec![result],
            ev_total: 0,
            suggestions: Vec::new(),
        }
    }
}

pub struct SpreadOptimizer {
    dex: Pokedex,
    oracle: Box<dyn DamageOracle>,
    pool: Option<ThreadPool>,
    options: OptimizerOptions,
}

impl SpreadOptimizer {
    pub fn new<O>(dex: Pokedex, oracle: O, options: OptimizerOptions) -> SfResult<Self>
    where
        O: DamageOracle + 'static,
    {
        let pool = if options.oracle_threads > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(options.oracle_threads)
                .thread_name(|i| format!("oracle-scan-{}", i))
                .build()
                .map_err(|e| SpreadForgeError::Config(format!("oracle pool: {}", e)))?;
            Some(pool)
        } else {
            None
        };

        let oracle: Box<dyn DamageOracle> = if options.cache_capacity > 0 {
            Box::new(CachedOracle::new(oracle, options.cache_capacity))
        } else {
            Box::new(oracle)
        };

        Ok(Self {
            dex,
            oracle,
            pool,
            options,
        })
    }

    pub fn dex(&self) -> &Pokedex {
        &self.dex
    }

    pub fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    pub fn optimize(&self, req: &OptimizeRequest) -> OptimizedSpread {
        let start = Instant::now();
        let level = self.options.level;
        let ivs = req.ivs.unwrap_or_else(StatTable::perfect_ivs);

        let species = match self.dex.get(&req.species) {
            Ok(s) => s,
            Err(e) => {
                warn!("{}", e);
                let result = GoalResult {
                    description: "Find Pokemon".to_string(),
                    achieved: false,
                    evs_used: PartialSpread::new(),
                    detail: e.to_string(),
                };
                let nature = req.nature.unwrap_or_default();
                return OptimizedSpread::failed(&req.species, nature, ivs, result);
            }
        };

        let nature = req
            .nature
            .unwrap_or_else(|| infer_nature(&req.goals, &species.base));

        if let Err(e) = ivs.validate_ivs() {
            warn!("{}", e);
            let result = GoalResult {
                description: "Validate IVs".to_string(),
                achieved: false,
                evs_used: PartialSpread::new(),
                detail: e.to_string(),
            };
            return OptimizedSpread::failed(&species.name, nature, ivs, result);
        }

        info!(
            "Optimizing {} ({}) for {} goals",
            species.name,
            nature,
            req.goals.len()
        );

        let mut subject = Subject {
            species,
            nature,
            ivs,
            item: req.item.as_deref(),
            ability: req.ability.as_deref(),
            tera_type: req.tera_type.as_deref(),
            level,
        };

        let deadline = self.options.max_time.map(|limit| start + limit);
        let scan = ScanPolicy::new(self.pool.as_ref(), deadline);

        let mut evs = StatTable::zero();
        let mut goal_results = Vec::with_capacity(req.goals.len());
        let mut suggestions = Vec::new();

        for goal in &req.goals {
            let remaining = remaining_budget(&evs);
            debug!("Goal '{}' with {} EVs remaining", goal, remaining);

            let ctx = SolveContext::new(
                &self.dex,
                &subject,
                evs,
                remaining,
                self.oracle.as_ref(),
                &scan,
            );
            let outcome = solve(&ctx, goal);

            if let Some(new_ivs) = outcome.ivs {
                subject.ivs = new_ivs;
            }
            if let Some(s) = &outcome.suggestion {
                suggestions.push(s.clone());
            }
            let result = commit(&mut evs, remaining, goal, outcome);

            debug!(
                "{} -> {} ({})",
                result.description,
                if result.achieved { "met" } else { "missed" },
                result.detail
            );
            goal_results.push(result);
        }

        fill_leftover(&mut evs);

        if let Err(e) = evs.validate_evs() {
            warn!("Produced an invalid spread: {}", e);
        }

        let stats = stat_block(&species.base, &evs, &subject.ivs, nature, level);
        let ev_total = evs.total();

        info!(
            "{}: {} EVs, {}/{} goals met in {:.2?}",
            species.name,
            ev_total,
            goal_results.iter().filter(|r| r.achieved).count(),
            goal_results.len(),
            start.elapsed()
        );

        OptimizedSpread {
            species: species.name.clone(),
            nature,
            evs,
            ivs: subject.ivs,
            stats,
            goal_results,
            ev_total,
            suggestions,
        }
    }
}

fn remaining_budget(evs: &StatTable) -> u16 {
    (MAX_TOTAL_EVS as u32).saturating_sub(evs.total()) as u16
}

fn solve(ctx: &SolveContext<'_>, goal: &Goal) -> GoalOutcome {
    match goal {
        Goal::Survive {
            attacker,
            move_name,
            field,
        } => survive::solve(ctx, attacker, move_name, field),
        Goal::GuaranteeKo {
            defender,
            move_name,
        } => ko::solve(ctx, defender, move_name),
        Goal::Outspeed { target } => speed::outspeed(ctx, target),
        Goal::Underspeed { target } => speed::underspeed(ctx, target),
        Goal::Maximize { stat } => maximize(ctx, *stat),
    }
}

/// Merges a solver's outcome into `evs` (per-stat max) if the extra cost fits.
fn commit(evs: &mut StatTable, remaining: u16, goal: &Goal, outcome: GoalOutcome) -> GoalResult {
    let description = goal.description();
    if !outcome.achieved {
        return GoalResult {
            description,
            achieved: false,
            evs_used: PartialSpread::new(),
            detail: outcome.detail,
        };
    }

    let cost: u32 = outcome
        .evs
        .iter()
        .map(|(stat, &v)| v.saturating_sub(evs[*stat]) as u32)
        .sum();

    if cost > remaining as u32 {
        return GoalResult {
            description,
            achieved: false,
            evs_used: PartialSpread::new(),
            detail: format!(
                "Not enough EVs remaining ({} left, need {})",
                remaining, cost
            ),
        };
    }

    for (stat, &v) in &outcome.evs {
        evs[*stat] = evs[*stat].max(v);
    }

    GoalResult {
        description,
        achieved: true,
        evs_used: outcome.reported.unwrap_or(outcome.evs),
        detail: outcome.detail,
    }
}

/// Raises `stat` as far as the cap and the budget allow.
fn maximize(ctx: &SolveContext<'_>, stat: Stat) -> GoalOutcome {
    let current = ctx.committed[stat];
    let room = MAX_STAT_EVS.saturating_sub(current);
    let add = room.min(ctx.remaining) / EV_STEP * EV_STEP;

    if add < EV_STEP {
        return if ctx.remaining < EV_STEP {
            GoalOutcome::missed("No EVs remaining")
        } else {
            GoalOutcome::missed(format!(
                "{} is already at {} EVs",
                stat.label(),
                MAX_STAT_EVS
            ))
        };
    }

    let mut evs = PartialSpread::new();
    evs.insert(stat, current + add);
    let mut added = PartialSpread::new();
    added.insert(stat, add);
    GoalOutcome::met(evs, format!("Added {} EVs to {}", add, stat.label())).with_reported(added)
}

/// Spends what is left over in 4-point steps on HP, then Def, then SpD.
fn fill_leftover(evs: &mut StatTable) {
    for stat in LEFTOVER_ORDER {
        let remaining = remaining_budget(evs);
        let room = MAX_STAT_EVS.saturating_sub(evs[stat]);
        let add = room.min(remaining) / EV_STEP * EV_STEP;
        evs[stat] += add;
    }
}
