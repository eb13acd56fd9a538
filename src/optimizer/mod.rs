pub mod goals;
pub mod ko;
pub mod nature;
pub mod runner;
pub mod scan;
pub mod speed;
pub mod survive;

pub use self::goals::{CombatantSpec, Goal, GoalResult, GoalSpec, OpponentRef, OpponentSpec};
pub use self::runner::{OptimizeRequest, OptimizedSpread, OptimizerOptions, SpreadOptimizer};
pub use self::scan::ScanPolicy;

use crate::oracle::{DamageOracle, DamageRange, DamageRequest, OracleError, PokemonSpec};
use crate::stats::{Nature, PartialSpread, Pokedex, Species, StatTable};
use std::sync::atomic::{AtomicBool, Ordering};

/// The Pokemon being built.
#[derive(Debug, Clone)]
pub struct Subject<'a> {
    pub species: &'a Species,
    pub nature: Nature,
    pub ivs: StatTable,
    pub item: Option<&'a str>,
    pub ability: Option<&'a str>,
    pub tera_type: Option<&'a str>,
    pub level: u8,
}

impl Subject<'_> {
    pub fn pokemon_spec(&self, evs: StatTable) -> PokemonSpec {
        PokemonSpec {
            name: self.species.name.clone(),
            level: self.level,
            evs: Some(evs),
            ivs: Some(self.ivs),
            nature: Some(self.nature),
            item: self.item.map(str::to_string),
            ability: self.ability.map(str::to_string),
            tera_type: self.tera_type.map(str::to_string),
            boosts: None,
            status: None,
        }
    }
}

/// Everything a solver may read while handling one goal.
pub struct SolveContext<'a> {
    pub dex: &'a Pokedex,
    pub subject: &'a Subject<'a>,
    /// EVs committed by earlier goals.
    pub committed: StatTable,
    pub remaining: u16,
    pub oracle: &'a dyn DamageOracle,
    pub scan: &'a ScanPolicy<'a>,
    skipped: AtomicBool,
}

impl<'a> SolveContext<'a> {
    pub fn new(
        dex: &'a Pokedex,
        subject: &'a Subject<'a>,
        committed: StatTable,
        remaining: u16,
        oracle: &'a dyn DamageOracle,
        scan: &'a ScanPolicy<'a>,
    ) -> Self {
        Self {
            dex,
            subject,
            committed,
            remaining,
            oracle,
            scan,
            skipped: AtomicBool::new(false),
        }
    }

    /// One oracle call, skipped once the deadline has passed.
    pub fn query(&self, request: &DamageRequest) -> Option<Result<DamageRange, OracleError>> {
        if self.scan.expired() {
            self.skipped.store(true, Ordering::Relaxed);
            return None;
        }
        Some(self.oracle.evaluate(request))
    }

    /// True once a call has been dropped because of the deadline.
    pub fn cut_short(&self) -> bool {
        self.skipped.load(Ordering::Relaxed)
    }
}

/// A solver's verdict before it is merged into the running spread.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalOutcome {
    pub achieved: bool,
    pub evs: PartialSpread,
    pub detail: String,
    /// Replacement IV table, set when the goal needs different IVs.
    pub ivs: Option<StatTable>,
    pub suggestion: Option<String>,
    /// What the goal result shows when it differs from `evs`.
    pub reported: Option<PartialSpread>,
}

impl GoalOutcome {
    pub fn met(evs: PartialSpread, detail: impl Into<String>) -> Self {
        Self {
            achieved: true,
            evs,
            detail: detail.into(),
            ivs: None,
            suggestion: None,
            reported: None,
        }
    }

    pub fn missed(detail: impl Into<String>) -> Self {
        Self {
            achieved: false,
            evs: PartialSpread::new(),
            detail: detail.into(),
            ivs: None,
            suggestion: None,
            reported: None,
        }
    }

    pub fn with_ivs(mut self, ivs: StatTable) -> Self {
        self.ivs = Some(ivs);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_reported(mut self, evs: PartialSpread) -> Self {
        self.reported = Some(evs);
        self
    }
}

/// EV values 0, 4, ..., up to `cap`.
pub(crate) fn ev_steps(cap: u16) -> impl Iterator<Item = u16> + Clone {
    (0..=cap).step_by(crate::consts::EV_STEP as usize)
}
