use super::{ev_steps, GoalOutcome, SolveContext};
use crate::consts::MAX_STAT_EVS;
use crate::oracle::{DamageRange, DamageRequest, FieldSpec};
use crate::optimizer::goals::CombatantSpec;
use crate::stats::{PartialSpread, Stat, StatTable};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, warn};

/// Defensive spread used to learn a move's category before scanning.
const REFERENCE_BULK: StatTable = StatTable::new(252, 0, 252, 0, 252, 0);

#[derive(Debug, Clone, Copy)]
struct Candidate {
    hp: u16,
    def: u16,
    range: DamageRange,
}

impl Candidate {
    fn total(&self) -> u32 {
        self.hp as u32 + self.def as u32
    }
}

/// Cheapest HP + defensive investment that keeps the subject above 0 HP.
pub fn solve(
    ctx: &SolveContext<'_>,
    attacker: &CombatantSpec,
    move_name: &str,
    field: &FieldSpec,
) -> GoalOutcome {
    let level = ctx.subject.level;
    let request_for = |evs: StatTable| DamageRequest {
        attacker: attacker.pokemon_spec(level),
        defender: ctx.subject.pokemon_spec(evs),
        move_name: move_name.to_string(),
        field: field.clone(),
    };

    let category = match ctx.query(&request_for(REFERENCE_BULK)) {
        Some(Ok(range)) => range.category,
        Some(Err(e)) => {
            warn!("Category probe failed for {}: {}", move_name, e);
            return GoalOutcome::missed(e.to_string());
        }
        None => return GoalOutcome::missed("Time limit reached before the scan started"),
    };
    let def_stat = category.defensive_stat();
    debug!(
        "Survive {}'s {}: {} move, scanning HP/{}",
        attacker.species,
        move_name,
        category,
        def_stat.label()
    );

    let remaining = ctx.remaining;
    let rows: Vec<u16> = ev_steps(MAX_STAT_EVS.min(remaining)).collect();
    let best_total = AtomicU32::new(u32::MAX);

    let found = ctx.scan.map_rows(&rows, |&hp| {
        let def_cap = MAX_STAT_EVS.min(remaining - hp);
        for def in ev_steps(def_cap) {
            if hp as u32 + def as u32 > best_total.load(Ordering::Relaxed) {
                return None;
            }
            let evs = ctx.committed.with(Stat::Hp, hp).with(def_stat, def);
            match ctx.query(&request_for(evs)) {
                Some(Ok(range)) if range.survives() => {
                    best_total.fetch_min(hp as u32 + def as u32, Ordering::Relaxed);
                    return Some(Candidate { hp, def, range });
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => debug!("Probe {} HP / {} {} failed: {}", hp, def, def_stat.label(), e),
                None => return None,
            }
        }
        None
    });

    let best = found
        .into_iter()
        .flatten()
        .min_by_key(|c| (c.total(), c.hp));
    let timed_out = ctx.cut_short();

    match best {
        Some(c) => {
            let mut evs = PartialSpread::new();
            evs.insert(Stat::Hp, c.hp);
            evs.insert(def_stat, c.def);
            let mut detail = format!("Takes {} damage", c.range);
            if timed_out {
                warn!("Time limit hit while scanning survival spreads");
                detail.push_str(" (time limit reached, best found so far)");
            }
            GoalOutcome::met(evs, detail)
        }
        None if timed_out => {
            GoalOutcome::missed("Time limit reached before a surviving spread was found")
        }
        None => {
            let hp = MAX_STAT_EVS.min(remaining);
            let def = MAX_STAT_EVS.min(remaining - hp);
            let evs = ctx.committed.with(Stat::Hp, hp).with(def_stat, def);
            let mut detail = format!(
                "Cannot survive {}'s {} with available EVs",
                attacker.species, move_name
            );
            if let Some(Ok(range)) = ctx.query(&request_for(evs)) {
                detail.push_str(&format!(" (takes {} at max investment)", range));
            }
            GoalOutcome::missed(detail)
        }
    }
}
