use super::{ev_steps, GoalOutcome, SolveContext};
use crate::consts::MAX_STAT_EVS;
use crate::oracle::{DamageRequest, FieldSpec};
use crate::optimizer::goals::CombatantSpec;
use crate::stats::{PartialSpread, StatTable};
use tracing::{debug, warn};

/// Smallest offensive investment that KOs from full HP on every roll.
///
/// Each probe uses a spread with only the attacking stat invested; EVs already
/// committed elsewhere are not sent to the oracle.
pub fn solve(ctx: &SolveContext<'_>, defender: &CombatantSpec, move_name: &str) -> GoalOutcome {
    let level = ctx.subject.level;
    let field = FieldSpec::default();
    let request_for = |evs: StatTable| DamageRequest {
        attacker: ctx.subject.pokemon_spec(evs),
        defender: defender.pokemon_spec(level),
        move_name: move_name.to_string(),
        field: field.clone(),
    };

    let category = match ctx.query(&request_for(StatTable::zero())) {
        Some(Ok(range)) => range.category,
        Some(Err(e)) => {
            warn!("Category probe failed for {}: {}", move_name, e);
            return GoalOutcome::missed(e.to_string());
        }
        None => return GoalOutcome::missed("Time limit reached before the scan started"),
    };
    let off_stat = category.offensive_stat();

    let cap = MAX_STAT_EVS.min(ctx.committed[off_stat].saturating_add(ctx.remaining));
    let steps: Vec<u16> = ev_steps(cap).collect();
    debug!(
        "OHKO {} with {}: {} move, scanning {} up to {}",
        defender.species,
        move_name,
        category,
        off_stat.label(),
        cap
    );

    let found = ctx.scan.find_first(&steps, |&ev| {
        match ctx.query(&request_for(StatTable::zero().with(off_stat, ev))) {
            Some(Ok(range)) if range.guarantees_ko() => Some((ev, range)),
            Some(Err(e)) => {
                debug!("Probe {} {} failed: {}", ev, off_stat.label(), e);
                None
            }
            _ => None,
        }
    });

    let timed_out = ctx.cut_short();

    match found {
        Some((ev, range)) => {
            let mut evs = PartialSpread::new();
            evs.insert(off_stat, ev);
            let mut detail = format!("Deals {} damage (guaranteed OHKO)", range);
            if timed_out {
                detail.push_str(" (time limit reached, best found so far)");
            }
            GoalOutcome::met(evs, detail)
        }
        None if timed_out => {
            warn!("Time limit hit while scanning OHKO spreads");
            GoalOutcome::missed("Time limit reached before a guaranteed OHKO was found")
        }
        None => {
            let mut detail = format!("Cannot OHKO {} with {}", defender.species, move_name);
            let max = StatTable::zero().with(off_stat, cap);
            if let Some(Ok(range)) = ctx.query(&request_for(max)) {
                detail.push_str(&format!(
                    " (deals {} at {} {})",
                    range,
                    cap,
                    off_stat.label()
                ));
            }
            GoalOutcome::missed(detail)
        }
    }
}
