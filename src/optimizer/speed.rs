use super::{GoalOutcome, SolveContext};
use crate::consts::MAX_STAT_EVS;
use crate::error::SfResult;
use crate::optimizer::goals::CombatantSpec;
use crate::stats::{compute_stat, evs_for_target, PartialSpread, Stat};
use tracing::debug;

fn target_speed(ctx: &SolveContext<'_>, target: &CombatantSpec) -> SfResult<u16> {
    crate::speed::speed_of(
        ctx.dex,
        &target.species,
        &target.evs,
        &target.ivs_or_perfect(),
        target.nature,
        ctx.subject.level,
    )
}

pub fn outspeed(ctx: &SolveContext<'_>, target: &CombatantSpec) -> GoalOutcome {
    let their_speed = match target_speed(ctx, target) {
        Ok(s) => s,
        Err(e) => return GoalOutcome::missed(e.to_string()),
    };

    let subject = ctx.subject;
    let base = subject.species.base.spe;
    let iv = subject.ivs.spe;
    let modifier = subject.nature.modifier(Stat::Spe);
    let cap = MAX_STAT_EVS.min(ctx.committed.spe.saturating_add(ctx.remaining));

    let needed = their_speed + 1;
    debug!(
        "Outspeed {}: need {} Spe, affordable cap {} EVs",
        target.species, needed, cap
    );

    match evs_for_target(base, needed, iv, modifier, subject.level, false) {
        Some(ev) if ev <= cap => {
            let speed = compute_stat(base, iv, ev, modifier, subject.level);
            let mut evs = PartialSpread::new();
            evs.insert(Stat::Spe, ev);
            GoalOutcome::met(
                evs,
                format!(
                    "{} Spe outspeeds {}'s {} (+{})",
                    speed,
                    target.species,
                    their_speed,
                    speed - their_speed
                ),
            )
        }
        _ => {
            let best = compute_stat(base, iv, cap, modifier, subject.level);
            GoalOutcome::missed(format!(
                "Cannot outspeed {}'s {} Spe (max {} Spe)",
                target.species, their_speed, best
            ))
        }
    }
}

/// Zero speed IV and no speed EVs. The new IV table is returned on the outcome
/// whether or not the goal is met.
pub fn underspeed(ctx: &SolveContext<'_>, target: &CombatantSpec) -> GoalOutcome {
    let their_speed = match target_speed(ctx, target) {
        Ok(s) => s,
        Err(e) => return GoalOutcome::missed(e.to_string()),
    };

    let subject = ctx.subject;
    let ivs = subject.ivs.with(Stat::Spe, 0);
    let own = compute_stat(
        subject.species.base.spe,
        0,
        0,
        subject.nature.modifier(Stat::Spe),
        subject.level,
    );
    debug!(
        "Underspeed {}: {} Spe vs {}",
        target.species, own, their_speed
    );

    if own < their_speed {
        GoalOutcome::met(
            PartialSpread::new(),
            format!(
                "{} Spe underspeeds {}'s {} (0 Spe IV)",
                own, target.species, their_speed
            ),
        )
        .with_ivs(ivs)
    } else {
        GoalOutcome::missed(format!(
            "{} Spe cannot underspeed {}'s {}",
            own, target.species, their_speed
        ))
        .with_ivs(ivs)
        .with_suggestion(format!(
            "Consider a -Spe nature to underspeed {}",
            target.species
        ))
    }
}
