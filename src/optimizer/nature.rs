use super::goals::Goal;
use crate::stats::{Nature, StatTable};

/// Picks a nature that fits the goal list when the caller did not choose one.
///
/// Speed goals dominate, then offense, then bulk. The attacking side is chosen
/// by whichever of base Atk or SpA is higher (ties go to Atk).
pub fn infer_nature(goals: &[Goal], base: &StatTable) -> Nature {
    let has = |pred: fn(&Goal) -> bool| goals.iter().any(pred);
    let physical = base.atk >= base.spa;

    let wants_ko = has(|g| matches!(g, Goal::GuaranteeKo { .. }));

    if has(|g| matches!(g, Goal::Underspeed { .. })) {
        return match (wants_ko, physical) {
            (true, true) => Nature::Brave,
            (true, false) => Nature::Quiet,
            (false, _) => Nature::Relaxed,
        };
    }

    if has(|g| matches!(g, Goal::Outspeed { .. })) {
        return if physical {
            Nature::Jolly
        } else {
            Nature::Timid
        };
    }

    if wants_ko {
        return if physical {
            Nature::Adamant
        } else {
            Nature::Modest
        };
    }

    if has(|g| matches!(g, Goal::Survive { .. })) {
        return Nature::Careful;
    }

    Nature::Hardy
}
