mod common;

use common::optimizer;
use proptest::prelude::*;
use spreadforge::codec::{parse_evs, to_compact, to_labeled};
use spreadforge::optimizer::{CombatantSpec, Goal, OptimizeRequest};
use spreadforge::stats::{
    compute_hp, compute_stat, evs_for_target, Nature, NatureModifier, Stat, StatTable,
};
use strum::IntoEnumIterator;

// --- STRATEGIES ---

prop_compose! {
    fn arb_ev()(step in 0u16..=63) -> u16 {
        step * 4
    }
}

prop_compose! {
    fn arb_spread()(values in proptest::array::uniform6(arb_ev())) -> StatTable {
        StatTable::from(values)
    }
}

fn arb_nature() -> impl Strategy<Value = Nature> {
    let natures: Vec<Nature> = Nature::iter().collect();
    proptest::sample::select(natures)
}

fn arb_modifier() -> impl Strategy<Value = NatureModifier> {
    prop_oneof![
        Just(NatureModifier::Neutral),
        Just(NatureModifier::Boosted),
        Just(NatureModifier::Lowered),
    ]
}

fn arb_stat() -> impl Strategy<Value = Stat> {
    proptest::sample::select(Stat::ALL.to_vec())
}

// Speed-only and maximize goals never touch the oracle.
fn arb_goal() -> impl Strategy<Value = Goal> {
    let targets = vec!["Rillaboom", "Garchomp", "Amoonguss", "Dragapult", "Incineroar"];
    prop_oneof![
        arb_stat().prop_map(|stat| Goal::Maximize { stat }),
        (proptest::sample::select(targets.clone()), arb_spread(), arb_nature()).prop_map(
            |(name, evs, nature)| Goal::Outspeed {
                target: CombatantSpec::new(name, evs, nature),
            }
        ),
        (proptest::sample::select(targets), arb_nature()).prop_map(|(name, nature)| {
            Goal::Underspeed {
                target: CombatantSpec::new(name, StatTable::zero(), nature),
            }
        }),
    ]
}

proptest! {
    #[test]
    fn prop_stats_grow_with_evs(
        base in 1u16..=255,
        iv in 0u16..=31,
        ev in 0u16..=248,
        modifier in arb_modifier(),
        level in 1u8..=100
    ) {
        prop_assert!(compute_hp(base, iv, ev + 4, level) >= compute_hp(base, iv, ev, level));
        prop_assert!(
            compute_stat(base, iv, ev + 4, modifier, level)
                >= compute_stat(base, iv, ev, modifier, level)
        );
    }

    #[test]
    fn prop_evs_for_target_is_minimal(
        base in 1u16..=200,
        target in 1u16..=300,
        modifier in arb_modifier()
    ) {
        match evs_for_target(base, target, 31, modifier, 50, false) {
            Some(ev) => {
                prop_assert!(ev <= 252);
                prop_assert_eq!(ev % 4, 0);
                prop_assert!(compute_stat(base, 31, ev, modifier, 50) >= target);
                if ev > 0 {
                    prop_assert!(compute_stat(base, 31, ev - 4, modifier, 50) < target);
                }
            }
            None => prop_assert!(compute_stat(base, 31, 252, modifier, 50) < target),
        }
    }

    #[test]
    fn prop_codec_round_trip(spread in arb_spread()) {
        prop_assert_eq!(parse_evs(&to_compact(&spread)), spread);
        prop_assert_eq!(parse_evs(&to_labeled(&spread)), spread);
    }

    #[test]
    fn prop_parse_never_panics(text in ".{0,40}") {
        let _ = parse_evs(&text);
    }

    #[test]
    fn prop_spread_stays_legal(
        species in proptest::sample::select(vec!["Incineroar", "Flutter Mane", "Amoonguss", "Kingambit"]),
        nature in arb_nature(),
        goals in proptest::collection::vec(arb_goal(), 0..5)
    ) {
        let req = OptimizeRequest::builder()
            .species(species)
            .nature(nature)
            .goals(goals.clone())
            .build();
        let result = optimizer().optimize(&req);

        prop_assert_eq!(result.goal_results.len(), goals.len());
        prop_assert!(result.ev_total <= 510);
        prop_assert!(result.evs.validate_evs().is_ok());
        prop_assert!(result.evs.iter().all(|(_, v)| v % 4 == 0));
        prop_assert!(result.ivs.validate_ivs().is_ok());
        // Leftover budget is always spent down to the last step.
        prop_assert!(result.ev_total >= 508);
    }
}
