use rstest::rstest;
use spreadforge::speed::{
    compare_speeds, find_benchmarks, max_speed, min_speed, speed_of, SpeedEntry, SPEED_BENCHMARKS,
};
use spreadforge::stats::{Nature, Pokedex, StatTable};

#[rstest]
#[case(100, 94, 167)]
#[case(200, 184, 277)]
#[case(5, 9, 62)]
fn test_speed_bounds(#[case] base: u16, #[case] min: u16, #[case] max: u16) {
    assert_eq!(min_speed(base, 50), min);
    assert_eq!(max_speed(base, 50), max);
}

#[test]
fn test_benchmark_table_is_descending() {
    for pair in SPEED_BENCHMARKS.windows(2) {
        assert!(pair[0].0 > pair[1].0, "{} then {}", pair[0].0, pair[1].0);
    }
}

#[test]
fn test_benchmarks_for_150() {
    let b = find_benchmarks(150, 50);
    assert_eq!(b.speed, 150);

    let under: Vec<&str> = b.underspeeds.iter().map(|h| h.pokemon.as_str()).collect();
    assert_eq!(under, vec!["Regieleki"]);

    let out: Vec<&str> = b.outspeeds.iter().map(|h| h.pokemon.as_str()).collect();
    assert_eq!(out.len(), 10);
    assert_eq!(out[0], "Gholdengo");
    assert_eq!(out[9], "Pelipper");

    assert_eq!(b.possible_ties.len(), 10);
    assert_eq!(b.possible_ties[0].pokemon, "Calyrex-Shadow");
}

#[test]
fn test_benchmarks_trick_room_speed() {
    let b = find_benchmarks(31, 50);
    assert!(b.outspeeds.is_empty());
    assert_eq!(b.underspeeds.len(), 10);
    let ties: Vec<&str> = b.possible_ties.iter().map(|h| h.pokemon.as_str()).collect();
    assert_eq!(
        ties,
        vec!["Amoonguss", "Snorlax", "Hatterene", "Dusclops", "Torkoal", "Ferrothorn", "Shuckle"]
    );
}

#[test]
fn test_benchmark_categories_are_consistent() {
    for speed in [1, 60, 101, 150, 205, 300] {
        let b = find_benchmarks(speed, 50);
        assert!(b.outspeeds.iter().all(|h| speed > h.max_speed));
        assert!(b.underspeeds.iter().all(|h| speed < h.min_speed));
        assert!(b
            .possible_ties
            .iter()
            .all(|h| h.min_speed <= speed && speed <= h.max_speed));
        for list in [&b.outspeeds, &b.underspeeds, &b.possible_ties] {
            assert!(list.len() <= 10);
            assert!(list.windows(2).all(|w| w[0].base_speed >= w[1].base_speed));
        }
    }
}

#[test]
fn test_speed_of_and_compare() {
    let dex = Pokedex::builtin();
    let jolly_chomp = speed_of(
        &dex,
        "Garchomp",
        &StatTable::new(0, 0, 0, 0, 0, 124),
        &StatTable::perfect_ivs(),
        Nature::Jolly,
        50,
    )
    .unwrap();
    assert_eq!(jolly_chomp, 151);

    let chomp = SpeedEntry {
        species: "Garchomp",
        evs: StatTable::new(0, 0, 0, 0, 0, 124),
        ivs: StatTable::perfect_ivs(),
        nature: Nature::Jolly,
    };
    let rilla = SpeedEntry {
        species: "Rillaboom",
        evs: StatTable::new(0, 0, 0, 0, 0, 252),
        ivs: StatTable::perfect_ivs(),
        nature: Nature::Jolly,
    };

    let cmp = compare_speeds(&dex, &chomp, &rilla, 50).unwrap();
    assert_eq!(cmp.first.1, 151);
    assert_eq!(cmp.second.1, 150);
    assert_eq!(cmp.difference, 1);
    assert_eq!(cmp.faster.as_deref(), Some("Garchomp"));

    let tie = compare_speeds(&dex, &rilla, &rilla, 50).unwrap();
    assert_eq!(tie.faster, None);
    assert_eq!(tie.difference, 0);
}

#[test]
fn test_compare_unknown_species() {
    let dex = Pokedex::builtin();
    let ghost = SpeedEntry {
        species: "Missingno",
        evs: StatTable::zero(),
        ivs: StatTable::perfect_ivs(),
        nature: Nature::Hardy,
    };
    assert!(compare_speeds(&dex, &ghost, &ghost, 50).is_err());
}
