use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use spreadforge::codec;
use spreadforge::optimizer::OptimizedSpread;
use spreadforge::speed::{BenchmarkHit, SpeedBenchmarks};
use spreadforge::stats::{Nature, NatureModifier, Stat, StatTable};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn nature_marker(nature: Nature, stat: Stat) -> &'static str {
    match nature.modifier(stat) {
        NatureModifier::Boosted => "+",
        NatureModifier::Lowered => "-",
        NatureModifier::Neutral => "",
    }
}

pub fn print_stat_table(
    species: &str,
    nature: Nature,
    base: &StatTable,
    evs: &StatTable,
    ivs: &StatTable,
    stats: &StatTable,
) {
    println!("\n{} ({})", species, nature);
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Stat").add_attribute(Attribute::Bold),
        Cell::new("Base"),
        Cell::new("EV"),
        Cell::new("IV"),
        Cell::new("Value").fg(Color::Cyan),
    ]);

    for stat in Stat::ALL {
        let marker = nature_marker(nature, stat);
        let color = match marker {
            "+" => Color::Green,
            "-" => Color::Red,
            _ => Color::Reset,
        };
        table.add_row(vec![
            Cell::new(format!("{}{}", stat.label(), marker)).fg(color),
            Cell::new(base[stat]).set_alignment(CellAlignment::Right),
            Cell::new(evs[stat]).set_alignment(CellAlignment::Right),
            Cell::new(ivs[stat]).set_alignment(CellAlignment::Right),
            Cell::new(stats[stat])
                .set_alignment(CellAlignment::Right)
                .fg(Color::Cyan),
        ]);
    }

    println!("{}", table);
    println!("EVs: {} ({} total)", codec::to_labeled(evs), evs.total());
    let iv_line = codec::to_labeled_ivs(ivs);
    if !iv_line.is_empty() {
        println!("IVs: {}", iv_line);
    }
}

fn benchmark_rows(table: &mut Table, label: &str, color: Color, hits: &[BenchmarkHit]) {
    for hit in hits {
        table.add_row(vec![
            Cell::new(label).fg(color),
            Cell::new(&hit.pokemon),
            Cell::new(hit.base_speed).set_alignment(CellAlignment::Right),
            Cell::new(format!("{}-{}", hit.min_speed, hit.max_speed))
                .set_alignment(CellAlignment::Right),
        ]);
    }
}

pub fn print_speed_report(species: &str, bench: &SpeedBenchmarks) {
    println!("\n⚡ {} runs at {} Spe", species, bench.speed);
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Result").add_attribute(Attribute::Bold),
        Cell::new("Pokemon"),
        Cell::new("Base"),
        Cell::new("Range"),
    ]);
    benchmark_rows(&mut table, "Outspeeds", Color::Green, &bench.outspeeds);
    benchmark_rows(&mut table, "Tie range", Color::Yellow, &bench.possible_ties);
    benchmark_rows(&mut table, "Slower", Color::Red, &bench.underspeeds);

    println!("{}", table);
}

pub fn print_goal_report(spread: &OptimizedSpread) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Goal").add_attribute(Attribute::Bold),
        Cell::new("Result"),
        Cell::new("EVs"),
        Cell::new("Detail"),
    ]);

    for r in &spread.goal_results {
        let (mark, color) = if r.achieved {
            ("✅", Color::Green)
        } else {
            ("❌", Color::Red)
        };
        let evs = r
            .evs_used
            .iter()
            .map(|(s, v)| format!("{} {}", v, s.label()))
            .collect::<Vec<_>>()
            .join(" / ");
        table.add_row(vec![
            Cell::new(&r.description),
            Cell::new(mark).fg(color),
            Cell::new(evs),
            Cell::new(&r.detail),
        ]);
    }

    println!("\n{}", table);
}

/// Showdown-style export block.
pub fn print_export(spread: &OptimizedSpread) {
    println!("\n{}", spread.species);
    println!("EVs: {}", codec::to_labeled(&spread.evs));
    println!("{} Nature", spread.nature);
    let iv_line = codec::to_labeled_ivs(&spread.ivs);
    if !iv_line.is_empty() {
        println!("IVs: {}", iv_line);
    }

    for s in &spread.suggestions {
        println!("💡 {}", s);
    }
}
