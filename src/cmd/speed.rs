use crate::reports;
use clap::Args;
use spreadforge::codec;
use spreadforge::consts::DEFAULT_LEVEL;
use spreadforge::error::SfResult;
use spreadforge::speed::{compare_speeds, find_benchmarks, speed_of, SpeedEntry};
use spreadforge::stats::{Nature, Pokedex};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SpeedArgs {
    pub species: String,

    #[arg(short, long, default_value = "")]
    pub evs: String,

    #[arg(short, long)]
    pub ivs: Option<String>,

    #[arg(short, long, default_value_t = Nature::Hardy)]
    pub nature: Nature,

    #[arg(short, long, default_value_t = DEFAULT_LEVEL)]
    pub level: u8,

    /// Compare against another Pokemon.
    #[arg(long)]
    pub vs: Option<String>,

    #[arg(long, default_value = "")]
    pub vs_evs: String,

    #[arg(long, default_value_t = Nature::Hardy)]
    pub vs_nature: Nature,
}

pub fn run(args: SpeedArgs, dex: &Pokedex) -> SfResult<()> {
    let evs = codec::parse_evs(&args.evs);
    let ivs = codec::parse_ivs(args.ivs.as_deref());
    evs.validate_evs()?;
    ivs.validate_ivs()?;

    let speed = speed_of(dex, &args.species, &evs, &ivs, args.nature, args.level)?;
    let name = &dex.get(&args.species)?.name;
    reports::print_speed_report(name, &find_benchmarks(speed, args.level));

    if let Some(other) = &args.vs {
        let mine = SpeedEntry {
            species: &args.species,
            evs,
            ivs,
            nature: args.nature,
        };
        let theirs = SpeedEntry {
            species: other,
            evs: codec::parse_evs(&args.vs_evs),
            ivs: codec::parse_ivs(None),
            nature: args.vs_nature,
        };
        let cmp = compare_speeds(dex, &mine, &theirs, args.level)?;
        match &cmp.faster {
            Some(winner) => info!(
                "{} ({}) vs {} ({}): {} moves first by {}",
                cmp.first.0, cmp.first.1, cmp.second.0, cmp.second.1, winner, cmp.difference
            ),
            None => info!(
                "{} and {} tie at {} Spe",
                cmp.first.0, cmp.second.0, cmp.first.1
            ),
        }
    }
    Ok(())
}
