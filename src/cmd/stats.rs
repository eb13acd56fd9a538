use crate::reports;
use clap::Args;
use spreadforge::codec;
use spreadforge::consts::DEFAULT_LEVEL;
use spreadforge::error::SfResult;
use spreadforge::stats::{stat_block, Nature, Pokedex};

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    pub species: String,

    /// `252/0/4/252/0/0` or `252 HP / 4 Def / 252 SpA`
    #[arg(short, long, default_value = "")]
    pub evs: String,

    #[arg(short, long)]
    pub ivs: Option<String>,

    #[arg(short, long, default_value_t = Nature::Hardy)]
    pub nature: Nature,

    #[arg(short, long, default_value_t = DEFAULT_LEVEL)]
    pub level: u8,
}

pub fn run(args: StatsArgs, dex: &Pokedex) -> SfResult<()> {
    let species = dex.get(&args.species)?;
    let evs = codec::parse_evs(&args.evs);
    let ivs = codec::parse_ivs(args.ivs.as_deref());
    evs.validate_evs()?;
    ivs.validate_ivs()?;

    let stats = stat_block(&species.base, &evs, &ivs, args.nature, args.level);
    reports::print_stat_table(&species.name, args.nature, &species.base, &evs, &ivs, &stats);
    Ok(())
}
