use crate::reports;
use clap::{ArgMatches, Args};
use spreadforge::codec;
use spreadforge::config::Config;
use spreadforge::error::{SfResult, SpreadForgeError};
use spreadforge::optimizer::goals::load_goals_from_file;
use spreadforge::optimizer::{OptimizeRequest, OptimizerOptions, SpreadOptimizer};
use spreadforge::oracle::{DamageOracle, ProcessOracle, Unconfigured};
use spreadforge::stats::{Nature, Pokedex};
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub config: Config,

    pub species: String,

    /// JSON array of goals.
    #[arg(short, long)]
    pub goals: String,

    #[arg(short, long)]
    pub nature: Option<Nature>,

    #[arg(long)]
    pub item: Option<String>,

    #[arg(long)]
    pub ability: Option<String>,

    #[arg(long)]
    pub tera: Option<String>,

    #[arg(long)]
    pub ivs: Option<String>,

    /// Damage calculator command, e.g. "node calc.js".
    #[arg(long)]
    pub oracle_cmd: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(
    args: OptimizeArgs,
    dex: Pokedex,
    config_path: Option<&str>,
    matches: Option<&ArgMatches>,
) -> SfResult<()> {
    let config = match config_path {
        Some(path) => {
            info!("⚙️  Loading config from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            if let Some(m) = matches {
                file_config.merge_from_cli(&args.config, m);
            }
            file_config
        }
        None => args.config.clone(),
    };
    config.validate()?;

    let goals = load_goals_from_file(&args.goals, &config.defaults)?;
    info!("📋 Loaded {} goals from {}", goals.len(), args.goals);

    let oracle: Box<dyn DamageOracle> = match &args.oracle_cmd {
        Some(cmd) => {
            let oracle = ProcessOracle::from_command_line(cmd)
                .ok_or_else(|| SpreadForgeError::Config("empty --oracle-cmd".to_string()))?;
            info!("🧮 Damage oracle: {}", oracle.program());
            Box::new(oracle)
        }
        None => {
            warn!("⚠️  No --oracle-cmd given. Survive and OHKO goals will fail.");
            Box::new(Unconfigured)
        }
    };

    let optimizer = SpreadOptimizer::new(dex, oracle, OptimizerOptions::from(&config))?;

    let request = OptimizeRequest {
        species: args.species.clone(),
        goals,
        nature: args.nature,
        item: args.item.clone(),
        ability: args.ability.clone(),
        tera_type: args.tera.clone(),
        ivs: args.ivs.as_deref().map(|t| codec::parse_ivs(Some(t))),
    };

    let spread = optimizer.optimize(&request);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&spread)?);
        return Ok(());
    }

    reports::print_goal_report(&spread);
    if spread.ev_total > 0 {
        let base = optimizer.dex().get(&spread.species)?.base;
        reports::print_stat_table(
            &spread.species,
            spread.nature,
            &base,
            &spread.evs,
            &spread.ivs,
            &spread.stats,
        );
        reports::print_export(&spread);
    }
    Ok(())
}
