use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use spreadforge::error::SfResult;
use spreadforge::stats::Pokedex;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Extra species as `name,hp,atk,def,spa,spd,spe` CSV.
    #[arg(global = true, long)]
    dex: Option<String>,

    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Stats(cmd::stats::StatsArgs),
    Speed(cmd::speed::SpeedArgs),
    Optimize(cmd::optimize::OptimizeArgs),
}

fn load_dex(path: Option<&str>) -> SfResult<Pokedex> {
    match path {
        Some(p) => {
            info!("📂 Loading species: {}", p);
            Pokedex::load_from_file(p)
        }
        None => Ok(Pokedex::builtin()),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let dex = load_dex(cli.dex.as_deref()).unwrap_or_else(|e| {
        error!("❌ {}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Stats(args) => cmd::stats::run(args, &dex),
        Commands::Speed(args) => cmd::speed::run(args, &dex),
        Commands::Optimize(args) => cmd::optimize::run(
            args,
            dex,
            cli.config.as_deref(),
            matches.subcommand_matches("optimize"),
        ),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
