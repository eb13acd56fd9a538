use crate::codec;
use crate::consts::DEFAULT_LEVEL;
use crate::error::{SfResult, SpreadForgeError};
use crate::stats::{Nature, StatTable};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub search: SearchParams,
    #[command(flatten)]
    #[serde(default)]
    pub defaults: GoalDefaults,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, default_value_t = DEFAULT_LEVEL)]
    pub level: u8,

    // 1 = serial scans
    #[arg(long, default_value_t = 1)]
    pub oracle_threads: usize,

    // 0 disables the damage cache
    #[arg(long, default_value_t = 4096)]
    pub cache_capacity: usize,

    // 0 = no limit
    #[arg(long, default_value_t = 0)]
    pub max_time_ms: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            oracle_threads: 1,
            cache_capacity: 4096,
            max_time_ms: 0,
        }
    }
}

/// Opponent spreads assumed when a goal file leaves them out.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalDefaults {
    // === SURVIVE (attacker) ===
    #[arg(long, default_value = "252/0/0/252/0/0")]
    pub attacker_evs: String,
    #[arg(long, default_value_t = Nature::Modest)]
    pub attacker_nature: Nature,

    // === OHKO (defender) ===
    #[arg(long, default_value = "252/0/0/0/0/0")]
    pub defender_evs: String,
    #[arg(long, default_value_t = Nature::Bold)]
    pub defender_nature: Nature,

    // === SPEED ===
    #[arg(long, default_value = "0/0/0/0/0/252")]
    pub outspeed_evs: String,
    #[arg(long, default_value_t = Nature::Timid)]
    pub outspeed_nature: Nature,
    #[arg(long, default_value = "0/0/0/0/0/0")]
    pub underspeed_evs: String,
    #[arg(long, default_value_t = Nature::Brave)]
    pub underspeed_nature: Nature,
}

impl Default for GoalDefaults {
    fn default() -> Self {
        Self {
            attacker_evs: "252/0/0/252/0/0".to_string(),
            attacker_nature: Nature::Modest,
            defender_evs: "252/0/0/0/0/0".to_string(),
            defender_nature: Nature::Bold,
            outspeed_evs: "0/0/0/0/0/252".to_string(),
            outspeed_nature: Nature::Timid,
            underspeed_evs: "0/0/0/0/0/0".to_string(),
            underspeed_nature: Nature::Brave,
        }
    }
}

impl GoalDefaults {
    pub fn attacker_spread(&self) -> StatTable {
        codec::parse_evs(&self.attacker_evs)
    }

    pub fn defender_spread(&self) -> StatTable {
        codec::parse_evs(&self.defender_evs)
    }

    pub fn outspeed_spread(&self) -> StatTable {
        codec::parse_evs(&self.outspeed_evs)
    }

    pub fn underspeed_spread(&self) -> StatTable {
        codec::parse_evs(&self.underspeed_evs)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SfResult<()> {
        if self.search.level == 0 || self.search.level > 100 {
            return Err(SpreadForgeError::Config(format!(
                "level must be between 1 and 100 ({})",
                self.search.level
            )));
        }
        if self.search.oracle_threads == 0 {
            return Err(SpreadForgeError::Config(
                "oracle_threads must be at least 1".to_string(),
            ));
        }
        for spread in [
            self.defaults.attacker_spread(),
            self.defaults.defender_spread(),
            self.defaults.outspeed_spread(),
            self.defaults.underspeed_spread(),
        ] {
            spread
                .validate_evs()
                .map_err(|e| SpreadForgeError::Config(e.to_string()))?;
        }
        Ok(())
    }

    /// Overlays only the arguments the user actually typed.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident, $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(search, level, "level");
        update_if_present!(search, oracle_threads, "oracle_threads");
        update_if_present!(search, cache_capacity, "cache_capacity");
        update_if_present!(search, max_time_ms, "max_time_ms");

        update_if_present!(defaults, attacker_evs, "attacker_evs");
        update_if_present!(defaults, attacker_nature, "attacker_nature");
        update_if_present!(defaults, defender_evs, "defender_evs");
        update_if_present!(defaults, defender_nature, "defender_nature");
        update_if_present!(defaults, outspeed_evs, "outspeed_evs");
        update_if_present!(defaults, outspeed_nature, "outspeed_nature");
        update_if_present!(defaults, underspeed_evs, "underspeed_evs");
        update_if_present!(defaults, underspeed_nature, "underspeed_nature");
    }
}
