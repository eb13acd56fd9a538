//! The damage oracle seam.
//!
//! The optimizer never computes damage itself. It asks an oracle for the
//! worst-case and best-case damage of one move against one defender, as a
//! percentage of the defender's max HP, plus the move's category.

pub mod cache;
pub mod process;

pub use self::cache::CachedOracle;
pub use self::process::ProcessOracle;

use crate::consts::DEFAULT_LEVEL;
use crate::stats::{Nature, Stat, StatTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use strum_macros::{Display, EnumString};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    #[error("oracle rejected request: {0}")]
    Rejected(String),

    #[error("malformed oracle response: {0}")]
    Malformed(String),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum GameType {
    Singles,
    #[default]
    Doubles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    /// The defending stat this category hits. Status moves fall back to Def.
    pub fn defensive_stat(self) -> Stat {
        match self {
            MoveCategory::Special => Stat::Spd,
            MoveCategory::Physical | MoveCategory::Status => Stat::Def,
        }
    }

    /// The attacking stat this category scales with.
    pub fn offensive_stat(self) -> Stat {
        match self {
            MoveCategory::Special => Stat::Spa,
            MoveCategory::Physical | MoveCategory::Status => Stat::Atk,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideConditions {
    #[serde(default)]
    pub is_helping_hand: bool,
    #[serde(default)]
    pub is_reflect: bool,
    #[serde(default)]
    pub is_light_screen: bool,
    #[serde(default)]
    pub is_aurora_veil: bool,
    #[serde(default)]
    pub is_friend_guard: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    #[serde(default)]
    pub game_type: GameType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attacker_side: Option<SideConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defender_side: Option<SideConditions>,
}

/// One Pokemon as the oracle sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonSpec {
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evs: Option<StatTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ivs: Option<StatTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nature: Option<Nature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tera_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boosts: Option<BTreeMap<Stat, i8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

fn default_level() -> u8 {
    DEFAULT_LEVEL
}

impl PokemonSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: DEFAULT_LEVEL,
            evs: None,
            ivs: None,
            nature: None,
            item: None,
            ability: None,
            tera_type: None,
            boosts: None,
            status: None,
        }
    }

    pub fn with_evs(mut self, evs: StatTable) -> Self {
        self.evs = Some(evs);
        self
    }

    pub fn with_nature(mut self, nature: Nature) -> Self {
        self.nature = Some(nature);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageRequest {
    pub attacker: PokemonSpec,
    pub defender: PokemonSpec,
    #[serde(rename = "move")]
    pub move_name: String,
    #[serde(default)]
    pub field: FieldSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageRange {
    pub min_percent: f64,
    pub max_percent: f64,
    pub category: MoveCategory,
}

impl DamageRange {
    pub fn survives(&self) -> bool {
        self.max_percent < 100.0
    }

    pub fn guarantees_ko(&self) -> bool {
        self.min_percent >= 100.0
    }
}

impl fmt::Display for DamageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}-{:.1}%", self.min_percent, self.max_percent)
    }
}

/// Raw JSON reply: `{success, minPercent, maxPercent, category}` or
/// `{success: false, error}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleResponse {
    pub success: bool,
    #[serde(default)]
    pub min_percent: Option<f64>,
    #[serde(default)]
    pub max_percent: Option<f64>,
    #[serde(default)]
    pub category: Option<MoveCategory>,
    #[serde(default)]
    pub error: Option<String>,
}

impl OracleResponse {
    pub fn into_range(self) -> Result<DamageRange, OracleError> {
        if !self.success {
            return Err(OracleError::Rejected(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        match (self.min_percent, self.max_percent, self.category) {
            (Some(min_percent), Some(max_percent), Some(category)) => Ok(DamageRange {
                min_percent,
                max_percent,
                category,
            }),
            _ => Err(OracleError::Malformed(
                "successful response is missing minPercent, maxPercent or category".to_string(),
            )),
        }
    }
}

pub trait DamageOracle: Send + Sync {
    fn evaluate(&self, request: &DamageRequest) -> Result<DamageRange, OracleError>;
}

impl<O: DamageOracle + ?Sized> DamageOracle for Arc<O> {
    fn evaluate(&self, request: &DamageRequest) -> Result<DamageRange, OracleError> {
        (**self).evaluate(request)
    }
}

impl<O: DamageOracle + ?Sized> DamageOracle for Box<O> {
    fn evaluate(&self, request: &DamageRequest) -> Result<DamageRange, OracleError> {
        (**self).evaluate(request)
    }
}

/// Adapts a closure into an oracle.
pub struct FnOracle<F>(pub F);

impl<F> DamageOracle for FnOracle<F>
where
    F: Fn(&DamageRequest) -> Result<DamageRange, OracleError> + Send + Sync,
{
    fn evaluate(&self, request: &DamageRequest) -> Result<DamageRange, OracleError> {
        (self.0)(request)
    }
}

/// Used when no oracle command is configured. Speed and maximize goals still
/// work; damage goals fail with a clear message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl DamageOracle for Unconfigured {
    fn evaluate(&self, _request: &DamageRequest) -> Result<DamageRange, OracleError> {
        Err(OracleError::Unavailable(
            "no damage oracle configured".to_string(),
        ))
    }
}
