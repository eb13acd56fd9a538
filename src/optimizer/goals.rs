use crate::codec;
use crate::config::GoalDefaults;
use crate::error::SfResult;
use crate::oracle::{FieldSpec, PokemonSpec};
use crate::stats::{Nature, PartialSpread, Stat, StatTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// The opposing Pokemon a goal is measured against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantSpec {
    pub species: String,
    pub evs: StatTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ivs: Option<StatTable>,
    pub nature: Nature,
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

impl CombatantSpec {
    pub fn new(species: impl Into<String>, evs: StatTable, nature: Nature) -> Self {
        Self {
            species: species.into(),
            evs,
            ivs: None,
            nature,
            item: None,
            ability: None,
            tera_type: None,
            boosts: None,
            status: None,
        }
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    pub fn ivs_or_perfect(&self) -> StatTable {
        self.ivs.unwrap_or_else(StatTable::perfect_ivs)
    }

    pub fn pokemon_spec(&self, level: u8) -> PokemonSpec {
        PokemonSpec {
            name: self.species.clone(),
            level,
            evs: Some(self.evs),
            ivs: self.ivs,
            nature: Some(self.nature),
            item: self.item.clone(),
            ability: self.ability.clone(),
            tera_type: self.tera_type.clone(),
            boosts: self.boosts.clone(),
            status: self.status.clone(),
        }
    }
}

/// One requirement on the spread. Goals are satisfied in the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Goal {
    Survive {
        attacker: CombatantSpec,
        move_name: String,
        field: FieldSpec,
    },
    GuaranteeKo {
        defender: CombatantSpec,
        move_name: String,
    },
    Outspeed {
        target: CombatantSpec,
    },
    Underspeed {
        target: CombatantSpec,
    },
    Maximize {
        stat: Stat,
    },
}

impl Goal {
    pub fn survive(attacker: CombatantSpec, move_name: impl Into<String>) -> Self {
        Goal::Survive {
            attacker,
            move_name: move_name.into(),
            field: FieldSpec::default(),
        }
    }

    pub fn guarantee_ko(defender: CombatantSpec, move_name: impl Into<String>) -> Self {
        Goal::GuaranteeKo {
            defender,
            move_name: move_name.into(),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Goal::Survive {
                attacker,
                move_name,
                ..
            } => format!("Survive {}'s {}", attacker.species, move_name),
            Goal::GuaranteeKo {
                defender,
                move_name,
            } => format!("OHKO {} with {}", defender.species, move_name),
            Goal::Outspeed { target } => format!("Outspeed {}", target.species),
            Goal::Underspeed { target } => format!("Underspeed {}", target.species),
            Goal::Maximize { stat } => format!("Maximize {}", stat.label()),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalResult {
    pub description: String,
    pub achieved: bool,
    pub evs_used: PartialSpread,
    pub detail: String,
}

// ----------------------------------------------------------------------------
// Goal files
// ----------------------------------------------------------------------------

/// An opponent as written in a goal file. Omitted spreads and natures are
/// filled in from `GoalDefaults`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentSpec {
    #[serde(alias = "name")]
    pub species: String,
    #[serde(default)]
    pub evs: Option<String>,
    #[serde(default)]
    pub ivs: Option<String>,
    #[serde(default)]
    pub nature: Option<Nature>,
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default, alias = "tera")]
    pub tera_type: Option<String>,
    #[serde(default)]
    pub boosts: Option<BTreeMap<Stat, i8>>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `"Garchomp"` or a full object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpponentRef {
    Name(String),
    Full(OpponentSpec),
}

impl OpponentRef {
    pub fn resolve(&self, default_evs: StatTable, default_nature: Nature) -> CombatantSpec {
        match self {
            OpponentRef::Name(name) => CombatantSpec::new(name.clone(), default_evs, default_nature),
            OpponentRef::Full(spec) => CombatantSpec {
                species: spec.species.clone(),
                evs: spec
                    .evs
                    .as_deref()
                    .map(codec::parse_evs)
                    .unwrap_or(default_evs),
                ivs: spec.ivs.as_deref().map(|t| codec::parse_ivs(Some(t))),
                nature: spec.nature.unwrap_or(default_nature),
                item: spec.item.clone(),
                ability: spec.ability.clone(),
                tera_type: spec.tera_type.clone(),
                boosts: spec.boosts.clone(),
                status: spec.status.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoalSpec {
    Survive {
        attacker: OpponentRef,
        #[serde(rename = "move")]
        move_name: String,
        #[serde(default)]
        field: FieldSpec,
    },
    #[serde(alias = "guarantee_ko", alias = "ko")]
    Ohko {
        defender: OpponentRef,
        #[serde(rename = "move")]
        move_name: String,
    },
    Outspeed {
        target: OpponentRef,
    },
    Underspeed {
        target: OpponentRef,
    },
    Maximize {
        stat: Stat,
    },
}

impl GoalSpec {
    pub fn resolve(&self, defaults: &GoalDefaults) -> Goal {
        match self {
            GoalSpec::Survive {
                attacker,
                move_name,
                field,
            } => Goal::Survive {
                attacker: attacker.resolve(defaults.attacker_spread(), defaults.attacker_nature),
                move_name: move_name.clone(),
                field: field.clone(),
            },
            GoalSpec::Ohko {
                defender,
                move_name,
            } => Goal::GuaranteeKo {
                defender: defender.resolve(defaults.defender_spread(), defaults.defender_nature),
                move_name: move_name.clone(),
            },
            GoalSpec::Outspeed { target } => Goal::Outspeed {
                target: target.resolve(defaults.outspeed_spread(), defaults.outspeed_nature),
            },
            GoalSpec::Underspeed { target } => Goal::Underspeed {
                target: target.resolve(defaults.underspeed_spread(), defaults.underspeed_nature),
            },
            GoalSpec::Maximize { stat } => Goal::Maximize { stat: *stat },
        }
    }
}

pub fn parse_goals(json: &str, defaults: &GoalDefaults) -> SfResult<Vec<Goal>> {
    let specs: Vec<GoalSpec> = serde_json::from_str(json)?;
    Ok(specs.iter().map(|s| s.resolve(defaults)).collect())
}

pub fn load_goals_from_file<P: AsRef<Path>>(
    path: P,
    defaults: &GoalDefaults,
) -> SfResult<Vec<Goal>> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_goals(&content, defaults)
}
