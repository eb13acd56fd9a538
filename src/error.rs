use crate::oracle::OracleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpreadForgeError {
    #[error("Pokemon '{0}' not found in database")]
    SpeciesNotFound(String),

    #[error("Unknown nature: {0}")]
    UnknownNature(String),

    #[error("Unknown stat: {0}")]
    UnknownStat(String),

    #[error("Invalid spread: {0}")]
    InvalidSpread(String),

    #[error("Damage oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type SfResult<T> = Result<T, SpreadForgeError>;
