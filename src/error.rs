//! Error types for loading data, validating input and running simulations

use std::path::PathBuf;
use thiserror::Error;

/// Named validation failures for a simulation configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Problem with input years. Requires Min <= ML <= Max (got Min {min}, ML {most_likely}, Max {max})")]
    YearOrdering { min: u32, most_likely: u32, max: u32 },

    #[error("Problem with input years. Requires Max < 100 (got {max})")]
    MaxYearsExceeded { max: u32 },

    #[error("Starting value must be greater than zero")]
    ZeroStartValue,

    #[error("Annual withdrawal must be greater than zero")]
    ZeroWithdrawal,

    #[error("Number of cases must be greater than zero")]
    ZeroTrialCount,

    #[error("{name} series is empty")]
    EmptySeries { name: String },

    #[error("Invalid value for {field}: {value:?} is not a non-negative whole number")]
    InvalidNumber { field: String, value: String },

    #[error("Unknown investment type {0:?}; expected stocks, bonds, sb_blend or sbc_blend")]
    UnknownInvestmentType(String),

    #[error("Cannot draw durations between {min} and {max} years peaking at {most_likely}")]
    InvalidDuration { min: u32, most_likely: u32, max: u32 },
}

#[derive(Error, Debug)]
pub enum NestEggError {
    #[error("Error reading file {}: {source}", path.display())]
    DataLoad {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid percent value {value:?} on line {line} of {}", path.display())]
    DataParse {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("Invalid simulation request: {0}")]
    Request(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error writing chart data: {0}")]
    Chart(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, NestEggError>;
