//! Percent-form series loader
//!
//! Loads historical series from text files in data/, one percent value per line.
//! Blank lines between values are rejected; trailing blank lines are ignored.

use std::path::Path;

use log::{debug, info};

use super::RateSeries;
use crate::error::{NestEggError, Result};

/// Default path to the series directory
pub const DEFAULT_DATA_PATH: &str = "data";

pub const STOCKS_FILE: &str = "SP500_returns_1926-2013_pct.txt";
pub const BONDS_FILE: &str = "10yr_TBond_returns_1926-2013_pct.txt";
pub const BLEND_40_50_10_FILE: &str = "S-B-C_blend_1926-2013_pct.txt";
pub const BLEND_50_50_FILE: &str = "S-B_blend_1926-2013_pct.txt";
pub const INFLATION_FILE: &str = "annual_infl_rate_1926-2013_pct.txt";

/// Load a single percent series file and convert it to decimals
pub fn load_percent_series(path: &Path, name: &str) -> Result<RateSeries> {
    let data_load = |source: csv::Error| NestEggError::DataLoad {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(data_load)?;

    let data_parse = |line: u64, value: &str| NestEggError::DataParse {
        path: path.to_path_buf(),
        line,
        value: value.to_string(),
    };

    let mut percentages = Vec::new();
    let mut next_line = 1;

    for result in reader.records() {
        let record = result.map_err(data_load)?;
        let line = record.position().map(|p| p.line()).unwrap_or(next_line);
        // The reader skips empty lines; a gap in line numbers means one was skipped
        if line > next_line {
            return Err(data_parse(next_line, ""));
        }
        next_line = line + 1;

        if record.len() != 1 {
            return Err(data_parse(line, &record.iter().collect::<Vec<_>>().join(",")));
        }
        let raw = &record[0];
        let value: f64 = raw.parse().map_err(|_| data_parse(line, raw))?;
        percentages.push(value);
    }

    debug!("Loaded {} values from {}", percentages.len(), path.display());
    Ok(RateSeries::from_percentages(name, &percentages))
}

/// All series loaded from one directory
pub struct LoadedSeries {
    pub stocks: RateSeries,
    pub bonds: RateSeries,
    pub blend_40_50_10: RateSeries,
    pub blend_50_50: RateSeries,
    pub inflation: RateSeries,
}

impl LoadedSeries {
    /// Load all series from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        info!("Loading historical series from {}", path.display());
        Ok(Self {
            bonds: load_percent_series(&path.join(BONDS_FILE), "bonds")?,
            stocks: load_percent_series(&path.join(STOCKS_FILE), "stocks")?,
            blend_40_50_10: load_percent_series(&path.join(BLEND_40_50_10_FILE), "sbc_blend")?,
            blend_50_50: load_percent_series(&path.join(BLEND_50_50_FILE), "sb_blend")?,
            inflation: load_percent_series(&path.join(INFLATION_FILE), "inflation")?,
        })
    }
}
