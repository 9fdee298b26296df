//! Historical annual return and inflation series

pub mod loader;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
pub use loader::{load_percent_series, DEFAULT_DATA_PATH};

/// Annual rates as decimals (0.07 for 7%), oldest year first.
///
/// Trials sample contiguous windows, so order matters. Indexing past the end
/// wraps around to the start.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSeries {
    name: String,
    rates: Vec<f64>,
}

/// Series of annual portfolio returns
pub type ReturnSeries = RateSeries;

/// Series of annual inflation rates
pub type InflationSeries = RateSeries;

impl RateSeries {
    pub fn new(name: impl Into<String>, rates: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            rates,
        }
    }

    /// Build from percent-form values (5.0 for 5%), rounded to 5 decimal places
    pub fn from_percentages(name: impl Into<String>, percentages: &[f64]) -> Self {
        let rates = percentages.iter().map(|&p| percent_to_decimal(p)).collect();
        Self::new(name, rates)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Rate for year `index`, wrapping modulo the series length.
    ///
    /// Panics on an empty series; callers go through `ensure_non_empty` first.
    pub fn cyclic(&self, index: usize) -> f64 {
        self.rates[index % self.rates.len()]
    }

    pub fn ensure_non_empty(&self) -> std::result::Result<(), ConfigError> {
        if self.is_empty() {
            return Err(ConfigError::EmptySeries {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// Convert a percent figure to a decimal rate rounded to 5 places
pub fn percent_to_decimal(percent: f64) -> f64 {
    (percent / 100.0 * 1e5).round() / 1e5
}

/// Portfolio mixes a user can simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    /// S&P 500
    #[value(name = "stocks")]
    Stocks,
    /// 10-year Treasury Bonds
    #[value(name = "bonds")]
    Bonds,
    /// 50% stocks, 50% bonds
    #[value(name = "sb_blend")]
    SbBlend,
    /// 40% stocks, 50% bonds, 10% cash
    #[default]
    #[value(name = "sbc_blend")]
    SbcBlend,
}

impl InvestmentType {
    pub const ALL: [InvestmentType; 4] = [
        InvestmentType::Stocks,
        InvestmentType::Bonds,
        InvestmentType::SbBlend,
        InvestmentType::SbcBlend,
    ];

    pub fn key(self) -> &'static str {
        match self {
            InvestmentType::Stocks => "stocks",
            InvestmentType::Bonds => "bonds",
            InvestmentType::SbBlend => "sb_blend",
            InvestmentType::SbcBlend => "sbc_blend",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            InvestmentType::Stocks => "S&P 500",
            InvestmentType::Bonds => "10-year Treasury Bonds",
            InvestmentType::SbBlend => "50% stocks, 50% bonds",
            InvestmentType::SbcBlend => "40% stocks, 50% bonds, 10% cash",
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for InvestmentType {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.key() == wanted)
            .ok_or_else(|| ConfigError::UnknownInvestmentType(s.to_string()))
    }
}

/// The five historical series the simulator draws from
#[derive(Debug, Clone)]
pub struct HistoricalData {
    pub stocks: ReturnSeries,
    pub bonds: ReturnSeries,
    pub blend_50_50: ReturnSeries,
    pub blend_40_50_10: ReturnSeries,
    pub inflation: InflationSeries,
}

impl HistoricalData {
    /// Load every series from the default data directory
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_DATA_PATH))
    }

    /// Load every series from `dir`; any missing or malformed file fails the whole load
    pub fn load_from(dir: &Path) -> Result<Self> {
        let loaded = loader::LoadedSeries::load_from(dir)?;
        Ok(Self {
            stocks: loaded.stocks,
            bonds: loaded.bonds,
            blend_50_50: loaded.blend_50_50,
            blend_40_50_10: loaded.blend_40_50_10,
            inflation: loaded.inflation,
        })
    }

    pub fn returns_for(&self, investment_type: InvestmentType) -> &ReturnSeries {
        match investment_type {
            InvestmentType::Stocks => &self.stocks,
            InvestmentType::Bonds => &self.bonds,
            InvestmentType::SbBlend => &self.blend_50_50,
            InvestmentType::SbcBlend => &self.blend_40_50_10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percent_conversion_rounds_to_five_places() {
        assert_relative_eq!(percent_to_decimal(5.0), 0.05);
        assert_relative_eq!(percent_to_decimal(-43.84), -0.4384);
        assert_relative_eq!(percent_to_decimal(12.345678), 0.12346);
        assert_relative_eq!(percent_to_decimal(0.0), 0.0);
    }

    #[test]
    fn test_cyclic_indexing_wraps() {
        let series = RateSeries::new("test", vec![0.1, 0.2, 0.3]);
        assert_relative_eq!(series.cyclic(0), 0.1);
        assert_relative_eq!(series.cyclic(2), 0.3);
        assert_relative_eq!(series.cyclic(3), 0.1);
        assert_relative_eq!(series.cyclic(100), 0.2);
    }

    #[test]
    fn test_empty_series_reported_by_name() {
        let series = RateSeries::new("inflation", Vec::new());
        assert_eq!(
            series.ensure_non_empty(),
            Err(ConfigError::EmptySeries { name: "inflation".to_string() })
        );
    }

    #[test]
    fn test_investment_type_parsing() {
        assert_eq!("stocks".parse::<InvestmentType>(), Ok(InvestmentType::Stocks));
        assert_eq!(" SB_Blend ".parse::<InvestmentType>(), Ok(InvestmentType::SbBlend));
        assert_eq!("sbc_blend".parse::<InvestmentType>(), Ok(InvestmentType::SbcBlend));
        assert!("gold".parse::<InvestmentType>().is_err());
        assert_eq!(InvestmentType::default(), InvestmentType::SbcBlend);
    }

    #[test]
    fn test_returns_for_maps_blends() {
        let data = HistoricalData {
            stocks: RateSeries::new("stocks", vec![0.1]),
            bonds: RateSeries::new("bonds", vec![0.02]),
            blend_50_50: RateSeries::new("sb", vec![0.06]),
            blend_40_50_10: RateSeries::new("sbc", vec![0.05]),
            inflation: RateSeries::new("inflation", vec![0.03]),
        };
        assert_eq!(data.returns_for(InvestmentType::SbBlend).name(), "sb");
        assert_eq!(data.returns_for(InvestmentType::SbcBlend).name(), "sbc");
        assert_eq!(data.returns_for(InvestmentType::Bonds).name(), "bonds");
    }
}
