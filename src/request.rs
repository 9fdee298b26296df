//! JSON request and response shapes
//!
//! Field names follow the investment web form, which posts camelCase keys and
//! sends numbers as strings.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::{ConfigError, Result};
use crate::report::{ChartData, Report};
use crate::series::InvestmentType;

/// A number field that may arrive as a JSON number or a digit string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberField {
    Number(u64),
    Text(String),
}

impl NumberField {
    fn parse(&self, field: &str) -> std::result::Result<u64, ConfigError> {
        let invalid = |value: String| ConfigError::InvalidNumber {
            field: field.to_string(),
            value,
        };
        match self {
            NumberField::Number(n) => Ok(*n),
            NumberField::Text(text) => {
                let text = text.trim();
                if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid(text.to_string()));
                }
                text.parse().map_err(|_| invalid(text.to_string()))
            }
        }
    }
}

/// Simulation request; missing fields take the prompt defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    #[serde(default)]
    pub investment_type: Option<String>,
    #[serde(default)]
    pub starting_value: Option<NumberField>,
    #[serde(default)]
    pub annual_withdrawal: Option<NumberField>,
    #[serde(default)]
    pub min_years: Option<NumberField>,
    #[serde(default)]
    pub most_likely_years: Option<NumberField>,
    #[serde(default)]
    pub max_years: Option<NumberField>,
    #[serde(default)]
    pub num_cases: Option<NumberField>,
}

impl SimulationRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve defaults and validate
    pub fn into_parts(self) -> Result<(InvestmentType, SimulationConfig)> {
        let investment_type = match self.investment_type.as_deref().map(str::trim) {
            None | Some("") => InvestmentType::default(),
            Some(name) => name.parse()?,
        };

        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            start_value: u64_or(&self.starting_value, "startingValue", defaults.start_value)?,
            annual_withdrawal: u64_or(
                &self.annual_withdrawal,
                "annualWithdrawal",
                defaults.annual_withdrawal,
            )?,
            min_years: u32_or(&self.min_years, "minYears", defaults.min_years)?,
            most_likely_years: u32_or(
                &self.most_likely_years,
                "mostLikelyYears",
                defaults.most_likely_years,
            )?,
            max_years: u32_or(&self.max_years, "maxYears", defaults.max_years)?,
            trial_count: u32_or(&self.num_cases, "numCases", defaults.trial_count)?,
        }
        .validated()?;

        Ok((investment_type, config))
    }
}

fn u64_or(field: &Option<NumberField>, name: &str, default: u64) -> std::result::Result<u64, ConfigError> {
    match field {
        Some(value) => value.parse(name),
        None => Ok(default),
    }
}

fn u32_or(field: &Option<NumberField>, name: &str, default: u32) -> std::result::Result<u32, ConfigError> {
    let value = u64_or(field, name, default as u64)?;
    u32::try_from(value).map_err(|_| ConfigError::InvalidNumber {
        field: name.to_string(),
        value: value.to_string(),
    })
}

/// Everything a caller needs to display one run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub investment_type: InvestmentType,
    pub config: SimulationConfig,
    pub report: Report,
    pub chart: ChartData,
}
