//! Simulation inputs and their validation

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Longest retirement the duration bounds may describe
pub const MAX_RETIREMENT_YEARS: u32 = 99;

/// Immutable inputs for one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Portfolio value at the start of retirement
    pub start_value: u64,

    /// First-year withdrawal in today's dollars
    pub annual_withdrawal: u64,

    pub min_years: u32,
    pub most_likely_years: u32,
    pub max_years: u32,

    /// Number of simulated lifetimes
    pub trial_count: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_value: 10_000,
            annual_withdrawal: 10_000,
            min_years: 10,
            most_likely_years: 25,
            max_years: 40,
            trial_count: 50_000,
        }
    }
}

impl SimulationConfig {
    /// Check every field once, before any simulation work.
    ///
    /// Year bounds are checked first so a bad duration triple is reported
    /// the same way regardless of the other fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let years = self.duration_range();
        if !(years.min <= years.most_likely && years.most_likely <= years.max) {
            return Err(ConfigError::YearOrdering {
                min: years.min,
                most_likely: years.most_likely,
                max: years.max,
            });
        }
        if years.max > MAX_RETIREMENT_YEARS {
            return Err(ConfigError::MaxYearsExceeded { max: years.max });
        }
        if self.start_value == 0 {
            return Err(ConfigError::ZeroStartValue);
        }
        if self.annual_withdrawal == 0 {
            return Err(ConfigError::ZeroWithdrawal);
        }
        if self.trial_count == 0 {
            return Err(ConfigError::ZeroTrialCount);
        }
        Ok(())
    }

    /// Validate and hand the config back, for builder-style call sites
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    pub fn duration_range(&self) -> DurationRange {
        DurationRange {
            min: self.min_years,
            most_likely: self.most_likely_years,
            max: self.max_years,
        }
    }

    /// Same config with a different first-year withdrawal
    pub fn with_withdrawal(&self, annual_withdrawal: u64) -> Self {
        Self {
            annual_withdrawal,
            ..self.clone()
        }
    }
}

/// Triangular bounds for the retirement length, in whole years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationRange {
    pub min: u32,
    pub most_likely: u32,
    pub max: u32,
}

impl DurationRange {
    /// True when every draw must land on the same value
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_year_ordering_rejected() {
        let config = SimulationConfig {
            min_years: 30,
            most_likely_years: 25,
            max_years: 40,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::YearOrdering { min: 30, most_likely: 25, max: 40 })
        );

        let config = SimulationConfig {
            most_likely_years: 45,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::YearOrdering { .. })));
    }

    #[test]
    fn test_max_years_limit() {
        let at_limit = SimulationConfig {
            max_years: 99,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let over = SimulationConfig {
            max_years: 100,
            ..Default::default()
        };
        assert_eq!(over.validate(), Err(ConfigError::MaxYearsExceeded { max: 100 }));
    }

    #[test]
    fn test_zero_values_rejected() {
        let base = SimulationConfig::default();
        assert_eq!(
            SimulationConfig { start_value: 0, ..base.clone() }.validate(),
            Err(ConfigError::ZeroStartValue)
        );
        assert_eq!(
            SimulationConfig { annual_withdrawal: 0, ..base.clone() }.validate(),
            Err(ConfigError::ZeroWithdrawal)
        );
        assert_eq!(
            SimulationConfig { trial_count: 0, ..base }.validate(),
            Err(ConfigError::ZeroTrialCount)
        );
    }

    #[test]
    fn test_equal_bounds_are_fixed() {
        let config = SimulationConfig {
            min_years: 0,
            most_likely_years: 0,
            max_years: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.duration_range().is_fixed());
        assert!(!SimulationConfig::default().duration_range().is_fixed());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"start_value": 500000, "trial_count": 10}"#).unwrap();
        assert_eq!(config.start_value, 500_000);
        assert_eq!(config.trial_count, 10);
        assert_eq!(config.annual_withdrawal, 10_000);
        assert_eq!(config.most_likely_years, 25);
    }
}
