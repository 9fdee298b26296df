//! One simulated retirement lifetime

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::series::{InflationSeries, ReturnSeries};

/// Random inputs for one trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialDraw {
    /// First historical year of the window (index into the return series)
    pub start_year: usize,

    /// Retirement length in whole years
    pub duration: u32,
}

impl TrialDraw {
    pub fn new(start_year: usize, duration: u32) -> Self {
        Self { start_year, duration }
    }

    /// Year indices covered by this trial, before wrapping
    pub fn years(&self) -> std::ops::Range<usize> {
        self.start_year..self.start_year + self.duration as usize
    }
}

/// How a trial ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialOutcome {
    /// Balance reached zero or below before the retirement ended
    Ruined,
    /// Retirement ended with money left over
    Survived(u64),
}

impl TrialOutcome {
    /// Recorded outcome value; ruin is always 0
    pub fn value(self) -> u64 {
        match self {
            TrialOutcome::Ruined => 0,
            TrialOutcome::Survived(balance) => balance,
        }
    }

    pub fn is_ruined(self) -> bool {
        matches!(self, TrialOutcome::Ruined)
    }
}

/// Roll a portfolio through the years of one draw.
///
/// Each year the inflation-adjusted withdrawal comes out first, then the
/// remainder grows by that year's return. Both amounts are truncated toward
/// zero every year. The first year withdraws exactly `annual_withdrawal`;
/// later years scale the previous withdrawal by `1 + inflation`.
///
/// Money runs in `i128` so any `u64` start value or withdrawal stays in range.
/// A survivor above `u64::MAX` is reported as `u64::MAX`.
pub fn simulate_trial(
    config: &SimulationConfig,
    draw: TrialDraw,
    returns: &ReturnSeries,
    inflation: &InflationSeries,
) -> TrialOutcome {
    let mut balance = i128::from(config.start_value);
    let mut withdrawal = i128::from(config.annual_withdrawal);

    for (offset, year) in draw.years().enumerate() {
        let growth = returns.cyclic(year);
        if offset > 0 {
            withdrawal = (withdrawal as f64 * (1.0 + inflation.cyclic(year))) as i128;
        }

        balance -= withdrawal;
        balance = (balance as f64 * (1.0 + growth)) as i128;

        if balance <= 0 {
            return TrialOutcome::Ruined;
        }
    }

    TrialOutcome::Survived(u64::try_from(balance).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::RateSeries;

    fn flat(rate: f64, len: usize) -> RateSeries {
        RateSeries::new("flat", vec![rate; len])
    }

    fn config(start_value: u64, annual_withdrawal: u64) -> SimulationConfig {
        SimulationConfig {
            start_value,
            annual_withdrawal,
            min_years: 2,
            most_likely_years: 2,
            max_years: 2,
            trial_count: 1,
        }
    }

    #[test]
    fn test_withdraw_then_grow() {
        // 1000 - 100 = 900 -> 990; 990 - 100 = 890 -> 979
        let outcome = simulate_trial(
            &config(1000, 100),
            TrialDraw::new(0, 2),
            &flat(0.10, 3),
            &flat(0.0, 3),
        );
        assert_eq!(outcome, TrialOutcome::Survived(979));
    }

    #[test]
    fn test_overdrawn_first_year_is_ruin() {
        let outcome = simulate_trial(
            &config(100, 200),
            TrialDraw::new(0, 1),
            &flat(0.10, 3),
            &flat(0.0, 3),
        );
        assert_eq!(outcome, TrialOutcome::Ruined);
        assert_eq!(outcome.value(), 0);
    }

    #[test]
    fn test_exact_zero_balance_is_ruin() {
        let outcome = simulate_trial(
            &config(100, 100),
            TrialDraw::new(0, 1),
            &flat(0.05, 1),
            &flat(0.0, 1),
        );
        assert_eq!(outcome, TrialOutcome::Ruined);
    }

    #[test]
    fn test_zero_duration_keeps_start_value() {
        let outcome = simulate_trial(
            &config(12_345, 100_000),
            TrialDraw::new(1, 0),
            &flat(-0.5, 3),
            &flat(0.0, 3),
        );
        assert_eq!(outcome, TrialOutcome::Survived(12_345));
    }

    #[test]
    fn test_inflation_skips_first_year_and_truncates() {
        // year 0: w=100, 1000-100=900 -> 900
        // year 1: w=int(100*1.015)=101, 799
        // year 2: w=int(101*1.015)=102 (102.515), 697
        let inflation = RateSeries::new("inflation", vec![0.5, 0.015, 0.015]);
        let outcome = simulate_trial(
            &config(1000, 100),
            TrialDraw::new(0, 3),
            &flat(0.0, 3),
            &inflation,
        );
        assert_eq!(outcome, TrialOutcome::Survived(697));
    }

    #[test]
    fn test_growth_truncates_each_year() {
        // 1000-1=999 -> int(999*1.0015)=1000 (1000.4985)
        // 1000-1=999 -> 1000
        let outcome = simulate_trial(
            &config(1000, 1),
            TrialDraw::new(0, 2),
            &flat(0.0015, 1),
            &flat(0.0, 1),
        );
        assert_eq!(outcome, TrialOutcome::Survived(1000));
    }

    #[test]
    fn test_series_wrap_independently() {
        // returns have length 2, inflation length 3; start at 1 for 3 years
        // years 1,2,3 -> returns idx 1,0,1 ; inflation idx 1,2,0
        let returns = RateSeries::new("returns", vec![0.0, 0.5]);
        let inflation = RateSeries::new("inflation", vec![1.0, 9.0, 0.0]);
        // y1: 1000-10=990 -> 1485
        // y2: w=int(10*(1+0.0))=10 (inflation idx 2), 1475 -> 1475
        // y3: w=int(10*(1+1.0))=20 (inflation idx 0), 1455 -> 2182 (2182.5)
        let outcome = simulate_trial(
            &config(1000, 10),
            TrialDraw::new(1, 3),
            &returns,
            &inflation,
        );
        assert_eq!(outcome, TrialOutcome::Survived(2182));
    }

    #[test]
    fn test_stops_at_first_ruined_year() {
        // A huge later return must not revive a ruined trial
        let returns = RateSeries::new("returns", vec![-1.0, 100.0]);
        let outcome = simulate_trial(
            &config(1000, 1),
            TrialDraw::new(0, 2),
            &returns,
            &flat(0.0, 1),
        );
        assert_eq!(outcome, TrialOutcome::Ruined);
    }
    #[test]
    fn test_withdrawal_beyond_i64_ruins() {
        let config = config(1, u64::MAX);
        assert!(config.validate().is_ok());
        let outcome = simulate_trial(&config, TrialDraw::new(0, 1), &flat(0.0, 1), &flat(0.0, 1));
        assert_eq!(outcome, TrialOutcome::Ruined);
    }

    #[test]
    fn test_start_value_beyond_i64_survives() {
        // 1e19 - 1 rounds to 1e19 through the f64 growth step
        let config = config(10_000_000_000_000_000_000, 1);
        assert!(config.validate().is_ok());
        let outcome = simulate_trial(&config, TrialDraw::new(0, 1), &flat(0.0, 1), &flat(0.0, 1));
        assert_eq!(outcome, TrialOutcome::Survived(10_000_000_000_000_000_000));
    }

    #[test]
    fn test_balance_above_u64_saturates() {
        let outcome = simulate_trial(
            &config(u64::MAX, 1),
            TrialDraw::new(0, 2),
            &flat(1.0, 1),
            &flat(0.0, 1),
        );
        assert_eq!(outcome, TrialOutcome::Survived(u64::MAX));
    }
}
