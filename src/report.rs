//! Summary statistics, text report and chart data for a simulation run

use std::fmt;
use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::series::InvestmentType;
use crate::simulation::AggregateResult;

/// Most outcomes ever charted
pub const CHART_LIMIT: usize = 3000;

/// Statistics derived from an `AggregateResult`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub trial_count: usize,
    pub ruined_count: usize,

    /// Percent of trials ruined, rounded to one decimal place
    pub bankruptcy_pct: f64,

    /// Truncated mean of all outcome values
    pub average: u64,

    /// Outcome at sorted index `n / 2` (upper middle for even counts)
    pub median: u64,

    pub best: u64,
    pub worst: u64,
}

impl Report {
    /// `None` when the result holds no outcomes
    pub fn from_result(result: &AggregateResult) -> Option<Self> {
        let mut sorted: Vec<u64> = result.values().collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_unstable();

        let total = sorted.len();
        let sum: u128 = sorted.iter().map(|&v| v as u128).sum();
        let bankruptcy_pct = round_to_tenth(100.0 * result.ruined_count() as f64 / total as f64);

        Some(Self {
            trial_count: total,
            ruined_count: result.ruined_count(),
            bankruptcy_pct,
            average: (sum / total as u128) as u64,
            median: sorted[total / 2],
            best: sorted[total - 1],
            worst: sorted[0],
        })
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a whole number with comma thousands separators
pub fn with_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Full text report for one run
pub struct RunSummary<'a> {
    pub investment_type: InvestmentType,
    pub config: &'a SimulationConfig,
    pub report: &'a Report,
}

impl fmt::Display for RunSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(f, "Investment type: {}", self.investment_type)?;
        writeln!(f, "Starting value: ${}", with_thousands(self.config.start_value))?;
        writeln!(f, "Annual Withdrawal: ${}", with_thousands(self.config.annual_withdrawal))?;
        writeln!(
            f,
            "Years in Retirement: Min {}, ML {}, Max {}",
            self.config.min_years, self.config.most_likely_years, self.config.max_years
        )?;
        writeln!(f, "Number of runs: {}", with_thousands(report.trial_count as u64))?;
        writeln!(f)?;
        writeln!(f, "Odds of going bankrupt: {:.1}%", report.bankruptcy_pct)?;
        writeln!(f)?;
        writeln!(f, "Average outcome: ${}", with_thousands(report.average))?;
        writeln!(f, "Median outcome: ${}", with_thousands(report.median))?;
        writeln!(f, "Best case: ${}", with_thousands(report.best))?;
        write!(f, "Worst case: ${}", with_thousands(report.worst))
    }
}

/// Requested chart size the run cannot fill, if any
fn shortfall(available: usize, requested: Option<usize>) -> Option<usize> {
    requested
        .map(|wanted| wanted.min(CHART_LIMIT))
        .filter(|&wanted| available < wanted)
}

/// Bar chart input: remaining balance for the leading trials
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub values: Vec<u64>,
}

impl ChartData {
    /// Chart the leading outcomes, at most `CHART_LIMIT`.
    ///
    /// `requested` is an explicit caller limit; only that one warns when the
    /// run has fewer outcomes than asked for.
    pub fn new(result: &AggregateResult, report: &Report, requested: Option<usize>) -> Self {
        let limit = requested.unwrap_or(CHART_LIMIT).min(CHART_LIMIT);
        if let Some(wanted) = shortfall(result.trial_count(), requested) {
            warn!(
                "Charting {} runs, fewer than the {} requested",
                result.trial_count(),
                wanted
            );
        }
        Self {
            title: format!(
                "Probability of running out of money = {:.1}%",
                report.bankruptcy_pct
            ),
            values: result.leading_values(limit),
        }
    }

    pub fn figure_name(&self) -> String {
        format!("Outcome by Case (showing first {} runs)", self.values.len())
    }

    /// Write `Case,Remaining` rows, cases numbered from 1
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["Case", "Remaining"])?;
        for (index, value) in self.values.iter().enumerate() {
            writer.write_record([(index + 1).to_string(), value.to_string()])?;
        }
        writer.flush()?;
        info!("{}: chart data written to {}", self.figure_name(), path.display());
        Ok(())
    }
}
