//! Scenario runner for batch simulations
//!
//! Loads the historical series once, then runs many simulations with
//! different investment types and configurations without re-reading files.

use std::path::Path;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::series::{HistoricalData, InvestmentType};
use crate::simulation::{AggregateResult, EngineOptions, SimulationEngine};

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_data_path(Path::new("data"), EngineOptions::default())?;
///
/// for withdrawal in [30_000, 40_000, 50_000] {
///     let config = base.with_withdrawal(withdrawal);
///     let result = runner.run(InvestmentType::Stocks, &config)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    data: HistoricalData,
    engine: SimulationEngine,
}

impl ScenarioRunner {
    /// Create runner with already-loaded series
    pub fn new(data: HistoricalData, options: EngineOptions) -> Self {
        Self {
            data,
            engine: SimulationEngine::new(options),
        }
    }

    /// Create runner by loading the series from a data directory
    pub fn from_data_path(path: &Path, options: EngineOptions) -> Result<Self> {
        Ok(Self::new(HistoricalData::load_from(path)?, options))
    }

    /// Validate `config` and run one simulation against the chosen return series
    pub fn run(&self, investment_type: InvestmentType, config: &SimulationConfig) -> Result<AggregateResult> {
        config.validate()?;
        self.engine.run(
            config,
            self.data.returns_for(investment_type),
            &self.data.inflation,
        )
    }

    /// Run several configurations for one investment type, in order
    pub fn run_scenarios(
        &self,
        investment_type: InvestmentType,
        configs: &[SimulationConfig],
    ) -> Result<Vec<AggregateResult>> {
        configs
            .iter()
            .map(|config| self.run(investment_type, config))
            .collect()
    }

    pub fn data(&self) -> &HistoricalData {
        &self.data
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }
}
