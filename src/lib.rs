//! Nest Egg - bootstrap Monte Carlo estimate of retirement portfolio ruin
//!
//! This library provides:
//! - Loading of historical annual return and inflation series (percent text files)
//! - Validation of simulation inputs
//! - The simulation engine: random historical windows, triangular retirement lengths,
//!   year-by-year withdraw-then-grow depletion
//! - Summary statistics, text reports and chart data
//! - Interactive prompts and JSON requests for collecting inputs

pub mod config;
pub mod error;
pub mod prompt;
pub mod report;
pub mod request;
pub mod scenario;
pub mod series;
pub mod simulation;

// Re-export commonly used types
pub use config::{DurationRange, SimulationConfig};
pub use error::{ConfigError, NestEggError, Result};
pub use report::{ChartData, Report, RunSummary};
pub use scenario::ScenarioRunner;
pub use series::{HistoricalData, InflationSeries, InvestmentType, RateSeries, ReturnSeries};
pub use simulation::{AggregateResult, EngineOptions, SimulationEngine, TrialOutcome};
