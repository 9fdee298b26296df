//! Bootstrap Monte Carlo engine
//!
//! Draws every trial's window up front from one sampler, then evaluates the
//! trials independently. Evaluation order never changes the output: results
//! are collected in trial order whether trials run sequentially or on the
//! rayon pool.

use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;

use super::result::AggregateResult;
use super::sampler::{RandomSampler, TrialSampler};
use super::trial::{simulate_trial, TrialDraw, TrialOutcome};
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::series::{InflationSeries, ReturnSeries};

/// Runtime options that do not change what a trial means
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Fixed RNG seed for reproducible runs; OS entropy when `None`
    pub seed: Option<u64>,

    /// Evaluate trials on the rayon thread pool
    pub parallel: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            seed: None,
            parallel: true,
        }
    }
}

/// Main simulation engine
#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    options: EngineOptions,
}

impl SimulationEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Run `config.trial_count` trials with fresh random draws
    pub fn run(
        &self,
        config: &SimulationConfig,
        returns: &ReturnSeries,
        inflation: &InflationSeries,
    ) -> Result<AggregateResult> {
        ensure_series(returns, inflation)?;
        let mut sampler = RandomSampler::from_seed(config.duration_range(), self.options.seed)?;
        self.run_with_sampler(config, returns, inflation, &mut sampler)
    }

    /// Run with draws taken from an injected sampler
    pub fn run_with_sampler<S: TrialSampler>(
        &self,
        config: &SimulationConfig,
        returns: &ReturnSeries,
        inflation: &InflationSeries,
        sampler: &mut S,
    ) -> Result<AggregateResult> {
        ensure_series(returns, inflation)?;
        let draws = draw_trials(sampler, config.trial_count as usize, returns.len());
        self.run_draws(config, &draws, returns, inflation)
    }

    /// Evaluate pre-drawn trials, one outcome per draw
    pub fn run_draws(
        &self,
        config: &SimulationConfig,
        draws: &[TrialDraw],
        returns: &ReturnSeries,
        inflation: &InflationSeries,
    ) -> Result<AggregateResult> {
        ensure_series(returns, inflation)?;

        debug!(
            "Running {} trials: start ${}, withdrawal ${}, years {}/{}/{}, returns {} ({} yrs), inflation {} yrs",
            draws.len(),
            config.start_value,
            config.annual_withdrawal,
            config.min_years,
            config.most_likely_years,
            config.max_years,
            returns.name(),
            returns.len(),
            inflation.len(),
        );
        let start = Instant::now();

        let outcomes: Vec<TrialOutcome> = if self.options.parallel {
            draws
                .par_iter()
                .map(|&draw| simulate_trial(config, draw, returns, inflation))
                .collect()
        } else {
            draws
                .iter()
                .map(|&draw| simulate_trial(config, draw, returns, inflation))
                .collect()
        };

        let result = AggregateResult::new(outcomes);
        info!(
            "Simulated {} trials in {:?}: {} ruined",
            result.trial_count(),
            start.elapsed(),
            result.ruined_count()
        );
        Ok(result)
    }
}

/// Run a simulation with default engine options
pub fn run(
    config: &SimulationConfig,
    returns: &ReturnSeries,
    inflation: &InflationSeries,
) -> Result<AggregateResult> {
    SimulationEngine::default().run(config, returns, inflation)
}

/// Take `count` draws from `sampler`, in trial order
pub fn draw_trials<S: TrialSampler>(sampler: &mut S, count: usize, series_len: usize) -> Vec<TrialDraw> {
    (0..count).map(|_| sampler.draw(series_len)).collect()
}

fn ensure_series(returns: &ReturnSeries, inflation: &InflationSeries) -> Result<()> {
    returns.ensure_non_empty()?;
    inflation.ensure_non_empty()?;
    Ok(())
}
