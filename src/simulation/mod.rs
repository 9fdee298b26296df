//! Monte Carlo simulation of retirement lifetimes

mod engine;
mod result;
mod sampler;
mod trial;

pub use engine::{draw_trials, run, EngineOptions, SimulationEngine};
pub use result::AggregateResult;
pub use sampler::{RandomSampler, TrialSampler};
pub use trial::{simulate_trial, TrialDraw, TrialOutcome};
