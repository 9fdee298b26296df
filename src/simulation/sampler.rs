//! Random draws for trial start years and retirement lengths
//!
//! Trait-based so tests can replay fixed draws through the engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Triangular};

use super::trial::TrialDraw;
use crate::config::DurationRange;
use crate::error::ConfigError;

/// Source of per-trial random inputs
pub trait TrialSampler {
    /// Draw the window for one trial over a return series of `series_len` years
    fn draw(&mut self, series_len: usize) -> TrialDraw;
}

/// Uniform start year, triangular duration truncated to whole years.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: StdRng,
    range: DurationRange,
    /// `None` when min == max and every draw is that value
    duration: Option<Triangular<f64>>,
}

impl RandomSampler {
    /// Unseeded sampler backed by OS entropy
    pub fn new(range: DurationRange) -> Result<Self, ConfigError> {
        Self::with_rng(range, StdRng::from_os_rng())
    }

    /// Reproducible sampler
    pub fn seeded(range: DurationRange, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(range, StdRng::seed_from_u64(seed))
    }

    pub fn from_seed(range: DurationRange, seed: Option<u64>) -> Result<Self, ConfigError> {
        match seed {
            Some(seed) => Self::seeded(range, seed),
            None => Self::new(range),
        }
    }

    fn with_rng(range: DurationRange, rng: StdRng) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidDuration {
            min: range.min,
            most_likely: range.most_likely,
            max: range.max,
        };

        if !(range.min <= range.most_likely && range.most_likely <= range.max) {
            return Err(invalid());
        }

        let duration = if range.is_fixed() {
            None
        } else {
            let triangular = Triangular::new(
                range.min as f64,
                range.max as f64,
                range.most_likely as f64,
            )
            .map_err(|_| invalid())?;
            Some(triangular)
        };

        Ok(Self { rng, range, duration })
    }

    fn draw_duration(&mut self) -> u32 {
        match &self.duration {
            Some(triangular) => {
                let years = triangular.sample(&mut self.rng);
                // Truncate toward zero; a draw can touch `max` but never exceed it
                (years as u32).min(self.range.max)
            }
            None => self.range.min,
        }
    }
}

impl TrialSampler for RandomSampler {
    fn draw(&mut self, series_len: usize) -> TrialDraw {
        let start_year = self.rng.random_range(0..series_len);
        let duration = self.draw_duration();
        TrialDraw::new(start_year, duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: u32, most_likely: u32, max: u32) -> DurationRange {
        DurationRange { min, most_likely, max }
    }

    #[test]
    fn test_draws_stay_in_bounds() {
        let mut sampler = RandomSampler::seeded(range(10, 25, 40), 7).unwrap();
        for _ in 0..10_000 {
            let draw = sampler.draw(88);
            assert!(draw.start_year < 88);
            assert!((10..=40).contains(&draw.duration));
        }
    }

    #[test]
    fn test_fixed_range_is_constant() {
        let mut sampler = RandomSampler::seeded(range(30, 30, 30), 1).unwrap();
        for _ in 0..1_000 {
            assert_eq!(sampler.draw(10).duration, 30);
        }

        let mut zero = RandomSampler::seeded(range(0, 0, 0), 1).unwrap();
        assert_eq!(zero.draw(10).duration, 0);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = RandomSampler::seeded(range(5, 20, 35), 42).unwrap();
        let mut b = RandomSampler::seeded(range(5, 20, 35), 42).unwrap();
        let draws_a: Vec<_> = (0..100).map(|_| a.draw(50)).collect();
        let draws_b: Vec<_> = (0..100).map(|_| b.draw(50)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_durations_cluster_near_mode() {
        let mut sampler = RandomSampler::seeded(range(10, 25, 40), 3).unwrap();
        let n = 20_000;
        let mean: f64 = (0..n).map(|_| sampler.draw(88).duration as f64).sum::<f64>() / n as f64;
        // Triangular mean is 25; truncation pulls it down by about half a year
        assert!((mean - 24.5).abs() < 0.5, "mean duration {mean}");
    }

    #[test]
    fn test_unordered_range_rejected() {
        let err = RandomSampler::seeded(range(20, 10, 30), 0).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDuration { min: 20, most_likely: 10, max: 30 }
        );
    }
}
