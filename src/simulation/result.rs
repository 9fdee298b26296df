//! Aggregate output of a simulation run

use serde::Serialize;

use super::trial::TrialOutcome;

/// Every trial outcome in trial order, plus the number of ruined trials
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    outcomes: Vec<TrialOutcome>,
    ruined_count: usize,
}

impl AggregateResult {
    pub fn new(outcomes: Vec<TrialOutcome>) -> Self {
        let ruined_count = outcomes.iter().filter(|o| o.is_ruined()).count();
        Self {
            outcomes,
            ruined_count,
        }
    }

    pub fn outcomes(&self) -> &[TrialOutcome] {
        &self.outcomes
    }

    pub fn ruined_count(&self) -> usize {
        self.ruined_count
    }

    pub fn trial_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Recorded value of each trial (ruined trials as 0), in trial order
    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.outcomes.iter().map(|o| o.value())
    }

    /// Values of the first `limit` trials
    pub fn leading_values(&self, limit: usize) -> Vec<u64> {
        self.values().take(limit).collect()
    }
}
