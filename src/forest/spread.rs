//! Dispersal spread schedule.
//!
//! ```text
//! spread(t) = ((T - t) / T)^n · (σ_max - σ_min) + σ_min
//! ```
//!
//! Coarse steps early, fine steps late. Iterations past `T` stay at `σ_min`.

use serde::{Deserialize, Serialize};

use super::ForestConfig;

/// Annealed standard deviation of local seeding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadSchedule {
    /// Spread at iteration 0
    pub max_std: f64,
    /// Spread at iteration `max_iterations`
    pub min_std: f64,
    /// Length `T` of the schedule
    pub max_iterations: usize,
    /// Exponent `n`
    pub exponent: i32,
}

impl SpreadSchedule {
    /// Build a schedule.
    #[must_use]
    pub fn new(max_std: f64, min_std: f64, max_iterations: usize, exponent: i32) -> Self {
        Self {
            max_std,
            min_std,
            max_iterations,
            exponent,
        }
    }

    /// Schedule of a validated configuration.
    #[must_use]
    pub fn from_config(config: &ForestConfig) -> Self {
        Self::new(
            config.max_std,
            config.min_std,
            config.max_iterations,
            config.spread_exponent,
        )
    }

    /// Spread for the given (1-based) iteration.
    #[must_use]
    pub fn spread(&self, iteration: usize) -> f64 {
        if self.max_iterations == 0 {
            return self.min_std;
        }
        let total = self.max_iterations as f64;
        let remaining = self.max_iterations.saturating_sub(iteration) as f64;
        (remaining / total).powi(self.exponent) * (self.max_std - self.min_std) + self.min_std
    }
}
