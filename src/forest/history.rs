//! Convergence statistics.

use serde::{Deserialize, Serialize};

/// Snapshot taken at the end of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Iteration the stats belong to (1-based)
    pub iteration: usize,
    /// Fitness of the best tree after selection
    pub best: f64,
    /// Mean fitness of the forest after selection
    pub mean: f64,
    /// Exploration probability after decay
    pub epsilon: f64,
    /// Spread used for this generation's dispersal
    pub spread: f64,
    /// Forest size after selection
    pub population: usize,
    /// Seedlings dispersed this generation
    pub seedlings: usize,
}

/// Per-generation best and mean fitness of a run.
///
/// Serializes as `{"best": [...], "mean": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceHistory {
    /// Best fitness per generation
    pub best: Vec<f64>,
    /// Mean fitness per generation
    pub mean: Vec<f64>,
}

impl ConvergenceHistory {
    /// Empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty history with room for `n` generations.
    #[must_use]
    pub fn with_capacity(n: usize) -> Self {
        Self {
            best: Vec::with_capacity(n),
            mean: Vec::with_capacity(n),
        }
    }

    /// Record one generation.
    pub fn push(&mut self, best: f64, mean: f64) {
        self.best.push(best);
        self.mean.push(mean);
    }

    /// Append another history.
    pub fn append(&mut self, other: &Self) {
        self.best.extend_from_slice(&other.best);
        self.mean.extend_from_slice(&other.mean);
    }

    /// Number of recorded generations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.best.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Best fitness of the last generation.
    #[must_use]
    pub fn last_best(&self) -> Option<f64> {
        self.best.last().copied()
    }

    /// Mean fitness of the last generation.
    #[must_use]
    pub fn last_mean(&self) -> Option<f64> {
        self.mean.last().copied()
    }

    /// `(best, mean)` pairs in generation order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.best.iter().copied().zip(self.mean.iter().copied())
    }
}

impl Extend<GenerationStats> for ConvergenceHistory {
    fn extend<I: IntoIterator<Item = GenerationStats>>(&mut self, iter: I) {
        for stats in iter {
            self.push(stats.best, stats.mean);
        }
    }
}
