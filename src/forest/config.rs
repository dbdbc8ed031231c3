//! Hyperparameters of a forest run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ForestError, Result};

/// Noise added to a mutated dimension during local seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dispersal {
    /// `N(0, spread)`: the spread schedule controls the step size.
    #[default]
    Normal,

    /// `U[-1, 1)`: fixed step size, ignores the spread schedule.
    Uniform,
}

impl Dispersal {
    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Uniform => "uniform",
        }
    }
}

impl fmt::Display for Dispersal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dispersal {
    type Err = ForestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "gaussian" => Ok(Self::Normal),
            "uniform" => Ok(Self::Uniform),
            _ => Err(ForestError::invalid_argument(
                "dispersal",
                s,
                "'normal' or 'uniform'",
            )),
        }
    }
}

fn default_initial_trees() -> usize {
    10
}
fn default_max_trees() -> usize {
    20
}
fn default_max_seeds() -> usize {
    10
}
fn default_min_seeds() -> usize {
    1
}
fn default_epsilon() -> f64 {
    0.1
}
fn default_max_iterations() -> usize {
    100
}
fn default_mutation_probability() -> f64 {
    0.1
}
fn default_spread_exponent() -> i32 {
    2
}

/// Configuration of a [`Forest`](super::Forest).
///
/// Bounds and spread limits are required; everything else has a default.
///
/// # Example
///
/// ```
/// use forest_evolution::forest::{Dispersal, ForestConfig};
///
/// let config = ForestConfig::uniform_bounds(2, 0.0, 1.0, 0.2, 0.01)
///     .with_max_trees(30)
///     .with_seed(42)
///     .with_dispersal(Dispersal::Normal);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.dimension(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Lower bound of every dimension
    pub lower: Vec<f64>,
    /// Upper bound of every dimension
    pub upper: Vec<f64>,
    /// Dispersal standard deviation at the first generation
    pub max_std: f64,
    /// Dispersal standard deviation at the last generation
    pub min_std: f64,
    /// Size of the randomly sampled initial forest (default: 10)
    #[serde(default = "default_initial_trees")]
    pub initial_trees: usize,
    /// Forest size kept after selection (default: 20)
    #[serde(default = "default_max_trees")]
    pub max_trees: usize,
    /// Seeds dispersed by the best tree (default: 10)
    #[serde(default = "default_max_seeds")]
    pub max_seeds: usize,
    /// Seeds dispersed by the worst tree (default: 1)
    #[serde(default = "default_min_seeds")]
    pub min_seeds: usize,
    /// Probability of global seeding per seedling (default: 0.1)
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Amount subtracted from epsilon after every generation (default: 0.0)
    #[serde(default)]
    pub epsilon_decay: f64,
    /// Generations executed by `run` (default: 100)
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Per-dimension mutation probability during local seeding (default: 0.1)
    #[serde(default = "default_mutation_probability")]
    pub mutation_probability: f64,
    /// Random seed; drawn fresh at construction when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Local seeding noise
    #[serde(default)]
    pub dispersal: Dispersal,
    /// Exponent of the spread schedule (default: 2)
    #[serde(default = "default_spread_exponent")]
    pub spread_exponent: i32,
}

impl ForestConfig {
    /// Create a configuration with explicit bounds and default hyperparameters.
    #[must_use]
    pub fn new(lower: Vec<f64>, upper: Vec<f64>, max_std: f64, min_std: f64) -> Self {
        Self {
            lower,
            upper,
            max_std,
            min_std,
            initial_trees: default_initial_trees(),
            max_trees: default_max_trees(),
            max_seeds: default_max_seeds(),
            min_seeds: default_min_seeds(),
            epsilon: default_epsilon(),
            epsilon_decay: 0.0,
            max_iterations: default_max_iterations(),
            mutation_probability: default_mutation_probability(),
            seed: None,
            dispersal: Dispersal::default(),
            spread_exponent: default_spread_exponent(),
        }
    }

    /// Same bounds `[lower, upper]` on every one of `dim` dimensions.
    #[must_use]
    pub fn uniform_bounds(dim: usize, lower: f64, upper: f64, max_std: f64, min_std: f64) -> Self {
        Self::new(vec![lower; dim], vec![upper; dim], max_std, min_std)
    }

    /// Set initial forest size.
    #[must_use]
    pub fn with_initial_trees(mut self, n: usize) -> Self {
        self.initial_trees = n;
        self
    }

    /// Set maximum forest size.
    #[must_use]
    pub fn with_max_trees(mut self, n: usize) -> Self {
        self.max_trees = n;
        self
    }

    /// Set the seed-count range.
    #[must_use]
    pub fn with_seeds(mut self, min_seeds: usize, max_seeds: usize) -> Self {
        self.min_seeds = min_seeds;
        self.max_seeds = max_seeds;
        self
    }

    /// Set exploration probability and its per-generation decay.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64, decay: f64) -> Self {
        self.epsilon = epsilon;
        self.epsilon_decay = decay;
        self
    }

    /// Set the number of generations.
    #[must_use]
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Set per-dimension mutation probability.
    #[must_use]
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Set random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the dispersal noise.
    #[must_use]
    pub fn with_dispersal(mut self, dispersal: Dispersal) -> Self {
        self.dispersal = dispersal;
        self
    }

    /// Set the spread schedule exponent.
    #[must_use]
    pub fn with_spread_exponent(mut self, exponent: i32) -> Self {
        self.spread_exponent = exponent;
        self
    }

    /// Problem dimension.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Load a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every hyperparameter.
    ///
    /// # Errors
    ///
    /// [`ForestError::DimensionMismatch`] when the bounds differ in length,
    /// [`ForestError::InvalidArgument`] for any other malformed value.
    pub fn validate(&self) -> Result<()> {
        if self.lower.len() != self.upper.len() {
            return Err(ForestError::DimensionMismatch {
                lower: self.lower.len(),
                upper: self.upper.len(),
            });
        }
        if self.lower.is_empty() {
            return Err(ForestError::invalid_argument(
                "lower",
                "[]",
                "at least one dimension",
            ));
        }
        for (i, (&lo, &hi)) in self.lower.iter().zip(&self.upper).enumerate() {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(ForestError::invalid_argument(
                    &format!("bounds[{i}]"),
                    format!("[{lo}, {hi}]"),
                    "finite values",
                ));
            }
            if lo > hi {
                return Err(ForestError::invalid_argument(
                    &format!("bounds[{i}]"),
                    format!("[{lo}, {hi}]"),
                    "lower <= upper",
                ));
            }
        }

        if !self.min_std.is_finite() || self.min_std < 0.0 {
            return Err(ForestError::invalid_argument(
                "min_std",
                self.min_std,
                "finite and >= 0",
            ));
        }
        if !self.max_std.is_finite() || self.max_std < self.min_std {
            return Err(ForestError::invalid_argument(
                "max_std",
                self.max_std,
                &format!("finite and >= min_std ({})", self.min_std),
            ));
        }

        if self.initial_trees == 0 {
            return Err(ForestError::invalid_argument("initial_trees", 0, ">= 1"));
        }
        if self.max_trees == 0 {
            return Err(ForestError::invalid_argument("max_trees", 0, ">= 1"));
        }
        if self.max_seeds < self.min_seeds {
            return Err(ForestError::invalid_argument(
                "max_seeds",
                self.max_seeds,
                &format!(">= min_seeds ({})", self.min_seeds),
            ));
        }
        if self.max_iterations == 0 {
            return Err(ForestError::invalid_argument("max_iterations", 0, ">= 1"));
        }
        if self.spread_exponent < 1 {
            return Err(ForestError::invalid_argument(
                "spread_exponent",
                self.spread_exponent,
                ">= 1",
            ));
        }

        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(ForestError::invalid_argument(
                "mutation_probability",
                self.mutation_probability,
                "value in [0, 1]",
            ));
        }
        if !self.epsilon.is_finite() {
            return Err(ForestError::invalid_argument(
                "epsilon",
                self.epsilon,
                "finite value",
            ));
        }
        if !self.epsilon_decay.is_finite() {
            return Err(ForestError::invalid_argument(
                "epsilon_decay",
                self.epsilon_decay,
                "finite value",
            ));
        }
        Ok(())
    }
}
