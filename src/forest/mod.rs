//! Forest Evolution Algorithm (FEA).
//!
//! A population-based, derivative-free minimizer over a bounded box, adapted
//! from Invasive Weed Optimization. Trees disperse a number of seeds that
//! scales linearly in fitness; seeds either land near the parent (local
//! search with an annealed spread) or anywhere in the box (global
//! exploration).
//!
//! # Algorithm
//!
//! ```text
//! 1. Reproduction  best tree → max_seeds, worst → min_seeds (linear)
//! 2. Dispersal     mutate a copy of the parent with N(0, spread) noise,
//!                  or sample a fresh tree with probability ε
//! 3. Selection     merge, sort ascending, keep max_trees
//! 4. Decay         ε ← ε - decay
//! ```
//!
//! # Example
//!
//! ```
//! use forest_evolution::forest::{Forest, ForestConfig};
//!
//! // Two-dimensional sphere centred at (0.5, 0.5)
//! let objective = |x: &[f64]| -> f64 { x.iter().map(|xi| (xi - 0.5).powi(2)).sum() };
//!
//! let config = ForestConfig::uniform_bounds(2, 0.0, 1.0, 0.1, 0.001)
//!     .with_max_iterations(50)
//!     .with_seed(7);
//! let mut forest = Forest::new(config, objective).unwrap();
//! let history = forest.run().unwrap();
//!
//! // Best fitness never gets worse
//! for w in history.best.windows(2) {
//!     assert!(w[1] <= w[0]);
//! }
//! ```
//!
//! # References
//!
//! - Mehrabian & Lucas (2006): "A novel numerical optimization algorithm
//!   inspired from weed colonization"

mod config;
mod engine;
mod history;
mod objective;
mod spread;
mod tree;

pub use config::{Dispersal, ForestConfig};
pub use engine::{seed_count, Forest};
pub use history::{ConvergenceHistory, GenerationStats};
pub use objective::{fallible, Fallible, Objective};
pub use spread::SpreadSchedule;
pub use tree::{Scored, Tree};

#[cfg(test)]
mod tests;
