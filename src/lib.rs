//! Forest evolution: derivative-free minimization over a bounded box.
//!
//! The Forest Evolution Algorithm (FEA) is a variant of Invasive Weed
//! Optimization built on the seed dispersal of trees. A forest of candidate
//! solutions reproduces in proportion to fitness, spreads seeds locally with
//! an annealed step size or globally at random, and keeps only its fittest
//! trees.
//!
//! # Quick Start
//!
//! ```
//! use forest_evolution::prelude::*;
//!
//! let config = ForestConfig::uniform_bounds(10, -5.12, 5.12, 1.0, 0.3)
//!     .with_initial_trees(5)
//!     .with_max_trees(50)
//!     .with_seeds(5, 50)
//!     .with_max_iterations(60)
//!     .with_seed(42);
//!
//! let mut forest = Forest::new(config, benchmarks::rastrigin).unwrap();
//! let history = forest.run().unwrap();
//!
//! assert_eq!(history.len(), 60);
//! assert!(history.last_best().unwrap() <= history.best[0]);
//! println!("best = {:.4}", forest.best().fitness);
//! ```
//!
//! # Modules
//!
//! - [`forest`]: the optimizer (trees, configuration, spread schedule, engine)
//! - [`benchmarks`]: standard test objectives
//! - [`report`]: convergence trace rendering
//! - [`error`]: error types

pub mod benchmarks;
pub mod error;
pub mod forest;
pub mod prelude;
pub mod report;

pub use error::{ForestError, Result};
pub use forest::{ConvergenceHistory, Dispersal, Forest, ForestConfig, Objective};
