//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use forest_evolution::prelude::*;
//! ```

pub use crate::benchmarks;
pub use crate::error::ForestError;
pub use crate::forest::{
    fallible, ConvergenceHistory, Dispersal, Forest, ForestConfig, GenerationStats, Objective,
    Scored, Tree,
};
