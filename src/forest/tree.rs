//! Individual trees of the forest.
//!
//! A [`Tree`] is a point of the search space plus the bookkeeping the engine
//! needs between phases. Trees are owned by the [`Forest`](super::Forest);
//! callers only ever see shared references.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A candidate solution.
///
/// Equality compares the position vector only: two trees at the same point
/// are the same tree regardless of age or seed count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    /// Position in the search space, one component per dimension
    pub vector: Vec<f64>,
    /// Number of seeds to disperse this generation (recomputed every generation)
    pub seeds: usize,
    /// Generations survived (diagnostic only, never used for ordering)
    pub age: usize,
}

impl Tree {
    /// Wrap an existing position vector.
    #[must_use]
    pub fn new(vector: Vec<f64>) -> Self {
        Self {
            vector,
            seeds: 0,
            age: 0,
        }
    }

    /// Sample a tree uniformly inside `[lower[i], upper[i]]` for every dimension.
    ///
    /// Draws one `U[0, 1)` value per dimension, in dimension order.
    pub fn random<R: Rng + ?Sized>(lower: &[f64], upper: &[f64], rng: &mut R) -> Self {
        let vector = lower
            .iter()
            .zip(upper)
            .map(|(&lo, &hi)| lo + rng.gen::<f64>() * (hi - lo))
            .collect();
        Self::new(vector)
    }

    /// Problem dimension.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    /// Snap every component into `[lower[i], upper[i]]`.
    pub fn clamp(&mut self, lower: &[f64], upper: &[f64]) {
        for ((v, &lo), &hi) in self.vector.iter_mut().zip(lower).zip(upper) {
            if *v < lo {
                *v = lo;
            } else if *v > hi {
                *v = hi;
            }
        }
    }

    /// Whether every component lies inside the bounds.
    #[must_use]
    pub fn within(&self, lower: &[f64], upper: &[f64]) -> bool {
        self.vector
            .iter()
            .zip(lower.iter().zip(upper))
            .all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
    }

    /// Hashable key identifying the position exactly.
    ///
    /// `-0.0` and `0.0` map to the same key so the key agrees with `==`.
    #[must_use]
    pub fn key(&self) -> Vec<u64> {
        self.vector.iter().map(|&v| (v + 0.0).to_bits()).collect()
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.vector == other.vector
    }
}

/// A tree together with its objective value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scored {
    /// Objective value (lower is better)
    pub fitness: f64,
    /// The evaluated tree
    pub tree: Tree,
}

impl Scored {
    /// Pair a tree with its fitness.
    #[must_use]
    pub fn new(fitness: f64, tree: Tree) -> Self {
        Self { fitness, tree }
    }

    /// Position of the underlying tree.
    #[must_use]
    pub fn vector(&self) -> &[f64] {
        &self.tree.vector
    }
}
