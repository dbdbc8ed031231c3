//! Benchmark objectives for evaluating the forest.
//!
//! Classic continuous test functions plus a two-peak landscape that traps
//! greedy local search. Each function is also reachable through the
//! [`Benchmark`] registry, which carries its usual search box and optimum.

use std::f64::consts::{E, TAU};
use std::fmt;
use std::str::FromStr;

use crate::error::ForestError;

/// `Σ xᵢ²`. Minimum 0 at the origin.
///
/// ```
/// use forest_evolution::benchmarks::sphere;
/// assert_eq!(sphere(&[3.0, 4.0]), 25.0);
/// ```
#[must_use]
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().fold(0.0, |acc, &xi| xi.mul_add(xi, acc))
}

/// Rosenbrock's banana valley. Minimum 0 at `(1, ..., 1)`.
#[must_use]
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.iter()
        .zip(x.iter().skip(1))
        .map(|(&xi, &next)| 100.0 * (next - xi * xi).powi(2) + (1.0 - xi).powi(2))
        .sum()
}

/// `10·n + Σ (xᵢ² - 10·cos(2π·xᵢ))`. Minimum 0 at the origin, with a local
/// minimum near every integer lattice point.
///
/// ```
/// use forest_evolution::benchmarks::rastrigin;
/// assert!(rastrigin(&[0.0; 10]).abs() < 1e-12);
/// ```
#[must_use]
pub fn rastrigin(x: &[f64]) -> f64 {
    x.iter()
        .map(|&xi| 10.0 + xi * xi - 10.0 * (TAU * xi).cos())
        .sum()
}

/// Ackley's function. Minimum 0 at the origin; nearly flat far from it.
#[must_use]
pub fn ackley(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    let n = x.len() as f64;
    let rms = (sphere(x) / n).sqrt();
    let mean_cos = x.iter().map(|&xi| (TAU * xi).cos()).sum::<f64>() / n;
    20.0 + E - 20.0 * (-0.2 * rms).exp() - mean_cos.exp()
}

/// Griewank's function. Minimum 0 at the origin.
#[must_use]
pub fn griewank(x: &[f64]) -> f64 {
    let mut product = 1.0;
    for (i, &xi) in x.iter().enumerate() {
        product *= (xi / ((i + 1) as f64).sqrt()).cos();
    }
    1.0 + sphere(x) / 4000.0 - product
}

/// Schwefel's deceptive function. Minimum ≈ 0 at `(420.9687, ...)`, far from
/// the second-best basin.
#[must_use]
pub fn schwefel(x: &[f64]) -> f64 {
    x.iter()
        .map(|&xi| 418.9829 - xi * xi.abs().sqrt().sin())
        .sum()
}

/// Two-peak landscape in the unit square.
///
/// A wide, shallow basin at (0.5, 0.5) (f = 1.2) and a narrow, deep one near
/// (0.58, 0.17) (f ≈ 0.456). Only the first two components are read.
///
/// # Panics
///
/// If `x` has fewer than two components.
///
/// ```
/// use forest_evolution::benchmarks::two_peaks;
/// assert!((two_peaks(&[0.5, 0.5]) - 1.2).abs() < 1e-6);
/// ```
#[must_use]
pub fn two_peaks(x: &[f64]) -> f64 {
    let r1 = (x[0] - 0.5).powi(2) + (x[1] - 0.5).powi(2);
    let r2 = (x[0] - 0.6).powi(2) + (x[1] - 0.1).powi(2);
    let (s1, s2) = (0.3_f64, 0.03_f64);
    2.0 - (0.80 * (-(r1 * r1) / (s1 * s1)).exp() + 0.88 * (-(r2 * r2) / (s2 * s2)).exp())
}

/// Registry of the built-in objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Benchmark {
    Sphere,
    Rosenbrock,
    Rastrigin,
    Ackley,
    Griewank,
    Schwefel,
    TwoPeaks,
}

impl Benchmark {
    /// Every benchmark, in listing order.
    pub const ALL: [Self; 7] = [
        Self::Sphere,
        Self::Rosenbrock,
        Self::Rastrigin,
        Self::Ackley,
        Self::Griewank,
        Self::Schwefel,
        Self::TwoPeaks,
    ];

    /// Name used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Rosenbrock => "rosenbrock",
            Self::Rastrigin => "rastrigin",
            Self::Ackley => "ackley",
            Self::Griewank => "griewank",
            Self::Schwefel => "schwefel",
            Self::TwoPeaks => "two-peaks",
        }
    }

    /// The objective itself.
    #[must_use]
    pub fn function(self) -> fn(&[f64]) -> f64 {
        match self {
            Self::Sphere => sphere,
            Self::Rosenbrock => rosenbrock,
            Self::Rastrigin => rastrigin,
            Self::Ackley => ackley,
            Self::Griewank => griewank,
            Self::Schwefel => schwefel,
            Self::TwoPeaks => two_peaks,
        }
    }

    /// Usual search box, the same on every dimension.
    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Self::Sphere => (-100.0, 100.0),
            Self::Rosenbrock => (-30.0, 30.0),
            Self::Rastrigin => (-5.12, 5.12),
            Self::Ackley => (-32.0, 32.0),
            Self::Griewank => (-600.0, 600.0),
            Self::Schwefel => (-500.0, 500.0),
            Self::TwoPeaks => (0.0, 1.0),
        }
    }

    /// Global minimum value.
    #[must_use]
    pub fn optimum(self) -> f64 {
        match self {
            Self::TwoPeaks => 0.4563,
            _ => 0.0,
        }
    }

    /// Dimension the function is defined in, if it is fixed.
    #[must_use]
    pub fn dimension(self) -> Option<usize> {
        match self {
            Self::TwoPeaks => Some(2),
            _ => None,
        }
    }

    /// Whether the landscape has local minima besides the global one.
    #[must_use]
    pub fn multimodal(self) -> bool {
        !matches!(self, Self::Sphere | Self::Rosenbrock)
    }

    /// Evaluate at `x`.
    #[must_use]
    pub fn evaluate(self, x: &[f64]) -> f64 {
        (self.function())(x)
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Benchmark {
    type Err = ForestError;

    /// Case-insensitive; `_` and `-` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|b| b.name() == wanted)
            .ok_or_else(|| {
                ForestError::invalid_argument("function", s, "a name listed by `forest list`")
            })
    }
}

#[cfg(test)]
#[path = "benchmarks_tests.rs"]
mod tests;
