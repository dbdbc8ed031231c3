//! Objective functions.
//!
//! Any `Fn(&[f64]) -> f64` is an [`Objective`] that never fails. Objectives
//! that can fail (a simulation that diverges, a missing input file) are wrapped
//! with [`fallible`]; their errors abort the run as
//! [`ForestError::Objective`](crate::error::ForestError::Objective).

use crate::error::ObjectiveError;

/// A function to minimize over a bounded box.
pub trait Objective {
    /// Evaluate a point. Lower is better.
    ///
    /// # Errors
    ///
    /// Whatever the objective itself reports. The engine propagates it untouched.
    fn evaluate(&self, x: &[f64]) -> Result<f64, ObjectiveError>;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, x: &[f64]) -> Result<f64, ObjectiveError> {
        Ok(self(x))
    }
}

/// Adapter for objectives returning `Result`.
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(F);

/// Wrap a fallible closure as an [`Objective`].
///
/// # Example
///
/// ```
/// use forest_evolution::forest::{fallible, Objective};
///
/// let f = fallible(|x: &[f64]| {
///     if x[0] < 0.0 {
///         Err("negative input")
///     } else {
///         Ok(x[0].sqrt())
///     }
/// });
/// assert!(f.evaluate(&[4.0]).is_ok());
/// assert!(f.evaluate(&[-1.0]).is_err());
/// ```
pub fn fallible<F, E>(f: F) -> Fallible<F>
where
    F: Fn(&[f64]) -> Result<f64, E>,
    E: Into<ObjectiveError>,
{
    Fallible(f)
}

impl<F, E> Objective for Fallible<F>
where
    F: Fn(&[f64]) -> Result<f64, E>,
    E: Into<ObjectiveError>,
{
    fn evaluate(&self, x: &[f64]) -> Result<f64, ObjectiveError> {
        (self.0)(x).map_err(Into::into)
    }
}
