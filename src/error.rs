//! Error types for forest evolution.
//!
//! Every error is fatal to the run that raised it; the engine never retries
//! or degrades.

use thiserror::Error;

/// Error returned by a user-supplied objective function.
pub type ObjectiveError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for forest evolution.
///
/// # Examples
///
/// ```
/// use forest_evolution::error::ForestError;
///
/// let err = ForestError::DimensionMismatch { lower: 3, upper: 2 };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug, Error)]
pub enum ForestError {
    /// `lower` and `upper` bounds have different lengths.
    #[error("Bounds dimension mismatch: lower has {lower} components, upper has {upper}")]
    DimensionMismatch {
        /// Length of the lower bound vector
        lower: usize,
        /// Length of the upper bound vector
        upper: usize,
    },

    /// Invalid hyperparameter or dispersal mode.
    #[error("Invalid argument: {param} = {value}, expected {constraint}")]
    InvalidArgument {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// The objective function failed; carried unmodified as the source.
    #[error("Objective evaluation failed: {0}")]
    Objective(#[source] ObjectiveError),

    /// Configuration file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while reading configuration or writing reports.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ForestError {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(
        param: &str,
        value: impl std::fmt::Display,
        constraint: &str,
    ) -> Self {
        Self::InvalidArgument {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Whether this error originated in the objective function.
    #[must_use]
    pub fn is_objective_failure(&self) -> bool {
        matches!(self, Self::Objective(_))
    }
}

impl From<serde_json::Error> for ForestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, ForestError>;
