//! Error type shared by every optimizer in the crate.
//!
//! All errors abort the current run. There is no retry policy and no
//! partial-generation recovery.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OptimError>;

/// Errors raised by runners and operators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimError {
    /// `simulate` was called before a required strategy was configured.
    #[error("missing {0} strategy: set it before calling simulate")]
    MissingStrategy(&'static str),

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A population, fitness vector, or parent list has the wrong size.
    #[error("shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A gene lies outside the domain an operator requires.
    #[error("invalid gene: {0}")]
    InvalidGene(String),

    /// A division by zero, an empty probability mass, or a NaN fitness.
    #[error("numerical hazard: {0}")]
    NumericalHazard(String),
}

impl OptimError {
    pub(crate) fn shape(what: &'static str, expected: usize, actual: usize) -> Self {
        OptimError::ShapeMismatch {
            what,
            expected,
            actual,
        }
    }
}
