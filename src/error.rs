//! Error types.

use thiserror::Error;

/// Errors reported by the optimizer.
///
/// All of them surface while binding a problem to an optimizer; an
/// iteration in progress never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HbaError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("dimension mismatch: bounds describe {bounds} dimensions, problem has {dim}")]
    DimensionMismatch { bounds: usize, dim: usize },
}

pub type Result<T> = std::result::Result<T, HbaError>;
