//! HBA configuration.

use crate::error::{HbaError, Result};

/// Configuration for the Honey Badger Algorithm.
///
/// # Examples
///
/// ```
/// use u_hba::hba::HbaConfig;
///
/// let config = HbaConfig::default()
///     .with_pop_size(40)
///     .with_max_iter(200)
///     .with_c(2.0)
///     .with_beta(6.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HbaConfig {
    /// Number of candidates in the population. Must be at least 2.
    pub pop_size: usize,

    /// Number of iterations a full run performs. 0 leaves the
    /// initial population untouched.
    pub max_iter: usize,

    /// Initial density factor `C`. The step scale decays as
    /// `C * exp(-t / max_iter)`.
    pub c: f64,

    /// Digging intensification coefficient. Typical value: 6.
    pub beta: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a random seed when the optimizer is created.
    pub seed: Option<u64>,
}

impl Default for HbaConfig {
    fn default() -> Self {
        Self {
            pop_size: 30,
            max_iter: 500,
            c: 2.0,
            beta: 6.0,
            seed: None,
        }
    }
}

impl HbaConfig {
    pub fn with_pop_size(mut self, n: usize) -> Self {
        self.pop_size = n;
        self
    }

    pub fn with_max_iter(mut self, n: usize) -> Self {
        self.max_iter = n;
        self
    }

    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`HbaError::InvalidConfiguration`] describing the first
    /// offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.pop_size < 2 {
            return Err(HbaError::InvalidConfiguration(format!(
                "pop_size must be at least 2, got {}",
                self.pop_size
            )));
        }
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(HbaError::InvalidConfiguration(format!(
                "C must be positive and finite, got {}",
                self.c
            )));
        }
        if !(self.beta.is_finite() && self.beta > 0.0) {
            return Err(HbaError::InvalidConfiguration(format!(
                "beta must be positive and finite, got {}",
                self.beta
            )));
        }
        Ok(())
    }
}
