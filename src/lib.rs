//! Honey Badger Algorithm for continuous black-box minimization.
//!
//! Minimizes a scalar objective over a bounded real vector space without
//! gradient information. Constraints are handled by the caller, folded into
//! the objective as penalty terms.
//!
//! - [`hba`]: configuration, bounds, search operators and drivers
//! - [`random`]: the seeded random stream each optimizer owns
//! - [`error`]: configuration errors
//!
//! # Example
//!
//! ```
//! use u_hba::hba::{Bounds, HbaConfig, HbaRunner};
//!
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//! let config = HbaConfig::default().with_seed(42);
//! let result = HbaRunner::run(&sphere, 2, &Bounds::uniform(-100.0, 100.0), &config)?;
//! assert!(result.best_fitness < 1e-3);
//! # Ok::<(), u_hba::HbaError>(())
//! ```
//!
//! # Reproducibility
//!
//! Every optimizer owns its own random stream. For a fixed seed,
//! configuration and pure objective, runs are bit-for-bit identical, and
//! independent instances can run on separate threads without
//! synchronization.

pub mod error;
pub mod hba;
pub mod random;

pub use error::HbaError;
