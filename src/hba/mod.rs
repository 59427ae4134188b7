//! Honey Badger Algorithm (HBA).
//!
//! A population-based metaheuristic for continuous, box-constrained
//! minimization. Each iteration moves every candidate relative to the best
//! solution found so far using one of two rules:
//!
//! - **Digging**: a large, intensity-scaled move around the incumbent,
//!   shaped by a cardioid-like perturbation
//! - **Honey**: a smaller move toward (or past) the incumbent
//!
//! The step scale decays over the run (density factor), shifting the
//! search from exploration to exploitation. Greedy per-individual
//! selection keeps a candidate's predecessor whenever it was strictly
//! better.
//!
//! # Key Types
//!
//! - [`HbaConfig`]: algorithm parameters
//! - [`Bounds`]: uniform or per-dimension box constraints
//! - [`Objective`]: the function to minimize
//! - [`HbaOptimizer`]: single-step and batch drivers over one bound problem
//! - [`HbaRunner`]: one-call runs, cancellation and independent restarts
//!
//! # References
//!
//! - Hashim et al. (2022), "Honey Badger Algorithm: New metaheuristic
//!   algorithm for solving optimization problems", *Mathematics and
//!   Computers in Simulation* 192, 84-110

mod bounds;
mod config;
pub mod operators;
mod population;
mod runner;
mod types;

pub use bounds::Bounds;
pub use config::HbaConfig;
pub use population::Population;
pub use runner::{DriverState, HbaOptimizer, HbaResult, HbaRunner};
pub use types::{
    is_better, ConstrainedEvaluation, ConstrainedObjective, Objective, Phase, Scalarized,
};
