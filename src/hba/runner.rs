//! HBA execution drivers.
//!
//! [`HbaOptimizer`] owns one bound problem and exposes a single-step driver
//! ([`step`](HbaOptimizer::step)) and a batch driver
//! ([`run`](HbaOptimizer::run)). Both go through the same internal
//! iteration, so stepping `max_iter` times and running once leave the
//! optimizer in identical states.
//!
//! # Iteration
//!
//! 1. Snapshot the current population
//! 2. Compute alpha and intensity, pick the phase, build and clip the new population
//! 3. Evaluate it and update the incumbent
//! 4. Append the incumbent fitness to the convergence trace
//! 5. Restore each predecessor that was strictly better than its replacement
//! 6. Advance the iteration counter

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::bounds::Bounds;
use super::config::HbaConfig;
use super::operators;
use super::population::Population;
use super::types::{is_better, Objective, Phase};
use crate::error::{HbaError, Result};
use crate::random::RandomSource;

/// Lifecycle of a bound optimizer.
///
/// An unbound problem is just an [`HbaConfig`]; binding it through
/// [`HbaOptimizer::new`] yields `Initialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Population drawn and evaluated, no iteration performed yet.
    Initialized,
    /// At least one iteration performed, more remaining.
    Running,
    /// `iteration == max_iter`; further steps are no-ops.
    Completed,
}

/// Result of an HBA run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HbaResult {
    /// Best candidate found.
    pub best: Vec<f64>,

    /// Objective value of `best`.
    pub best_fitness: f64,

    /// Iterations performed.
    pub iterations: usize,

    /// Total objective evaluations.
    pub evaluations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Incumbent fitness before the first iteration and after each one.
    pub convergence: Vec<f64>,

    /// Seed the run's random stream started from.
    pub seed: u64,
}

/// A problem bound to the Honey Badger Algorithm.
///
/// # Examples
///
/// ```
/// use u_hba::hba::{Bounds, HbaConfig, HbaOptimizer};
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// let config = HbaConfig::default().with_pop_size(10).with_max_iter(50).with_seed(7);
/// let mut opt = HbaOptimizer::new(config, sphere, 2, Bounds::uniform(-5.0, 5.0)).unwrap();
///
/// while opt.step().is_some() {}
/// assert_eq!(opt.convergence().len(), 51);
/// ```
#[derive(Clone)]
pub struct HbaOptimizer<O> {
    config: HbaConfig,
    objective: O,
    dim: usize,
    bounds: Bounds,
    rng: RandomSource,
    population: Population,
    iteration: usize,
    last_phase: Option<Phase>,
    last_intensity: Option<Vec<f64>>,
    previous_population: Option<Vec<Vec<f64>>>,
}

impl<O: Objective> HbaOptimizer<O> {
    /// Binds an objective, dimension and bounds, then draws and evaluates
    /// the initial population.
    ///
    /// Validation happens before the random stream is created, so an
    /// invalid configuration consumes no random draws.
    pub fn new(config: HbaConfig, objective: O, dim: usize, bounds: Bounds) -> Result<Self> {
        config.validate()?;
        bounds.validate(dim)?;

        let mut rng = RandomSource::new(config.seed);
        let population = init_population(&config, &objective, dim, &bounds, &mut rng);
        tracing::debug!(
            pop_size = config.pop_size,
            dim,
            max_iter = config.max_iter,
            seed = rng.seed(),
            best_fitness = population.best_fitness(),
            "hba initialized"
        );

        Ok(Self {
            config,
            objective,
            dim,
            bounds,
            rng,
            population,
            iteration: 0,
            last_phase: None,
            last_intensity: None,
            previous_population: None,
        })
    }

    /// Performs one iteration.
    ///
    /// Returns the phase applied, or `None` without touching any state
    /// once the optimizer is [`Completed`](DriverState::Completed).
    pub fn step(&mut self) -> Option<Phase> {
        if self.iteration >= self.config.max_iter {
            return None;
        }
        Some(self.advance())
    }

    /// Runs the remaining iterations to completion.
    pub fn run(&mut self) {
        self.run_with_cancel(None);
    }

    /// Runs the remaining iterations, checking `cancel` before each one.
    ///
    /// Returns `true` if the run stopped early because the flag was set.
    pub fn run_with_cancel(&mut self, cancel: Option<&AtomicBool>) -> bool {
        while self.iteration < self.config.max_iter {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                tracing::info!(
                    iteration = self.iteration,
                    best_fitness = self.best_fitness(),
                    "hba cancelled"
                );
                return true;
            }
            self.advance();
        }
        tracing::info!(
            iterations = self.iteration,
            evaluations = self.evaluations(),
            best_fitness = self.best_fitness(),
            "hba completed"
        );
        false
    }

    /// Discards all progress and redraws the initial population from the
    /// original seed.
    pub fn reset(&mut self) {
        self.rng = RandomSource::from_seed(self.rng.seed());
        self.population = init_population(
            &self.config,
            &self.objective,
            self.dim,
            &self.bounds,
            &mut self.rng,
        );
        self.iteration = 0;
        self.last_phase = None;
        self.last_intensity = None;
        self.previous_population = None;
        tracing::debug!(seed = self.rng.seed(), "hba reset");
    }

    fn advance(&mut self) -> Phase {
        self.previous_population = Some(self.population.candidates().to_vec());

        let alpha = operators::density_factor(self.config.c, self.iteration, self.config.max_iter);
        let intensity =
            operators::intensity(self.population.candidates(), self.population.best(), &mut self.rng);
        let phase = operators::select_phase(&mut self.rng);

        let best = self.population.best();
        let next: Vec<Vec<f64>> = self
            .population
            .candidates()
            .iter()
            .zip(&intensity)
            .map(|(x, &inten)| {
                let mut moved = match phase {
                    Phase::Digging => {
                        operators::dig(x, best, alpha, self.config.beta, inten, &mut self.rng)
                    }
                    Phase::Honey => operators::honey(x, best, alpha, &mut self.rng),
                };
                self.bounds.clip(&mut moved);
                moved
            })
            .collect();

        let (old, old_fitness) = self.population.replace(next, &self.objective);
        self.population.record();
        let reverted = self.population.revert_worse(old, old_fitness);
        self.iteration += 1;

        tracing::trace!(
            iteration = self.iteration,
            %phase,
            alpha,
            reverted,
            best_fitness = self.population.best_fitness(),
            "hba step"
        );

        self.last_phase = Some(phase);
        self.last_intensity = Some(intensity);
        phase
    }
}

impl<O> HbaOptimizer<O> {
    pub fn state(&self) -> DriverState {
        if self.iteration >= self.config.max_iter {
            DriverState::Completed
        } else if self.iteration == 0 {
            DriverState::Initialized
        } else {
            DriverState::Running
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state() == DriverState::Completed
    }

    /// Current candidates, in index order.
    pub fn population(&self) -> &[Vec<f64>] {
        self.population.candidates()
    }

    /// Fitness of each current candidate.
    pub fn fitness(&self) -> &[f64] {
        self.population.fitness()
    }

    /// Best candidate seen so far.
    pub fn best(&self) -> &[f64] {
        self.population.best()
    }

    pub fn best_fitness(&self) -> f64 {
        self.population.best_fitness()
    }

    /// Incumbent fitness before the first iteration and after each one.
    ///
    /// Always `iteration() + 1` entries long.
    pub fn convergence(&self) -> &[f64] {
        self.population.convergence()
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn max_iter(&self) -> usize {
        self.config.max_iter
    }

    /// Phase applied on the last iteration.
    pub fn last_phase(&self) -> Option<Phase> {
        self.last_phase
    }

    /// Intensity vector computed on the last iteration.
    pub fn last_intensity(&self) -> Option<&[f64]> {
        self.last_intensity.as_deref()
    }

    /// Population as it was before the last iteration.
    pub fn previous_population(&self) -> Option<&[Vec<f64>]> {
        self.previous_population.as_deref()
    }

    pub fn evaluations(&self) -> usize {
        self.population.evaluations()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn config(&self) -> &HbaConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Snapshot of the current outcome.
    pub fn result(&self) -> HbaResult {
        HbaResult {
            best: self.population.best().to_vec(),
            best_fitness: self.population.best_fitness(),
            iterations: self.iteration,
            evaluations: self.population.evaluations(),
            cancelled: false,
            convergence: self.population.convergence().to_vec(),
            seed: self.rng.seed(),
        }
    }
}

impl<O> std::fmt::Debug for HbaOptimizer<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HbaOptimizer")
            .field("config", &self.config)
            .field("dim", &self.dim)
            .field("bounds", &self.bounds)
            .field("iteration", &self.iteration)
            .field("best_fitness", &self.population.best_fitness())
            .field("last_phase", &self.last_phase)
            .finish_non_exhaustive()
    }
}

fn init_population<O: Objective + ?Sized>(
    config: &HbaConfig,
    objective: &O,
    dim: usize,
    bounds: &Bounds,
    rng: &mut RandomSource,
) -> Population {
    let mut population = Population::draw(config.pop_size, dim, bounds, rng);
    population.evaluate(objective);
    population.record();
    population
}

/// Borrowed objective, so runners can bind `&O` without taking ownership.
struct Shared<'a, O: ?Sized>(&'a O);

impl<O: Objective + ?Sized> Objective for Shared<'_, O> {
    fn evaluate(&self, x: &[f64]) -> f64 {
        self.0.evaluate(x)
    }
}

/// One-call HBA drivers.
///
/// # Usage
///
/// ```
/// use u_hba::hba::{Bounds, HbaConfig, HbaRunner};
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// let config = HbaConfig::default().with_max_iter(100).with_seed(42);
/// let result = HbaRunner::run(&sphere, 3, &Bounds::uniform(-10.0, 10.0), &config).unwrap();
/// assert_eq!(result.convergence.len(), 101);
/// ```
pub struct HbaRunner;

impl HbaRunner {
    /// Runs HBA to completion.
    pub fn run<O: Objective + ?Sized>(
        objective: &O,
        dim: usize,
        bounds: &Bounds,
        config: &HbaConfig,
    ) -> Result<HbaResult> {
        Self::run_with_cancel(objective, dim, bounds, config, None)
    }

    /// Runs HBA with an optional cancellation token.
    ///
    /// If `cancel` is set, the run stops before the next iteration and
    /// returns the best solution found so far.
    pub fn run_with_cancel<O: Objective + ?Sized>(
        objective: &O,
        dim: usize,
        bounds: &Bounds,
        config: &HbaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<HbaResult> {
        let mut optimizer = HbaOptimizer::new(config.clone(), Shared(objective), dim, bounds.clone())?;
        let cancelled = optimizer.run_with_cancel(cancel.as_deref());
        Ok(HbaResult {
            cancelled,
            ..optimizer.result()
        })
    }

    /// Runs `restarts` independent instances and returns the best result.
    ///
    /// Restart `k` is seeded with `seed + k` (wrapping), where `seed` is the
    /// configured seed or a random one. With the `parallel` feature the
    /// instances run on the rayon thread pool; results are identical either
    /// way. Ties go to the lowest `k`.
    pub fn run_restarts<O: Objective + ?Sized>(
        objective: &O,
        dim: usize,
        bounds: &Bounds,
        config: &HbaConfig,
        restarts: usize,
    ) -> Result<HbaResult> {
        if restarts == 0 {
            return Err(HbaError::InvalidConfiguration(
                "restarts must be at least 1".into(),
            ));
        }
        config.validate()?;
        bounds.validate(dim)?;

        let base = config.seed.unwrap_or_else(rand::random);
        let run_one = |k: usize| {
            let cfg = config.clone().with_seed(base.wrapping_add(k as u64));
            Self::run(objective, dim, bounds, &cfg)
        };

        #[cfg(feature = "parallel")]
        let results: Vec<HbaResult> = {
            use rayon::prelude::*;
            (0..restarts)
                .into_par_iter()
                .map(run_one)
                .collect::<Result<Vec<_>>>()?
        };
        #[cfg(not(feature = "parallel"))]
        let results: Vec<HbaResult> = (0..restarts).map(run_one).collect::<Result<Vec<_>>>()?;

        let mut best: Option<HbaResult> = None;
        for result in results {
            let better = match &best {
                None => true,
                Some(b) => is_better(result.best_fitness, b.best_fitness),
            };
            if better {
                best = Some(result);
            }
        }
        tracing::info!(restarts, "hba restarts completed");
        best.ok_or_else(|| {
            HbaError::InvalidConfiguration("restarts must be at least 1".into())
        })
    }
}
